//! Display-refresh loop for driving the simulator without a window

use crate::rotor::{RotorSimulator, Sample};
use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// How the loop advances its clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Step a synthetic clock as fast as possible
    Simulated,
    /// Sleep until each refresh deadline
    Realtime,
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoopStats {
    pub ticks: u64,
    pub samples: u64,
    pub cancelled: bool,
}

/// Calls `tick` once per refresh interval and hands every sample to a
/// render callback
pub struct FrameLoop {
    refresh: Duration,
    pacing: Pacing,
}

impl FrameLoop {
    /// A zero refresh interval would never advance the clock, so it is rejected
    pub fn new(refresh: Duration, pacing: Pacing) -> Result<Self> {
        anyhow::ensure!(!refresh.is_zero(), "Refresh interval must be non-zero");
        Ok(Self { refresh, pacing })
    }

    /// Build a loop from a refresh rate in Hz
    pub fn from_hz(refresh_hz: f64, pacing: Pacing) -> Result<Self> {
        anyhow::ensure!(
            refresh_hz.is_finite() && refresh_hz > 0.0,
            "Refresh rate must be positive, got {}",
            refresh_hz
        );
        let refresh = Duration::try_from_secs_f64(1.0 / refresh_hz)
            .with_context(|| format!("Refresh rate {} Hz is out of range", refresh_hz))?;
        Self::new(refresh, pacing)
    }

    pub fn refresh_interval(&self) -> Duration {
        self.refresh
    }

    /// Start the simulator and run for `duration`.
    ///
    /// `cancel` is checked before every tick. The render callback receives
    /// each sample with the time since start; an error from it ends the run.
    /// The simulator is stopped on every exit path.
    pub fn run<F>(
        &self,
        sim: &mut RotorSimulator,
        duration: Duration,
        cancel: &AtomicBool,
        mut render: F,
    ) -> Result<LoopStats>
    where
        F: FnMut(&Sample, Duration) -> Result<()>,
    {
        let origin = Instant::now();
        sim.start(origin);

        let mut stats = LoopStats::default();
        let result = self.drive(sim, origin, duration, cancel, &mut render, &mut stats);
        sim.stop();
        result.map(|()| stats)
    }

    fn drive<F>(
        &self,
        sim: &mut RotorSimulator,
        origin: Instant,
        duration: Duration,
        cancel: &AtomicBool,
        render: &mut F,
        stats: &mut LoopStats,
    ) -> Result<()>
    where
        F: FnMut(&Sample, Duration) -> Result<()>,
    {
        let mut offset = Duration::ZERO;
        loop {
            if cancel.load(Ordering::SeqCst) {
                stats.cancelled = true;
                return Ok(());
            }

            offset = match offset.checked_add(self.refresh) {
                Some(next) if next <= duration => next,
                _ => return Ok(()),
            };

            let Some(deadline) = origin.checked_add(offset) else {
                return Ok(());
            };
            let now = match self.pacing {
                Pacing::Simulated => deadline,
                Pacing::Realtime => {
                    let wait = deadline.saturating_duration_since(Instant::now());
                    if !wait.is_zero() {
                        std::thread::sleep(wait);
                    }
                    Instant::now()
                }
            };
            stats.ticks += 1;

            if let Some(sample) = sim.tick(now) {
                stats.samples += 1;
                render(&sample, now.saturating_duration_since(origin))?;
            }
        }
    }
}
