//! Rotor simulation with a discrete camera shutter
//!
//! The true angle integrates continuously from wall-clock time. The sampled
//! angle is what the camera sees: it only moves when the shutter fires, and
//! then by exactly one nominal frame interval's worth of rotation. Drawing the
//! sampled angle is what makes the aliasing visible.

use crate::params::{clamp_fps, clamp_rpm};
use crate::presets::Preset;
use std::f64::consts::TAU;
use std::time::{Duration, Instant};

/// Identical blades radiating from the hub
pub const BLADE_COUNT: usize = 4;

/// Convert revolutions per minute to radians per second
pub fn rpm_to_rad_per_sec(rpm: f64) -> f64 {
    rpm * TAU / 60.0
}

/// One shutter firing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Number of this sample since the last reset, starting at 1
    pub index: u64,
    /// Angle the camera captured, in radians
    pub angle: f64,
    /// Continuous rotor position at the same instant, in radians
    pub true_angle: f64,
}

/// Rotor state and timing anchors
#[derive(Debug, Clone)]
pub struct RotorSimulator {
    rpm: f64,
    fps: f64,
    running: bool,
    true_angle: f64,
    sampled_angle: f64,
    samples: u64,
    /// Integration anchor for the true angle
    last_tick: Option<Instant>,
    /// When the shutter last fired (or was last re-anchored)
    last_sample: Option<Instant>,
}

impl RotorSimulator {
    pub fn new(rpm: f64, fps: f64) -> Self {
        Self {
            rpm: clamp_rpm(rpm),
            fps: clamp_fps(fps),
            running: false,
            true_angle: 0.0,
            sampled_angle: 0.0,
            samples: 0,
            last_tick: None,
            last_sample: None,
        }
    }

    pub fn rpm(&self) -> f64 {
        self.rpm
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn true_angle(&self) -> f64 {
        self.true_angle
    }

    /// Angle to draw
    pub fn sampled_angle(&self) -> f64 {
        self.sampled_angle
    }

    pub fn sample_count(&self) -> u64 {
        self.samples
    }

    /// Nominal time between shutter firings
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps)
    }

    /// Start from zero angle with fresh anchors. No-op while running.
    pub fn start(&mut self, now: Instant) {
        if self.running {
            return;
        }
        self.reset_angles();
        self.last_tick = Some(now);
        self.last_sample = Some(now);
        self.running = true;
        log::info!("Rotor started at {:.0} rpm, {:.0} fps", self.rpm, self.fps);
    }

    /// Stop advancing; the last sample stays on screen until the next start
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.last_tick = None;
        self.last_sample = None;
        log::info!("Rotor stopped after {} samples", self.samples);
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.running {
            self.stop();
        } else {
            self.start(now);
        }
    }

    /// Change rotation speed without moving the displayed rotor.
    ///
    /// The true angle is settled up to `now` under the old speed before its
    /// anchor moves, so later integration continues from the same position.
    /// The shutter keeps its own schedule.
    pub fn set_speed(&mut self, rpm: f64, now: Instant) {
        let rpm = clamp_rpm(rpm);
        if self.running {
            self.advance_true_angle(now);
        }
        self.rpm = rpm;
    }

    /// Change the shutter rate; takes effect at the next shutter check
    pub fn set_sampling_rate(&mut self, fps: f64) {
        self.fps = clamp_fps(fps);
    }

    /// Set both controls to a preset's values and restart from zero angle
    pub fn apply_preset(&mut self, preset: &Preset, now: Instant) {
        self.rpm = clamp_rpm(preset.rpm);
        self.fps = clamp_fps(preset.fps);
        self.reset_angles();
        if self.running {
            self.last_tick = Some(now);
            self.last_sample = Some(now);
        }
        log::info!(
            "Applied preset {:?}: {:.0} rpm, {:.0} fps",
            preset.name,
            self.rpm,
            self.fps
        );
    }

    /// Advance to `now`. Returns the new sample when the shutter fired.
    ///
    /// At most one sample is produced per call, since each call stands for
    /// one display refresh.
    pub fn tick(&mut self, now: Instant) -> Option<Sample> {
        if !self.running {
            return None;
        }

        self.advance_true_angle(now);

        let interval = self.frame_interval();
        let last_sample = *self.last_sample.get_or_insert(now);
        if now.saturating_duration_since(last_sample) < interval {
            return None;
        }

        self.sampled_angle += rpm_to_rad_per_sec(self.rpm) / self.fps;
        self.samples += 1;

        // Keep the average rate at fps, but don't burst to catch up after a stall
        let next_anchor = last_sample + interval;
        self.last_sample = if now.saturating_duration_since(next_anchor) >= interval {
            Some(now)
        } else {
            Some(next_anchor)
        };

        Some(Sample {
            index: self.samples,
            angle: self.sampled_angle,
            true_angle: self.true_angle,
        })
    }

    fn advance_true_angle(&mut self, now: Instant) {
        if let Some(last) = self.last_tick {
            let elapsed = now.saturating_duration_since(last).as_secs_f64();
            self.true_angle += rpm_to_rad_per_sec(self.rpm) * elapsed;
        }
        self.last_tick = Some(now);
    }

    fn reset_angles(&mut self) {
        self.true_angle = 0.0;
        self.sampled_angle = 0.0;
        self.samples = 0;
    }
}
