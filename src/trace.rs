//! Headless sample trace written as CSV

use crate::frame_loop::{FrameLoop, LoopStats, Pacing};
use crate::params::LaunchParams;
use crate::rotor::RotorSimulator;
use anyhow::{Context, Result};
use std::io::Write;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

pub const CSV_HEADER: &str = "index,time_ms,true_deg,sampled_deg";

/// Settings for a headless run
#[derive(Debug, Clone, Copy)]
pub struct TraceOptions {
    pub duration: Duration,
    pub refresh_hz: f64,
    pub pacing: Pacing,
}

impl TraceOptions {
    /// Validate command-line style values; anything that can't become a
    /// finite run is an error
    pub fn new(seconds: f64, refresh_hz: f64, pacing: Pacing) -> Result<Self> {
        anyhow::ensure!(
            seconds.is_finite() && seconds >= 0.0,
            "Trace length must be a non-negative number of seconds, got {}",
            seconds
        );
        let duration = Duration::try_from_secs_f64(seconds)
            .with_context(|| format!("Trace length {} s is out of range", seconds))?;
        // Fails early on refresh rates the loop can't step with
        FrameLoop::from_hz(refresh_hz, pacing)?;

        Ok(Self {
            duration,
            refresh_hz,
            pacing,
        })
    }
}

/// Run the simulator headless and write one CSV row per sample
pub fn write_trace<W: Write>(
    mut out: W,
    params: LaunchParams,
    options: TraceOptions,
    cancel: &AtomicBool,
) -> Result<LoopStats> {
    let mut sim = RotorSimulator::new(params.rpm, params.fps);
    let frame_loop = FrameLoop::from_hz(options.refresh_hz, options.pacing)?;

    writeln!(out, "{CSV_HEADER}").context("Failed to write trace header")?;

    let stats = frame_loop.run(&mut sim, options.duration, cancel, |sample, elapsed| {
        writeln!(
            out,
            "{},{:.3},{:.3},{:.3}",
            sample.index,
            elapsed.as_secs_f64() * 1000.0,
            sample.true_angle.to_degrees(),
            sample.angle.to_degrees(),
        )
        .context("Failed to write trace row")
    })?;

    out.flush().context("Failed to flush trace output")?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(seconds: f64) -> TraceOptions {
        TraceOptions {
            duration: Duration::from_secs_f64(seconds),
            refresh_hz: 60.0,
            pacing: Pacing::Simulated,
        }
    }

    #[test]
    fn trace_has_header_and_one_row_per_sample() {
        let mut buf = Vec::new();
        let cancel = AtomicBool::new(false);
        let params = LaunchParams { rpm: 600.0, fps: 10.0 };

        let stats = write_trace(&mut buf, params, options(1.0), &cancel).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines.len() as u64 - 1, stats.samples);
        assert!((9..=10).contains(&stats.samples));
    }

    #[test]
    fn sampled_column_steps_by_camera_step() {
        let mut buf = Vec::new();
        let cancel = AtomicBool::new(false);
        // One turn per second at 10 fps is 36° per sample
        let params = LaunchParams { rpm: 60.0, fps: 10.0 };

        write_trace(&mut buf, params, options(0.5), &cancel).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let sampled: Vec<f64> = text
            .lines()
            .skip(1)
            .map(|line| line.rsplit(',').next().unwrap().parse().unwrap())
            .collect();

        assert!(!sampled.is_empty());
        for (i, deg) in sampled.iter().enumerate() {
            assert!((deg - 36.0 * (i + 1) as f64).abs() < 1e-3, "row {i}: {deg}");
        }
    }

    #[test]
    fn cancelled_trace_only_has_header() {
        let mut buf = Vec::new();
        let cancel = AtomicBool::new(true);
        let stats = write_trace(&mut buf, LaunchParams::default(), options(1.0), &cancel).unwrap();
        assert!(stats.cancelled);
        assert_eq!(String::from_utf8(buf).unwrap(), format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn out_of_range_options_are_errors() {
        assert!(TraceOptions::new(1e20, 60.0, Pacing::Simulated).is_err());
        assert!(TraceOptions::new(-1.0, 60.0, Pacing::Simulated).is_err());
        assert!(TraceOptions::new(f64::INFINITY, 60.0, Pacing::Simulated).is_err());
        assert!(TraceOptions::new(1.0, 1e-30, Pacing::Simulated).is_err());
        assert!(TraceOptions::new(1.0, 0.0, Pacing::Simulated).is_err());
        assert!(TraceOptions::new(1.0, 60.0, Pacing::Simulated).is_ok());
    }

    #[test]
    fn unusable_refresh_in_options_is_an_error_not_a_panic() {
        let mut buf = Vec::new();
        let cancel = AtomicBool::new(false);
        let options = TraceOptions {
            duration: Duration::from_secs(1),
            refresh_hz: 1e-30,
            pacing: Pacing::Simulated,
        };
        assert!(write_trace(&mut buf, LaunchParams::default(), options, &cancel).is_err());
        assert!(buf.is_empty());
    }
}
