//! strobe-viewer: stroboscopic effect viewer
//!
//! Usage: strobe-viewer [--rpm N] [--fps N] [--query "rpm=900&fps=30"] [--headless]

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use strobe_viewer::{write_trace, LaunchParams, Pacing, StrobeViewerApp, TraceOptions};

#[derive(Parser, Debug)]
#[command(name = "strobe-viewer")]
#[command(about = "Stroboscopic (wagon-wheel) effect viewer with a sampled rotating rotor")]
struct Args {
    /// Rotation speed in rpm (60-2000); ignored when out of range
    #[arg(long, allow_hyphen_values = true)]
    rpm: Option<String>,

    /// Sampling rate in fps (10-120); ignored when out of range
    #[arg(long, allow_hyphen_values = true)]
    fps: Option<String>,

    /// URL-style query string, e.g. "?rpm=900&fps=30"
    #[arg(long)]
    query: Option<String>,

    /// Print a CSV sample trace instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Trace length in seconds
    #[arg(long, default_value = "1.0")]
    seconds: f64,

    /// Display refresh rate the trace is ticked at
    #[arg(long, default_value = "60")]
    refresh_hz: f64,

    /// Pace the trace in real time instead of simulating the clock
    #[arg(long)]
    realtime: bool,
}

impl Args {
    /// Query string first, explicit flags on top
    fn launch_params(&self) -> LaunchParams {
        let mut params = LaunchParams::default();
        if let Some(query) = &self.query {
            params.apply_query(query);
        }
        if let Some(rpm) = &self.rpm {
            params.apply_rpm(rpm);
        }
        if let Some(fps) = &self.fps {
            params.apply_fps(fps);
        }
        params
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let params = args.launch_params();
    log::info!("Launch parameters: {:.0} rpm, {:.0} fps", params.rpm, params.fps);

    if args.headless {
        return run_headless(&args, params);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_title("strobe-viewer"),
        vsync: true,
        ..Default::default()
    };

    eframe::run_native(
        "strobe-viewer",
        options,
        Box::new(move |cc| Ok(Box::new(StrobeViewerApp::new(cc, params)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}

fn run_headless(args: &Args, params: LaunchParams) -> Result<()> {
    let pacing = if args.realtime {
        Pacing::Realtime
    } else {
        Pacing::Simulated
    };
    let options = TraceOptions::new(args.seconds, args.refresh_hz, pacing)
        .context("Invalid --seconds or --refresh-hz")?;

    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_clone = cancel.clone();
    ctrlc::set_handler(move || {
        cancel_clone.store(true, Ordering::SeqCst);
    })
    .context("Failed to set Ctrl+C handler")?;

    let stdout = io::stdout();
    let stats = write_trace(stdout.lock(), params, options, &cancel)?;

    if stats.cancelled {
        log::warn!("Trace cancelled after {} samples", stats.samples);
    } else {
        log::info!("Trace finished: {} ticks, {} samples", stats.ticks, stats.samples);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_query() {
        let args = Args::parse_from(["strobe-viewer", "--query", "rpm=900&fps=30", "--fps", "60"]);
        assert_eq!(args.launch_params(), LaunchParams { rpm: 900.0, fps: 60.0 });
    }

    #[test]
    fn out_of_range_flags_keep_defaults() {
        let args = Args::parse_from(["strobe-viewer", "--rpm", "5", "--fps", "-30"]);
        assert_eq!(args.launch_params(), LaunchParams::default());
    }

    #[test]
    fn headless_rejects_out_of_range_trace_values() {
        let params = LaunchParams::default();

        let args = Args::parse_from(["strobe-viewer", "--headless", "--seconds", "1e20"]);
        assert!(run_headless(&args, params).is_err());

        let args = Args::parse_from(["strobe-viewer", "--headless", "--refresh-hz", "1e-30"]);
        assert!(run_headless(&args, params).is_err());
    }
}
