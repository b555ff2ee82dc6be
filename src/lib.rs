//! strobe-viewer: stroboscopic (wagon-wheel) effect demonstration
//!
//! A four-bladed rotor spins at a true angular speed while a simulated
//! camera samples it at a configurable rate. Drawing only the sampled angle
//! shows the rotor slowed, frozen or reversed when the sampling rate lines
//! up with the rotation.

pub mod app;
pub mod frame_loop;
pub mod params;
pub mod presets;
pub mod readout;
pub mod renderer;
pub mod rotor;
pub mod trace;

pub use app::StrobeViewerApp;
pub use frame_loop::{FrameLoop, LoopStats, Pacing};
pub use params::LaunchParams;
pub use presets::{Preset, PRESETS};
pub use readout::{apparent_degrees_per_frame, MotionBand, Readout};
pub use rotor::{RotorSimulator, Sample};
pub use trace::{write_trace, TraceOptions};
