//! Apparent rotation per frame and its colour band

use crate::rotor::BLADE_COUNT;

/// How visible the apparent motion is between consecutive samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionBand {
    /// Under one degree per frame: the rotor looks stationary
    Frozen,
    /// Under ten degrees per frame
    Creeping,
    Moving,
}

impl MotionBand {
    pub fn classify(apparent_deg: f64) -> Self {
        let magnitude = apparent_deg.abs();
        if magnitude < 1.0 {
            MotionBand::Frozen
        } else if magnitude < 10.0 {
            MotionBand::Creeping
        } else {
            MotionBand::Moving
        }
    }
}

/// Fold an angle into (-period/2, period/2]
fn fold(degrees: f64, period: f64) -> f64 {
    let normalized = degrees.rem_euclid(period);
    if normalized > period / 2.0 {
        normalized - period
    } else {
        normalized
    }
}

/// Signed displacement between consecutive samples, folded into (-180, 180].
///
/// Computed as `rpm * 360 / fps`. The rotor's physical step per sample is
/// [`camera_step_degrees`].
pub fn apparent_degrees_per_frame(rpm: f64, fps: f64) -> f64 {
    fold(rpm * 360.0 / fps, 360.0)
}

/// Physical rotation between consecutive samples, folded into (-180, 180]
pub fn camera_step_degrees(rpm: f64, fps: f64) -> f64 {
    fold(rpm * 6.0 / fps, 360.0)
}

/// Camera step as the eye resolves it on a rotor with `blades` identical
/// blades: anything past half the blade spacing reads as backwards motion.
pub fn blade_step_degrees(rpm: f64, fps: f64, blades: usize) -> f64 {
    fold(rpm * 6.0 / fps, 360.0 / blades as f64)
}

/// Values shown next to the rotor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Readout {
    /// Raw rotation speed
    pub rpm: f64,
    pub apparent_deg: f64,
    /// `apparent_deg` expressed as a rotation rate; negative means reversal
    pub apparent_rpm: f64,
    pub band: MotionBand,
    pub camera_step_deg: f64,
    pub blade_step_deg: f64,
}

impl Readout {
    pub fn new(rpm: f64, fps: f64) -> Self {
        let apparent_deg = apparent_degrees_per_frame(rpm, fps);
        Self {
            rpm,
            apparent_deg,
            apparent_rpm: apparent_deg * fps / 360.0 * 60.0,
            band: MotionBand::classify(apparent_deg),
            camera_step_deg: camera_step_degrees(rpm, fps),
            blade_step_deg: blade_step_degrees(rpm, fps, BLADE_COUNT),
        }
    }

    pub fn apparent_label(&self) -> String {
        format!("{:.1}°", self.apparent_deg)
    }
}
