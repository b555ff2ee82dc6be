//! Paired rotation speed / sampling rate presets

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub rpm: f64,
    pub fps: f64,
}

pub const PRESETS: [Preset; 6] = [
    // Half a turn per frame, which four blades can't distinguish from standing still
    Preset { name: "Frozen", rpm: 900.0, fps: 30.0 },
    Preset { name: "Creep forward", rpm: 901.0, fps: 30.0 },
    Preset { name: "Creep backward", rpm: 899.0, fps: 30.0 },
    Preset { name: "Reversal boundary", rpm: 60.0, fps: 24.0 },
    Preset { name: "Blade lock", rpm: 300.0, fps: 20.0 },
    Preset { name: "Wagon wheel", rpm: 340.0, fps: 24.0 },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{FPS_RANGE, RPM_RANGE};
    use crate::readout::{apparent_degrees_per_frame, blade_step_degrees};
    use crate::rotor::BLADE_COUNT;

    #[test]
    fn presets_fit_control_bounds() {
        for preset in PRESETS {
            assert!(RPM_RANGE.contains(&preset.rpm), "{}", preset.name);
            assert!(FPS_RANGE.contains(&preset.fps), "{}", preset.name);
        }
    }

    #[test]
    fn presets_produce_expected_readouts() {
        let expected = [0.0, 12.0, -12.0, 180.0, 0.0, 60.0];
        for (preset, want) in PRESETS.iter().zip(expected) {
            assert_eq!(apparent_degrees_per_frame(preset.rpm, preset.fps), want, "{}", preset.name);
        }
    }

    #[test]
    fn presets_produce_expected_blade_motion() {
        let expected = [0.0, 0.2, -0.2, 15.0, 0.0, -5.0];
        for (preset, want) in PRESETS.iter().zip(expected) {
            let got = blade_step_degrees(preset.rpm, preset.fps, BLADE_COUNT);
            assert!((got - want).abs() < 1e-9, "{}: {got}", preset.name);
        }
    }
}
