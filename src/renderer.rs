//! Rotor rendering: hub plus radiating blades

use crate::rotor::BLADE_COUNT;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use std::f64::consts::TAU;

/// Rotor dimensions in logical units (scaled to fit the available rect)
pub const BLADE_LENGTH: f32 = 180.0;
pub const BLADE_WIDTH: f32 = 12.0;
pub const HUB_RADIUS: f32 = 20.0;
/// Half-extent of the square the rotor is laid out in
const ROTOR_EXTENT: f32 = 200.0;

const STAGE_BG: Color32 = Color32::from_rgb(20, 20, 30);
const STAGE_BORDER: Color32 = Color32::from_rgb(60, 60, 80);
const BLADE_COLOR: Color32 = Color32::from_rgb(230, 230, 240);
const HUB_COLOR: Color32 = Color32::from_rgb(120, 120, 140);

/// End points of each blade for a rotor at `angle` radians.
///
/// Blades are evenly spaced starting at `angle`; angles grow clockwise on
/// screen since y points down.
pub fn blade_tips(center: Pos2, angle: f64, length: f32, blades: usize) -> Vec<Pos2> {
    (0..blades)
        .map(|i| {
            let theta = angle + i as f64 * TAU / blades as f64;
            Pos2::new(
                center.x + theta.cos() as f32 * length,
                center.y + theta.sin() as f32 * length,
            )
        })
        .collect()
}

/// Renderer with the stage rect and scale worked out for one frame
pub struct RotorRenderer {
    pub scale: f32,
    pub center: Pos2,
    pub stage_rect: Rect,
}

impl RotorRenderer {
    /// Fit a square stage into the available rect, centered
    pub fn new(available_rect: Rect) -> Self {
        let padding = 20.0;
        let usable = (available_rect.width().min(available_rect.height()) - padding * 2.0).max(1.0);
        let scale = usable / (ROTOR_EXTENT * 2.0);

        let center = available_rect.center();
        let stage_rect = Rect::from_center_size(center, Vec2::splat(usable));

        Self {
            scale,
            center,
            stage_rect,
        }
    }

    pub fn draw_stage_bg(&self, painter: &egui::Painter) {
        painter.rect_filled(self.stage_rect, 8.0, STAGE_BG);
        painter.rect_stroke(self.stage_rect, 8.0, Stroke::new(2.0, STAGE_BORDER));
    }

    /// Draw the rotor as the camera captured it
    pub fn draw_rotor(&self, painter: &egui::Painter, angle: f64) {
        self.draw_blades(painter, angle, BLADE_COLOR);
        painter.circle_filled(self.center, HUB_RADIUS * self.scale, HUB_COLOR);
    }

    /// Faint overlay at the continuous rotor position
    pub fn draw_true_rotor(&self, painter: &egui::Painter, angle: f64) {
        let ghost = Color32::from_rgba_unmultiplied(100, 150, 255, 90);
        self.draw_blades(painter, angle, ghost);
    }

    fn draw_blades(&self, painter: &egui::Painter, angle: f64, color: Color32) {
        let width = BLADE_WIDTH * self.scale;
        for tip in blade_tips(self.center, angle, BLADE_LENGTH * self.scale, BLADE_COUNT) {
            painter.line_segment([self.center, tip], Stroke::new(width, color));
            // Round cap
            painter.circle_filled(tip, width / 2.0, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(a: Pos2, b: Pos2) -> f32 {
        (a - b).length()
    }

    #[test]
    fn blade_tips_sit_at_blade_length() {
        let center = Pos2::new(100.0, 50.0);
        for tip in blade_tips(center, 0.7, 180.0, 4) {
            assert!((distance(center, tip) - 180.0).abs() < 1e-3);
        }
    }

    #[test]
    fn blade_tips_are_evenly_spaced() {
        let center = Pos2::ZERO;
        let tips = blade_tips(center, 0.0, 10.0, 4);
        assert_eq!(tips.len(), 4);
        assert!(distance(tips[0], Pos2::new(10.0, 0.0)) < 1e-4);
        assert!(distance(tips[1], Pos2::new(0.0, 10.0)) < 1e-4);
        assert!(distance(tips[2], Pos2::new(-10.0, 0.0)) < 1e-4);
        assert!(distance(tips[3], Pos2::new(0.0, -10.0)) < 1e-4);
    }

    #[test]
    fn quarter_turn_looks_identical_for_four_blades() {
        let center = Pos2::ZERO;
        let a = blade_tips(center, 0.3, 50.0, 4);
        let b = blade_tips(center, 0.3 + TAU / 4.0, 50.0, 4);
        for tip in &b {
            assert!(a.iter().any(|other| distance(*tip, *other) < 1e-3));
        }
    }

    #[test]
    fn renderer_fits_square_stage() {
        let available = Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(800.0, 440.0));
        let renderer = RotorRenderer::new(available);
        assert_eq!(renderer.center, Pos2::new(400.0, 220.0));
        assert!((renderer.stage_rect.width() - 400.0).abs() < 1e-3);
        assert!((renderer.stage_rect.height() - 400.0).abs() < 1e-3);
        assert!((renderer.scale - 1.0).abs() < 1e-6);
        // Blades plus caps stay inside the stage
        let reach = (BLADE_LENGTH + BLADE_WIDTH / 2.0) * renderer.scale;
        assert!(reach <= renderer.stage_rect.width() / 2.0);
    }
}
