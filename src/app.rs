//! Main application implementing eframe::App

use crate::params::{LaunchParams, FPS_RANGE, RPM_RANGE};
use crate::presets::PRESETS;
use crate::readout::{MotionBand, Readout};
use crate::renderer::RotorRenderer;
use crate::rotor::RotorSimulator;
use egui::{Color32, Key, RichText};
use std::time::Instant;

const PANEL_BG: Color32 = Color32::from_rgb(15, 15, 20);

fn band_color(band: MotionBand) -> Color32 {
    match band {
        MotionBand::Frozen => Color32::from_rgb(221, 0, 0),
        MotionBand::Creeping => Color32::from_rgb(221, 136, 0),
        MotionBand::Moving => Color32::from_rgb(220, 220, 220),
    }
}

/// Main application state
pub struct StrobeViewerApp {
    sim: RotorSimulator,
    /// Slider values; pushed into the simulator when they change
    rpm_input: f64,
    fps_input: f64,
    /// Overlay the continuous rotor position
    show_true_rotor: bool,
}

impl StrobeViewerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, params: LaunchParams) -> Self {
        let sim = RotorSimulator::new(params.rpm, params.fps);
        Self {
            rpm_input: sim.rpm(),
            fps_input: sim.fps(),
            sim,
            show_true_rotor: false,
        }
    }

    /// Handle keyboard input
    fn handle_input(&mut self, ctx: &egui::Context) {
        if ctx.input(|input| input.key_pressed(Key::Space)) {
            self.sim.toggle(Instant::now());
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(10.0);

            let toggle_text = if self.sim.is_running() {
                "⏹ Stop Animation"
            } else {
                "▶ Start Animation"
            };
            if ui.button(toggle_text).clicked() {
                self.sim.toggle(Instant::now());
            }

            ui.separator();

            let rpm_slider = egui::Slider::new(&mut self.rpm_input, RPM_RANGE)
                .integer()
                .text("rpm");
            if ui.add(rpm_slider).changed() {
                self.sim.set_speed(self.rpm_input, Instant::now());
            }

            let fps_slider = egui::Slider::new(&mut self.fps_input, FPS_RANGE)
                .integer()
                .text("fps");
            if ui.add(fps_slider).changed() {
                self.sim.set_sampling_rate(self.fps_input);
            }

            ui.separator();
            ui.checkbox(&mut self.show_true_rotor, "Show true rotor");
        });

        ui.horizontal(|ui| {
            ui.add_space(10.0);
            ui.label("Presets:");
            for preset in &PRESETS {
                let hover = format!("{:.0} rpm @ {:.0} fps", preset.rpm, preset.fps);
                if ui.button(preset.name).on_hover_text(hover).clicked() {
                    self.sim.apply_preset(preset, Instant::now());
                    self.rpm_input = self.sim.rpm();
                    self.fps_input = self.sim.fps();
                }
            }
        });
    }

    fn readouts(&self, ui: &mut egui::Ui) {
        let readout = Readout::new(self.sim.rpm(), self.sim.fps());

        ui.horizontal(|ui| {
            ui.add_space(10.0);
            ui.label(format!("Real speed: {:.0} rpm", readout.rpm));
            ui.separator();
            ui.label("Apparent rotation per frame:");
            ui.label(
                RichText::new(readout.apparent_label())
                    .monospace()
                    .strong()
                    .color(band_color(readout.band)),
            );
            ui.label(format!("({:+.1} rpm)", readout.apparent_rpm));
            ui.separator();
            ui.label(format!(
                "Camera step: {:.1}° | blade step: {:+.1}°",
                readout.camera_step_deg, readout.blade_step_deg
            ));
            ui.separator();
            ui.label(format!("Samples: {}", self.sim.sample_count()));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label("Space: Start/Stop");
            });
        });
    }
}

impl eframe::App for StrobeViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        // One display refresh is one tick; the shutter decides whether the
        // displayed angle moves
        if self.sim.is_running() {
            self.sim.tick(Instant::now());
            ctx.request_repaint();
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(PANEL_BG))
            .show(ctx, |ui| {
                let available = ui.available_rect_before_wrap();
                let controls_height = 90.0;

                let stage_area = egui::Rect::from_min_max(
                    available.min,
                    egui::Pos2::new(available.max.x, available.max.y - controls_height),
                );

                let renderer = RotorRenderer::new(stage_area);
                let painter = ui.painter_at(stage_area);

                renderer.draw_stage_bg(&painter);
                if self.show_true_rotor {
                    renderer.draw_true_rotor(&painter, self.sim.true_angle());
                }
                renderer.draw_rotor(&painter, self.sim.sampled_angle());

                ui.allocate_rect(stage_area, egui::Sense::hover());

                self.controls(ui);
                ui.add_space(5.0);
                self.readouts(ui);
            });
    }
}
