use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use crate::systems::lighting::LightMode;

#[derive(Resource)]
pub struct LightModeIndicator {
    pub mode: LightMode,
    pub timer: f32,
    pub duration: f32,
}

impl Default for LightModeIndicator {
    fn default() -> Self {
        Self {
            mode: LightMode::Static,
            timer: 0.0,
            duration: 2.0,
        }
    }
}

impl LightModeIndicator {
    pub fn trigger(&mut self, mode: LightMode) {
        self.mode = mode;
        self.timer = self.duration;
    }

    pub fn tick(&mut self, delta: f32) {
        self.timer = (self.timer - delta).max(0.0);
    }

    // fades out linearly over the display duration
    pub fn alpha(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.timer / self.duration).clamp(0.0, 1.0)
    }
}

#[derive(Event)]
pub struct LightModeChangeEvent(pub LightMode);

pub fn light_mode_style(mode: LightMode) -> (&'static str, egui::Color32) {
    match mode {
        LightMode::Static => ("STATIC LIGHT", egui::Color32::from_rgb(45, 72, 116)),
        LightMode::Daylight => ("DAYLIGHT", egui::Color32::from_rgb(196, 120, 30)),
    }
}

pub fn update_light_mode_indicator(
    mut indicator: ResMut<LightModeIndicator>,
    mut events: EventReader<LightModeChangeEvent>,
    time: Res<Time>,
) {
    for event in events.read() {
        indicator.trigger(event.0);
    }

    if indicator.timer > 0.0 {
        indicator.tick(time.delta_secs());
    }
}

pub fn render_light_mode_indicator(
    indicator: Res<LightModeIndicator>,
    mut contexts: EguiContexts,
) {
    if indicator.timer <= 0.0 {
        return;
    }

    if let Ok(ctx) = contexts.ctx_mut() {
        let alpha = indicator.alpha();
        let (mode_text, bg_color) = light_mode_style(indicator.mode);

        egui::Area::new(egui::Id::new(format!("light_mode_indicator_{:?}", indicator.mode)))
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 60.0))
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    // background color, matched with the egui UI panel
                    let grey_color = egui::Color32::from_rgb(40, 44, 52);

                    // L key badge
                    let key_frame = egui::Frame::new()
                        .fill(egui::Color32::from_rgba_unmultiplied(
                            grey_color.r(), grey_color.g(), grey_color.b(),
                            (200.0 * alpha) as u8
                        ))
                        .stroke(egui::Stroke::new(
                            1.0,
                            egui::Color32::from_rgba_unmultiplied(255, 255, 255, (200.0 * alpha) as u8)
                        ))
                        .inner_margin(egui::Margin::symmetric(8, 6))
                        .corner_radius(egui::CornerRadius::same(4));

                    key_frame.show(ui, |ui| {
                        ui.label(egui::RichText::new("L")
                            .size(14.0)
                            .color(egui::Color32::from_rgba_unmultiplied(255, 255, 255, (255.0 * alpha) as u8))
                            .strong());
                    });

                    ui.add_space(4.0);

                    let mode_frame = egui::Frame::new()
                        .fill(egui::Color32::from_rgba_unmultiplied(
                            bg_color.r(), bg_color.g(), bg_color.b(),
                            (200.0 * alpha) as u8
                        ))
                        .stroke(egui::Stroke::new(
                            2.0,
                            egui::Color32::from_rgba_unmultiplied(255, 255, 255, (200.0 * alpha) as u8)
                        ))
                        .inner_margin(egui::Margin::symmetric(20, 10))
                        .corner_radius(egui::CornerRadius::same(8));

                    mode_frame.show(ui, |ui| {
                        ui.label(egui::RichText::new(mode_text)
                            .size(18.0)
                            .color(egui::Color32::from_rgba_unmultiplied(255, 255, 255, (255.0 * alpha) as u8))
                            .strong());
                    });
                });
            });
    }
}
