use bevy::prelude::*;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin}; // fps
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};
use crate::systems::mesh::RegenerateEvent;
use crate::systems::mesh::town::Town;
use crate::systems::lighting::LightMode;
use crate::systems::interaction::AddressCard;

pub mod indicator;

// re-export the main items that other modules need
pub use indicator::{LightModeIndicator, LightModeChangeEvent};
pub use indicator::{update_light_mode_indicator, render_light_mode_indicator};

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        assert!(app.is_plugin_added::<EguiPlugin>());
        app
            .insert_resource(LightModeIndicator::default())
            .insert_resource(AddressCard::default())
            .add_event::<LightModeChangeEvent>()
            .add_systems(Update, (key_input, update_light_mode_indicator))
            .add_systems(EguiPrimaryContextPass, (ui_main, address_card, fps, render_light_mode_indicator)); // UI rendering here
    }
}

fn key_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut light_mode: ResMut<LightMode>,
    mut light_mode_events: EventWriter<LightModeChangeEvent>,
    mut regen_events: EventWriter<RegenerateEvent>,
    mut card: ResMut<AddressCard>,
) {
    if keyboard_input.just_pressed(KeyCode::KeyL) {
        *light_mode = light_mode.toggled();
        light_mode_events.write(LightModeChangeEvent(*light_mode));
    }

    if keyboard_input.just_pressed(KeyCode::KeyR) {
        regen_events.write(RegenerateEvent { seed: rand::random() });
        card.hide();
    }
}

fn ui_main(
    mut contexts: EguiContexts,
    towns: Query<&Town>,
    mut light_mode: ResMut<LightMode>,
    mut regen_events: EventWriter<RegenerateEvent>,
    mut light_mode_events: EventWriter<LightModeChangeEvent>,
    mut card: ResMut<AddressCard>,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        egui::SidePanel::left("config_panel")
            .default_width(200.0)
            .min_width(250.0)
            .max_width(400.0)
            .resizable(true)
            .show(ctx, |ui| {
                // camera
                ui.label("Camera: ");
                ui.label("WASD - Move");
                ui.label("Scroll - Zoom");
                ui.label("MMB - Rotate");
                ui.label("LMB - Show house address");

                ui.separator();

                // seed
                egui::CollapsingHeader::new("Town")
                    .default_open(true)
                    .show(ui, |ui| {
                    if let Ok(town) = towns.single() {
                        ui.label(format!("Seed: {}", town.seed));
                        ui.label(format!("Houses: {}", town.houses));
                    }

                    if ui.button("Regenerate")
                        .on_hover_text("Rebuild every street with a new random seed (R)")
                        .clicked() {
                        let new_seed = rand::random();
                        regen_events.write(RegenerateEvent { seed: new_seed });
                        // the selected house is gone after a rebuild
                        card.hide();
                    }
                });

                // lighting
                egui::CollapsingHeader::new("Lighting")
                    .default_open(true)
                    .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        for mode in [LightMode::Static, LightMode::Daylight] {
                            let (text, color) = indicator::light_mode_style(mode);
                            let mut button = egui::Button::new(text);
                            if *light_mode == mode {
                                button = button.fill(color);
                            }
                            if ui.add(button).clicked() && *light_mode != mode {
                                *light_mode = mode;
                                light_mode_events.write(LightModeChangeEvent(mode));
                            }
                        }
                    });
                    ui.label("(L to switch)");
                });

                ui.separator();
                ui.label("R - Regenerate");
                ui.label("ESC - Exit");
            });
    }
}

// the address label floats where the house was clicked
fn address_card(
    mut contexts: EguiContexts,
    card: Res<AddressCard>,
) {
    let Some(address) = card.address.as_deref() else { return };

    if let Ok(ctx) = contexts.ctx_mut() {
        egui::Area::new(egui::Id::new("address_card"))
            .fixed_pos(egui::pos2(card.left, card.top))
            .show(ctx, |ui| {
                let frame = egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(40, 44, 52, 220))
                    .stroke(egui::Stroke::new(1.0, egui::Color32::WHITE))
                    .inner_margin(egui::Margin::symmetric(10, 6))
                    .corner_radius(egui::CornerRadius::same(4));

                frame.show(ui, |ui| {
                    ui.label(egui::RichText::new(address)
                        .size(16.0)
                        .color(egui::Color32::WHITE)
                        .strong());
                });
            });
    }
}

fn fps(
    mut contexts: EguiContexts,
    diagnostics: Res<DiagnosticsStore>,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        egui::Area::new(egui::Id::new("fps_counter"))
            .anchor(egui::Align2::RIGHT_TOP, egui::Vec2::new(-10.0, 10.0))
            .show(ctx, |ui| {
                ui.with_layout(egui::Layout::top_down(egui::Align::RIGHT), |ui| {
                    if let Some(fps_diagnostic) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
                        if let Some(fps) = fps_diagnostic.smoothed() {
                            ui.label(egui::RichText::new(format!("{:.0}", fps))
                                .size(26.0)
                                .color(egui::Color32::WHITE));
                        }
                    }
                });
            });
    }
}
