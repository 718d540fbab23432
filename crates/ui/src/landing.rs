//! Landing card shown while the navigator is unmounted.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use campus::CampusData;
use rendering::NavigatorState;

use crate::theme;

const BUTTON_SIZE: egui::Vec2 = egui::vec2(240.0, 40.0);

pub fn landing_ui(
    mut contexts: EguiContexts,
    data: Res<CampusData>,
    mut next_state: ResMut<NextState<NavigatorState>>,
    mut app_exit: EventWriter<AppExit>,
) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(egui::Color32::from_rgb(10, 25, 41)))
        .show(contexts.ctx_mut(), |ui| {
            ui.vertical_centered(|ui| {
                let available = ui.available_height();
                ui.add_space(available * 0.25);

                ui.label(
                    egui::RichText::new("CAMPUS PORTAL")
                        .size(56.0)
                        .strong()
                        .color(theme::ACCENT),
                );
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(format!("{} buildings on the map", data.buildings.len()))
                        .size(16.0)
                        .color(theme::MUTED),
                );
                ui.add_space(48.0);

                if ui
                    .add_sized(
                        BUTTON_SIZE,
                        egui::Button::new(egui::RichText::new("Open campus navigator").size(18.0)),
                    )
                    .clicked()
                {
                    next_state.set(NavigatorState::Mounted);
                }

                #[cfg(not(target_arch = "wasm32"))]
                {
                    ui.add_space(8.0);
                    if ui
                        .add_sized(
                            BUTTON_SIZE,
                            egui::Button::new(egui::RichText::new("Quit").size(18.0)),
                        )
                        .clicked()
                    {
                        app_exit.send(AppExit::Success);
                    }
                }

                #[cfg(target_arch = "wasm32")]
                let _ = app_exit;
            });
        });
}
