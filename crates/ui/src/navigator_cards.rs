//! Header, controls and debug cards drawn over the mounted navigator.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::debug_overlay::DebugOverlay;
use rendering::NavigatorState;

use crate::theme;

/// One line of the controls card.
#[derive(Debug, Clone, Copy)]
pub struct ControlHint {
    pub badge: &'static str,
    pub text: &'static str,
    /// Mouse hints get the blue badge, keys the red one.
    pub mouse: bool,
}

const fn hint(badge: &'static str, text: &'static str, mouse: bool) -> ControlHint {
    ControlHint { badge, text, mouse }
}

pub const CONTROLS: &[ControlHint] = &[
    hint("M", "Left click + drag: Rotate view (360°)", true),
    hint("M", "Scroll: Zoom in/out", true),
    hint("M", "Hover: Inspect buildings (rise up + highlight)", true),
    hint("R", "Press R to reset the view", false),
    hint("D", "Press D to toggle the debug readout", false),
];

pub fn header_card_ui(
    mut contexts: EguiContexts,
    mut next_state: ResMut<NextState<NavigatorState>>,
) {
    egui::Window::new("navigator_header")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(20.0, 20.0))
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal(|ui| {
                if ui.button("< Back").clicked() {
                    next_state.set(NavigatorState::Unmounted);
                }
                ui.label(
                    egui::RichText::new("Virtual Campus Navigator")
                        .size(20.0)
                        .strong(),
                );
            });
            ui.colored_label(theme::ACCENT, "Professional campus layout");
            ui.label(
                egui::RichText::new(
                    "Hover buildings to inspect the current schedule. Left-drag to rotate, scroll to zoom.",
                )
                .size(11.0),
            );
        });
}

pub fn controls_card_ui(mut contexts: EguiContexts) {
    egui::Window::new("navigator_controls")
        .title_bar(false)
        .resizable(false)
        .max_width(400.0)
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(20.0, -20.0))
        .show(contexts.ctx_mut(), |ui| {
            ui.colored_label(theme::ACCENT, egui::RichText::new("Controls:").strong());
            for hint in CONTROLS {
                ui.horizontal(|ui| {
                    let color = if hint.mouse {
                        theme::MOUSE_KEY
                    } else {
                        theme::KEYBOARD_KEY
                    };
                    key_badge(ui, hint.badge, color);
                    ui.label(egui::RichText::new(hint.text).size(12.0));
                });
            }
        });
}

/// Shown only while the readout is enabled.
pub fn debug_readout_ui(mut contexts: EguiContexts, overlay: Res<DebugOverlay>) {
    let Some(readout) = &overlay.readout else {
        return;
    };
    egui::Window::new("navigator_debug")
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 20.0))
        .show(contexts.ctx_mut(), |ui| {
            ui.label(egui::RichText::new(readout).monospace().size(12.0));
        });
}

fn key_badge(ui: &mut egui::Ui, key: &str, color: egui::Color32) {
    egui::Frame::NONE
        .fill(color)
        .corner_radius(egui::CornerRadius::same(4))
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(key)
                    .size(10.0)
                    .strong()
                    .color(egui::Color32::WHITE),
            );
        });
}
