//! Keeps world input from reaching the scene through egui panels.
//!
//! Each frame, before the navigator reads input, egui's interest in the
//! pointer and keyboard is copied into [`UiPointerCapture`].

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use rendering::input::UiPointerCapture;

pub fn update_pointer_capture(mut contexts: EguiContexts, mut capture: ResMut<UiPointerCapture>) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };
    let next = UiPointerCapture {
        wants_pointer: ctx.wants_pointer_input() || ctx.is_pointer_over_area(),
        wants_keyboard: ctx.wants_keyboard_input(),
    };
    if *capture != next {
        *capture = next;
    }
}
