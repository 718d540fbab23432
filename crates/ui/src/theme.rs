use bevy_egui::{egui, EguiContexts};

/// Panel fill, `rgba(10, 25, 41, 0.9)`.
pub const PANEL_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(9, 23, 37, 230);
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x88, 0xc0, 0xff);
pub const MOUSE_KEY: egui::Color32 = egui::Color32::from_rgb(0x4a, 0x90, 0xe2);
pub const KEYBOARD_KEY: egui::Color32 = egui::Color32::from_rgb(0xe2, 0x4a, 0x4a);
pub const IN_SESSION: egui::Color32 = egui::Color32::from_rgb(0x4c, 0xaf, 0x50);
pub const UPCOMING: egui::Color32 = egui::Color32::from_rgb(0xff, 0x98, 0x00);
pub const IDLE: egui::Color32 = egui::Color32::from_rgb(0x75, 0x75, 0x75);
pub const MUTED: egui::Color32 = egui::Color32::from_rgb(0xaa, 0xaa, 0xaa);

pub fn apply_navigator_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    // Campus navy
    let inactive = egui::Color32::from_rgb(22, 45, 68);
    let hover = egui::Color32::from_rgb(40, 75, 110);
    let active = MOUSE_KEY;

    style.visuals.widgets.noninteractive.bg_fill = PANEL_FILL;
    style.visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, egui::Color32::WHITE);
    style.visuals.widgets.inactive.bg_fill = inactive;
    style.visuals.widgets.hovered.bg_fill = hover;
    style.visuals.widgets.active.bg_fill = active;
    style.visuals.widgets.inactive.weak_bg_fill = inactive;
    style.visuals.widgets.hovered.weak_bg_fill = hover;
    style.visuals.widgets.active.weak_bg_fill = active;

    style.visuals.window_fill = PANEL_FILL;
    style.visuals.panel_fill = egui::Color32::from_rgb(10, 25, 41);
    style.visuals.window_stroke = egui::Stroke::NONE;
    style.visuals.extreme_bg_color = egui::Color32::from_rgb(6, 16, 27);

    style.visuals.selection.bg_fill = active;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT);

    let window_rounding = egui::CornerRadius::same(10);
    let widget_rounding = egui::CornerRadius::same(4);

    style.visuals.window_corner_radius = window_rounding;
    style.visuals.widgets.noninteractive.corner_radius = widget_rounding;
    style.visuals.widgets.inactive.corner_radius = widget_rounding;
    style.visuals.widgets.hovered.corner_radius = widget_rounding;
    style.visuals.widgets.active.corner_radius = widget_rounding;

    ctx.set_style(style);
}
