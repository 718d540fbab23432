//! "Building Details" sidebar: renders the navigator's hover payload.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use campus::OccupancyStatus;
use rendering::hover::{HoverPayload, HoveredBuilding, Occupancy};

use crate::theme;

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// What the schedule section of the panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleView {
    /// Waiting for the status service.
    Loading,
    InSession {
        subject: String,
        lecturer: String,
        /// Progress bar fill, `0..=1`. Remote status has none.
        progress: Option<f32>,
        window: Option<String>,
    },
    Upcoming {
        subject: String,
        lecturer: String,
        countdown: String,
        window: Option<String>,
    },
    Idle {
        message: String,
    },
}

impl ScheduleView {
    pub fn from_occupancy(occupancy: &Occupancy) -> Self {
        match occupancy {
            Occupancy::Pending => Self::Loading,
            Occupancy::Ready(status) => Self::from_status(status),
        }
    }

    fn from_status(status: &OccupancyStatus) -> Self {
        let window = status.window.map(|w| w.label());
        if status.is_occupied {
            return Self::InSession {
                subject: status.subject.clone(),
                lecturer: status.lecturer.clone(),
                progress: status
                    .progress_percent
                    .map(|p| (p / 100.0).clamp(0.0, 1.0)),
                window,
            };
        }
        match status.countdown() {
            Some(countdown) => Self::Upcoming {
                subject: status.subject.clone(),
                lecturer: status.lecturer.clone(),
                countdown,
                window,
            },
            None => Self::Idle {
                message: status.subject.clone(),
            },
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Self::Loading => "Checking status...",
            Self::InSession { .. } => "Class in Session",
            Self::Upcoming { .. } => "Next Class Today",
            Self::Idle { .. } => "No Class Right Now",
        }
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

pub fn building_panel_ui(mut contexts: EguiContexts, hovered: Res<HoveredBuilding>) {
    egui::Window::new("Building Details")
        .collapsible(false)
        .resizable(false)
        .min_width(350.0)
        .max_width(400.0)
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-20.0, 20.0))
        .show(contexts.ctx_mut(), |ui| {
            ui.colored_label(
                theme::ACCENT,
                "Hover over a building to see current class schedule.",
            );
            if let Some(payload) = &hovered.0 {
                ui.add_space(10.0);
                render_payload(ui, payload);
            }
        });
}

// ---------------------------------------------------------------------------
// Rendering helpers
// ---------------------------------------------------------------------------

fn render_payload(ui: &mut egui::Ui, payload: &HoverPayload) {
    ui.heading(&payload.building);
    if !payload.description.is_empty() {
        ui.label(egui::RichText::new(&payload.description).size(12.0));
    }
    ui.separator();

    let view = ScheduleView::from_occupancy(&payload.occupancy);
    match &view {
        ScheduleView::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(view.heading());
            });
        }
        ScheduleView::InSession {
            subject,
            lecturer,
            progress,
            window,
        } => {
            ui.colored_label(theme::IN_SESSION, egui::RichText::new(view.heading()).strong());
            ui.horizontal(|ui| {
                ui.strong(subject);
                badge(ui, "Now", theme::IN_SESSION);
            });
            ui.label(format!("Lecturer: {lecturer}"));
            if let Some(window) = window {
                ui.colored_label(theme::MUTED, window);
            }
            if let Some(progress) = progress {
                ui.add(
                    egui::ProgressBar::new(*progress)
                        .fill(theme::IN_SESSION)
                        .show_percentage(),
                );
            }
        }
        ScheduleView::Upcoming {
            subject,
            lecturer,
            countdown,
            window,
        } => {
            ui.colored_label(theme::UPCOMING, egui::RichText::new(view.heading()).strong());
            ui.horizontal(|ui| {
                ui.strong(subject);
                badge(ui, countdown, theme::UPCOMING);
            });
            ui.label(format!("Lecturer: {lecturer}"));
            if let Some(window) = window {
                ui.colored_label(theme::MUTED, window);
            }
        }
        ScheduleView::Idle { message } => {
            ui.colored_label(theme::IDLE, egui::RichText::new(view.heading()).strong());
            ui.colored_label(theme::MUTED, message);
        }
    }
}

fn badge(ui: &mut egui::Ui, text: &str, color: egui::Color32) {
    egui::Frame::NONE
        .fill(color)
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::symmetric(6, 1))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(text)
                    .size(11.0)
                    .color(egui::Color32::WHITE),
            );
        });
}
