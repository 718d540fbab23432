//! The panels around the campus navigator: landing card, building details,
//! controls and debug readout.

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use rendering::{NavigatorSet, NavigatorState};

pub mod building_panel;
pub mod landing;
pub mod navigator_cards;
pub mod pointer_capture;
pub mod theme;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Startup, theme::apply_navigator_theme)
            .add_systems(
                Update,
                pointer_capture::update_pointer_capture.before(NavigatorSet::Input),
            )
            .add_systems(
                Update,
                landing::landing_ui.run_if(in_state(NavigatorState::Unmounted)),
            )
            .add_systems(
                Update,
                (
                    navigator_cards::header_card_ui,
                    navigator_cards::controls_card_ui,
                    navigator_cards::debug_readout_ui,
                    building_panel::building_panel_ui,
                )
                    .chain()
                    .after(NavigatorSet::Debug)
                    .run_if(in_state(NavigatorState::Mounted)),
            );
    }
}
