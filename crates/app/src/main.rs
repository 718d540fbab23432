use std::path::PathBuf;
use std::process::ExitCode;

use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};
use clap::Parser;

use campus::config::STATUS_URL_ENV;
use campus::{CampusData, NavigatorSettings};
use rendering::NavigatorState;

#[derive(Parser, Debug)]
#[command(name = "campus-navigator")]
#[command(about = "Orbit a 3D campus and see which classes are in session")]
#[command(long_about = None)]
struct Cli {
    /// Campus JSON file to load instead of the built-in campus
    #[arg(long, value_name = "PATH")]
    campus: Option<PathBuf>,

    /// Base URL of the live status service; hover status is fetched from
    /// `{base}/api/status/{building}` instead of the timetable
    #[arg(long, value_name = "URL", env = STATUS_URL_ENV)]
    status_url: Option<String>,

    /// Start with the camera readout shown
    #[arg(long)]
    debug: bool,

    /// Open the navigator immediately instead of the landing card
    #[arg(long)]
    autostart: bool,
}

impl Cli {
    fn campus_data(&self) -> Result<CampusData, String> {
        match &self.campus {
            Some(path) => CampusData::load(path)
                .map_err(|err| format!("failed to load campus {}: {err}", path.display())),
            None => CampusData::builtin().map_err(|err| format!("built-in campus is invalid: {err}")),
        }
    }

    fn settings(&self) -> Result<NavigatorSettings, String> {
        let settings = NavigatorSettings {
            show_debug: self.debug,
            ..default()
        };
        match &self.status_url {
            Some(base) => settings
                .with_remote_status(base)
                .map_err(|err| format!("invalid status URL {base:?}: {err}")),
            None => Ok(settings),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (data, settings) = match cli.campus_data().and_then(|d| Ok((d, cli.settings()?))) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("campus-navigator: {message}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Virtual Campus Navigator".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    .insert_resource(data)
    .insert_resource(settings);

    // Must precede NavigatorPlugin, which only initializes a missing state.
    if cli.autostart {
        app.insert_state(NavigatorState::Mounted);
    }

    app.add_plugins((rendering::NavigatorPlugin, ui::UiPlugin));

    match app.run() {
        AppExit::Success => ExitCode::SUCCESS,
        AppExit::Error(code) => ExitCode::from(code.get()),
    }
}
