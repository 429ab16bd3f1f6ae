use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod api;
mod config;
mod dashboard;
mod historical;
mod results;
mod scenario;
mod ui;

use api::ApiPlugin;
use config::AppConfig;
use dashboard::DashboardPlugin;
use historical::HistoricalPlugin;
use results::ResultsPlugin;
use scenario::ScenarioPlugin;
use ui::UiPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Impact Scenario Dashboard".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    // Loaded after the log plugin so config warnings are visible.
    let config = AppConfig::load();
    info!("[CONFIG] API at {}", config.api_base_url);
    app.insert_resource(config);

    app.add_plugins(ApiPlugin);
    app.add_plugins(ScenarioPlugin);
    app.add_plugins(ResultsPlugin);
    app.add_plugins(HistoricalPlugin);
    app.add_plugins(DashboardPlugin);
    app.add_plugins(UiPlugin);

    app.run();
}
