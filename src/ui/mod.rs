//! User interface module
//!
//! Text panels built with `bevy_ui`. Panel contents come from the pure
//! renderers in [`render`]; the systems here only decide when to redraw.

use bevy::prelude::*;

pub mod layout;
pub mod render;
pub mod systems;

pub use systems::CountdownTick;

/// Plugin for user interface management
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CountdownTick>()
            .add_systems(Startup, layout::setup_ui)
            .add_systems(
                PostUpdate,
                (
                    systems::refresh_scenario_panel,
                    systems::refresh_results_panel,
                    systems::refresh_historical_panel,
                    systems::refresh_dashboard_panel,
                    systems::refresh_status_bar,
                    systems::sync_panel_visibility,
                ),
            );
    }
}
