//! Impact service access: HTTP client, background worker, result routing.

use bevy::prelude::*;

pub mod client;
pub mod coerce;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod systems;
pub mod types;

pub use types::ServiceStatus;

/// Plugin for the impact service connection.
pub struct ApiPlugin;

impl Plugin for ApiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ServiceStatus>()
            .add_systems(Startup, systems::setup_api_worker)
            .add_systems(
                Update,
                (systems::request_health, systems::apply_api_results).chain(),
            );
    }
}
