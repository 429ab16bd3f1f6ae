//! Multi-asteroid impact scenario: catalog, bounded entry list, editing.

use bevy::prelude::*;

pub mod builder;
pub mod palette;
pub mod systems;
pub mod types;

pub use types::{AsteroidCatalog, ScenarioState};

/// Plugin for scenario assembly.
pub struct ScenarioPlugin;

impl Plugin for ScenarioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AsteroidCatalog>()
            .init_resource::<ScenarioState>()
            .add_systems(
                Update,
                (
                    systems::request_asteroid_catalog,
                    systems::browse_candidates,
                    systems::edit_entries,
                )
                    .chain(),
            );
    }
}
