//! Historical impact reference data and comparisons.

use bevy::prelude::*;

pub mod systems;
pub mod types;

pub use types::HistoricalState;

pub struct HistoricalPlugin;

impl Plugin for HistoricalPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HistoricalState>().add_systems(
            Update,
            (
                systems::request_historical_impacts,
                systems::handle_historical_keys,
            ),
        );
    }
}
