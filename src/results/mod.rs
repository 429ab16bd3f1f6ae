//! Single and multi-asteroid simulation results.

use bevy::prelude::*;

pub mod format;
pub mod systems;
pub mod types;

pub use types::ResultsState;

pub struct ResultsPlugin;

impl Plugin for ResultsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ResultsState>()
            .add_systems(Update, systems::request_simulations);
    }
}
