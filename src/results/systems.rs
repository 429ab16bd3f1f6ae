//! Simulation requests from the keyboard.

use bevy::prelude::*;

use crate::api::model::MultiAsteroidParams;
use crate::api::types::{ApiChannels, ApiCommand};
use crate::results::types::{ResultsPhase, ResultsState, SimulationKind};
use crate::scenario::types::ScenarioState;

/// `S` simulates the selected entry, `Enter` the whole scenario.
pub fn request_simulations(
    keys: Res<ButtonInput<KeyCode>>,
    scenario: Res<ScenarioState>,
    mut results: ResMut<ResultsState>,
    channels: Option<Res<ApiChannels>>,
) {
    let Some(channels) = channels else { return };

    if keys.just_pressed(KeyCode::KeyS)
        && let Some(entry) = scenario.selected_entry()
    {
        info!("[SCENARIO] simulating {}", entry.asteroid.name);
        let phase = if channels.send(ApiCommand::Simulate(entry.simulation_params())) {
            ResultsPhase::Pending(SimulationKind::Single)
        } else {
            ResultsPhase::Error("Failed to queue simulation".to_string())
        };
        results.phase = phase;
    }

    if keys.any_just_pressed([KeyCode::Enter, KeyCode::NumpadEnter]) {
        if scenario.entries.is_empty() {
            info!("[SCENARIO] nothing to simulate");
            return;
        }
        let params: Vec<MultiAsteroidParams> =
            scenario.entries.iter().map(|e| e.multi_params()).collect();
        info!("[SCENARIO] simulating {} asteroids", params.len());
        let phase = if channels.send(ApiCommand::SimulateMulti(params)) {
            ResultsPhase::Pending(SimulationKind::Multi)
        } else {
            ResultsPhase::Error("Failed to queue simulation".to_string())
        };
        results.phase = phase;
    }
}
