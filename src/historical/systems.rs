use bevy::prelude::*;

use crate::api::types::{ApiChannels, ApiCommand};
use crate::historical::types::HistoricalState;
use crate::results::types::ResultsState;

pub fn request_historical_impacts(
    mut state: ResMut<HistoricalState>,
    channels: Option<Res<ApiChannels>>,
) {
    let Some(channels) = channels else { return };
    if state.requested {
        return;
    }

    state.requested = true;
    if channels.send(ApiCommand::FetchHistoricalImpacts) {
        state.is_loading = true;
        state.impacts_error = None;
    } else {
        state.impacts_error = Some("Failed to queue historical impacts fetch".to_string());
    }
}

/// Queue a comparison of `energy_mt` against the reference impacts.
pub fn queue_comparison(
    state: &mut HistoricalState,
    channels: &ApiChannels,
    energy_mt: f64,
    crater_km: Option<f64>,
) {
    if channels.send(ApiCommand::Compare {
        energy_mt,
        crater_km,
    }) {
        state.comparing = true;
        state.comparison_error = None;
    } else {
        state.comparison_error = Some("Failed to queue comparison".to_string());
    }
}

/// `H` shows or hides the panel, `C` compares the latest result, `G` refetches
/// the reference impacts.
pub fn handle_historical_keys(
    keys: Res<ButtonInput<KeyCode>>,
    results: Res<ResultsState>,
    mut state: ResMut<HistoricalState>,
    channels: Option<Res<ApiChannels>>,
) {
    if keys.just_pressed(KeyCode::KeyH) {
        state.visible = !state.visible;
    }
    if keys.just_pressed(KeyCode::KeyG) && !state.is_loading {
        info!("[SCENARIO] refetching historical impacts");
        state.requested = false;
    }

    if !keys.just_pressed(KeyCode::KeyC) {
        return;
    }
    let Some(channels) = channels else { return };
    match results.comparison_input() {
        Some((energy_mt, crater_km)) => {
            info!("[SCENARIO] comparing {:.1} MT with historical impacts", energy_mt);
            queue_comparison(&mut state, &channels, energy_mt, crater_km);
        }
        None => info!("[SCENARIO] run a simulation before comparing"),
    }
}
