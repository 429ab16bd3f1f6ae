//! Keyboard-driven scenario editing.

use bevy::prelude::*;

use crate::api::types::{ApiChannels, ApiCommand};
use crate::config::{ASTEROID_LIMIT, AppConfig};
use crate::scenario::builder::{ScenarioBuilder, available_candidates};
use crate::scenario::types::{AsteroidCatalog, EntryPatch, ScenarioState};

/// Degrees moved per key press.
const LOCATION_STEP_DEG: f64 = 5.0;
/// km/s per key press.
const MITIGATION_STEP: f64 = 1.0;

const ENTRY_KEYS: [KeyCode; ASTEROID_LIMIT] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
];

pub fn request_asteroid_catalog(
    mut catalog: ResMut<AsteroidCatalog>,
    channels: Option<Res<ApiChannels>>,
) {
    let Some(channels) = channels else { return };
    if catalog.requested {
        return;
    }

    catalog.requested = true;
    if channels.send(ApiCommand::FetchAsteroids) {
        catalog.is_loading = true;
        catalog.error = None;
    } else {
        catalog.is_loading = false;
        catalog.error = Some("Failed to queue asteroid fetch".to_string());
    }
}

/// Candidate list navigation, adding, details lookup and catalog refresh.
pub fn browse_candidates(
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<AppConfig>,
    mut catalog: ResMut<AsteroidCatalog>,
    mut scenario: ResMut<ScenarioState>,
    channels: Option<Res<ApiChannels>>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        info!("[SCENARIO] refetching asteroid catalog");
        catalog.requested = false;
        catalog.details = None;
        catalog.details_error = None;
    }

    let available = available_candidates(&catalog.asteroids, &scenario.entries);
    if available.is_empty() {
        if scenario.candidate_cursor != 0 {
            scenario.candidate_cursor = 0;
        }
        return;
    }

    let count = available.len();
    let mut cursor = scenario.candidate_cursor.min(count - 1);
    if keys.just_pressed(KeyCode::ArrowDown) {
        cursor = (cursor + 1) % count;
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        cursor = (cursor + count - 1) % count;
    }
    let highlighted = available[cursor].clone();
    if scenario.candidate_cursor != cursor {
        scenario.candidate_cursor = cursor;
    }

    if keys.just_pressed(KeyCode::KeyI)
        && let Some(channels) = channels.as_ref()
    {
        catalog.details = None;
        catalog.details_error = None;
        if !channels.send(ApiCommand::FetchAsteroidDetails {
            id: highlighted.id.clone(),
        }) {
            catalog.details_error = Some("Failed to queue asteroid details fetch".to_string());
        }
    }

    if keys.just_pressed(KeyCode::KeyA) {
        let builder = ScenarioBuilder::new(config.max_asteroids);
        match builder.add_asteroid(&scenario.entries, &highlighted) {
            Some(next) => {
                info!("[SCENARIO] added {} ({})", highlighted.name, highlighted.id);
                let last = next.len() - 1;
                scenario.replace_entries(next);
                scenario.selected = Some(last);
            }
            None if builder.is_full(&scenario.entries) => {
                info!(
                    "[SCENARIO] scenario already holds {} asteroids",
                    config.max_asteroids
                );
            }
            None => {}
        }
    }
}

/// Selection, removal, impact-site and mitigation edits on the selected entry.
pub fn edit_entries(
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<AppConfig>,
    mut scenario: ResMut<ScenarioState>,
    channels: Option<Res<ApiChannels>>,
) {
    for (index, key) in ENTRY_KEYS.iter().enumerate() {
        if keys.just_pressed(*key) && index < scenario.entries.len() {
            scenario.selected = Some(index);
        }
    }

    let Some(index) = scenario.selected else { return };
    let Some(entry) = scenario.entries.get(index).cloned() else {
        return;
    };
    let builder = ScenarioBuilder::new(config.max_asteroids);

    if keys.any_just_pressed([KeyCode::Delete, KeyCode::Backspace]) {
        if let Some(next) = builder.remove_asteroid(&scenario.entries, index) {
            info!("[SCENARIO] removed {}", entry.asteroid.name);
            scenario.replace_entries(next);
            scenario.elevation = None;
            scenario.elevation_error = None;
        }
        return;
    }

    let patch = edit_patch(&keys, entry.impact_lat, entry.impact_lon, entry.mitigation_delta_v);
    if patch != EntryPatch::default()
        && let Some(next) = builder.update_entry(&scenario.entries, index, patch)
    {
        scenario.replace_entries(next);
    }

    if keys.just_pressed(KeyCode::KeyE)
        && let Some(channels) = channels.as_ref()
        && let Some(entry) = scenario.selected_entry()
    {
        channels.send(ApiCommand::FetchElevation {
            lat: entry.impact_lat,
            lng: entry.impact_lon,
        });
    }
}

fn edit_patch(keys: &ButtonInput<KeyCode>, lat: f64, lon: f64, delta_v: f64) -> EntryPatch {
    let mut patch = EntryPatch::default();
    if keys.just_pressed(KeyCode::ArrowLeft) {
        patch.impact_lon = Some(lon - LOCATION_STEP_DEG);
    }
    if keys.just_pressed(KeyCode::ArrowRight) {
        patch.impact_lon = Some(lon + LOCATION_STEP_DEG);
    }
    if keys.just_pressed(KeyCode::PageUp) {
        patch.impact_lat = Some(lat + LOCATION_STEP_DEG);
    }
    if keys.just_pressed(KeyCode::PageDown) {
        patch.impact_lat = Some(lat - LOCATION_STEP_DEG);
    }
    if keys.just_pressed(KeyCode::Minus) {
        patch.mitigation_delta_v = Some(delta_v - MITIGATION_STEP);
    }
    if keys.just_pressed(KeyCode::Equal) {
        patch.mitigation_delta_v = Some(delta_v + MITIGATION_STEP);
    }
    patch
}
