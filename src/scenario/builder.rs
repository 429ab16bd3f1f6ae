//! Bounded, deduplicated scenario list transformations.
//!
//! The builder never owns the list. Each operation takes the current entries
//! and returns the list the owner should adopt, or `None` when the operation
//! is a no-op and nothing should be emitted.

use crate::api::model::Asteroid;
use crate::scenario::types::{EntryPatch, ScenarioEntry};

/// First entry lands on Los Angeles; later entries are spread out from it.
pub const DEFAULT_IMPACT_LAT: f64 = 34.05;
pub const DEFAULT_IMPACT_LON: f64 = -118.24;
pub const LAT_STEP_DEG: f64 = 15.0;
pub const LON_STEP_DEG: f64 = 20.0;

pub const MAX_MITIGATION_DELTA_V: f64 = 50.0;
pub const DEFAULT_MAX_ASTEROIDS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScenarioBuilder {
    pub max_asteroids: usize,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self {
            max_asteroids: DEFAULT_MAX_ASTEROIDS,
        }
    }
}

impl ScenarioBuilder {
    pub fn new(max_asteroids: usize) -> Self {
        Self { max_asteroids }
    }

    pub fn is_full(&self, entries: &[ScenarioEntry]) -> bool {
        entries.len() >= self.max_asteroids
    }

    pub fn add_asteroid(
        &self,
        entries: &[ScenarioEntry],
        candidate: &Asteroid,
    ) -> Option<Vec<ScenarioEntry>> {
        if self.is_full(entries) || contains(entries, &candidate.id) {
            return None;
        }
        let (impact_lat, impact_lon) = default_location(entries.len());
        let mut next = entries.to_vec();
        next.push(ScenarioEntry {
            asteroid: candidate.clone(),
            impact_lat,
            impact_lon,
            mitigation_delta_v: 0.0,
        });
        Some(next)
    }

    pub fn remove_asteroid(
        &self,
        entries: &[ScenarioEntry],
        index: usize,
    ) -> Option<Vec<ScenarioEntry>> {
        if index >= entries.len() {
            return None;
        }
        Some(
            entries
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, entry)| entry.clone())
                .collect(),
        )
    }

    /// Overwrite only the patched fields of the entry at `index`.
    pub fn update_entry(
        &self,
        entries: &[ScenarioEntry],
        index: usize,
        patch: EntryPatch,
    ) -> Option<Vec<ScenarioEntry>> {
        if index >= entries.len() {
            return None;
        }
        let mut next = entries.to_vec();
        let target = &mut next[index];
        if let Some(lat) = patch.impact_lat {
            target.impact_lat = lat.clamp(-90.0, 90.0);
        }
        if let Some(lon) = patch.impact_lon {
            target.impact_lon = wrap_longitude(lon);
        }
        if let Some(dv) = patch.mitigation_delta_v {
            target.mitigation_delta_v = dv.clamp(0.0, MAX_MITIGATION_DELTA_V);
        }
        Some(next)
    }
}

/// Fetched asteroids not yet in the scenario, in catalog order.
pub fn available_candidates<'a>(
    catalog: &'a [Asteroid],
    entries: &[ScenarioEntry],
) -> Vec<&'a Asteroid> {
    catalog
        .iter()
        .filter(|asteroid| !contains(entries, &asteroid.id))
        .collect()
}

/// Impact site for the entry that will sit at `position`.
pub fn default_location(position: usize) -> (f64, f64) {
    let lat = DEFAULT_IMPACT_LAT + LAT_STEP_DEG * position as f64;
    let lon = DEFAULT_IMPACT_LON + LON_STEP_DEG * position as f64;
    (lat.clamp(-90.0, 90.0), wrap_longitude(lon))
}

fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

fn contains(entries: &[ScenarioEntry], id: &str) -> bool {
    entries.iter().any(|entry| entry.asteroid.id == id)
}
