//! Scenario data and the resources that own it.

use bevy::prelude::*;

use crate::api::model::{Asteroid, AsteroidDetails, MultiAsteroidParams, SimulationParams};

/// One asteroid placed in the impact scenario.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioEntry {
    pub asteroid: Asteroid,
    pub impact_lat: f64,
    pub impact_lon: f64,
    /// km/s, 0..=50
    pub mitigation_delta_v: f64,
}

impl ScenarioEntry {
    pub fn multi_params(&self) -> MultiAsteroidParams {
        MultiAsteroidParams {
            asteroid_id: self.asteroid.id.clone(),
            name: self.asteroid.name.clone(),
            diameter: self.asteroid.diameter,
            velocity: self.asteroid.velocity,
            impact_lat: self.impact_lat,
            impact_lon: self.impact_lon,
            mitigation_delta_v: self.mitigation_delta_v,
        }
    }

    pub fn simulation_params(&self) -> SimulationParams {
        SimulationParams {
            asteroid_id: self.asteroid.id.clone(),
            impact_lat: self.impact_lat,
            impact_lon: self.impact_lon,
            mitigation_delta_v: self.mitigation_delta_v,
        }
    }
}

/// Fields of an entry that can be edited; `None` leaves the field alone.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EntryPatch {
    pub impact_lat: Option<f64>,
    pub impact_lon: Option<f64>,
    pub mitigation_delta_v: Option<f64>,
}

/// Asteroids available from the service.
#[derive(Resource, Debug, Default)]
pub struct AsteroidCatalog {
    pub asteroids: Vec<Asteroid>,
    pub requested: bool,
    pub is_loading: bool,
    pub error: Option<String>,
    pub details: Option<(String, AsteroidDetails)>,
    pub details_error: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElevationReading {
    pub lat: f64,
    pub lng: f64,
    pub meters: f64,
}

/// Owner of the authoritative entry list.
#[derive(Resource, Debug, Default)]
pub struct ScenarioState {
    pub entries: Vec<ScenarioEntry>,
    pub selected: Option<usize>,
    /// Index into the available-candidate list.
    pub candidate_cursor: usize,
    pub elevation: Option<ElevationReading>,
    pub elevation_error: Option<String>,
}

impl ScenarioState {
    /// Take a list emitted by the builder and keep the selection in range.
    pub fn replace_entries(&mut self, entries: Vec<ScenarioEntry>) {
        self.entries = entries;
        self.selected = match self.selected {
            _ if self.entries.is_empty() => None,
            Some(i) => Some(i.min(self.entries.len() - 1)),
            None => None,
        };
    }

    pub fn selected_entry(&self) -> Option<&ScenarioEntry> {
        self.selected.and_then(|i| self.entries.get(i))
    }
}
