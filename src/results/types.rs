//! Latest simulation outcome.

use bevy::prelude::*;

use crate::api::model::{MultiImpactResult, SimulationResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimulationKind {
    Single,
    Multi,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ResultsPhase {
    /// No simulation has run yet.
    #[default]
    Idle,
    Pending(SimulationKind),
    Single(SimulationResult),
    Multi(MultiImpactResult),
    Error(String),
}

/// Each response replaces the previous outcome wholesale.
#[derive(Resource, Debug, Default)]
pub struct ResultsState {
    pub phase: ResultsPhase,
}

impl ResultsState {
    /// Energy (MT) and crater (km) of the latest result, for historical comparison.
    pub fn comparison_input(&self) -> Option<(f64, Option<f64>)> {
        match &self.phase {
            ResultsPhase::Single(result) => {
                Some((result.impact_energy_mt, Some(result.crater_diameter_km)))
            }
            ResultsPhase::Multi(result) => Some((
                result.combined_effects.total_energy_mt,
                Some(result.combined_effects.max_crater_km),
            )),
            _ => None,
        }
    }
}
