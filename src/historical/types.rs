use bevy::prelude::*;

use crate::api::model::{HistoricalComparison, HistoricalImpact};

/// Reference impacts and the latest comparison against them.
#[derive(Resource, Debug)]
pub struct HistoricalState {
    pub impacts: Vec<HistoricalImpact>,
    pub comparison: Option<HistoricalComparison>,
    pub requested: bool,
    pub is_loading: bool,
    pub comparing: bool,
    pub impacts_error: Option<String>,
    pub comparison_error: Option<String>,
    pub visible: bool,
}

impl Default for HistoricalState {
    fn default() -> Self {
        Self {
            impacts: Vec::new(),
            comparison: None,
            requested: false,
            is_loading: false,
            comparing: false,
            impacts_error: None,
            comparison_error: None,
            visible: true,
        }
    }
}
