//! Close-approach dashboard state: status machine, sort order, summaries.

use bevy::prelude::*;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

use crate::api::model::CloseApproach;
use crate::dashboard::poller::DashboardUpdate;

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Lunar distances under which an approach counts as "close".
pub const CLOSE_LUNAR_DISTANCE: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Date,
    Distance,
    Size,
    Velocity,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::Date,
        SortField::Distance,
        SortField::Size,
        SortField::Velocity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SortField::Date => "Date",
            SortField::Distance => "Distance",
            SortField::Size => "Size",
            SortField::Velocity => "Velocity",
        }
    }

    fn compare(&self, a: &CloseApproach, b: &CloseApproach) -> Ordering {
        match self {
            SortField::Date => a
                .epoch_date_close_approach
                .cmp(&b.epoch_date_close_approach),
            SortField::Distance => a.miss_distance_km.total_cmp(&b.miss_distance_km),
            SortField::Size => a.avg_diameter_m.total_cmp(&b.avg_diameter_m),
            SortField::Velocity => a.velocity_km_s.total_cmp(&b.velocity_km_s),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: SortField,
    pub descending: bool,
}

impl SortState {
    /// Same field flips direction; a new field starts ascending.
    pub fn select(&mut self, field: SortField) {
        if self.field == field {
            self.descending = !self.descending;
        } else {
            self.field = field;
            self.descending = false;
        }
    }

    /// Stable sort, so equal keys keep their fetched order.
    pub fn apply<'a>(&self, approaches: &'a [CloseApproach]) -> Vec<&'a CloseApproach> {
        let mut sorted: Vec<&CloseApproach> = approaches.iter().collect();
        sorted.sort_by(|a, b| {
            let ord = self.field.compare(a, b);
            if self.descending { ord.reverse() } else { ord }
        });
        sorted
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum DashboardStatus {
    #[default]
    Loading,
    Ready,
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ApproachSummary {
    pub total: usize,
    pub hazardous: usize,
    pub high_risk: usize,
    pub within_ten_lunar: usize,
}

impl ApproachSummary {
    pub fn from_approaches(approaches: &[CloseApproach]) -> Self {
        Self {
            total: approaches.len(),
            hazardous: approaches
                .iter()
                .filter(|a| a.is_potentially_hazardous)
                .count(),
            high_risk: approaches
                .iter()
                .filter(|a| a.risk_level.is_elevated())
                .count(),
            within_ten_lunar: approaches
                .iter()
                .filter(|a| a.miss_distance_lunar < CLOSE_LUNAR_DISTANCE)
                .count(),
        }
    }
}

/// Dashboard view state. The fetched list is only ever replaced whole.
#[derive(Resource, Debug, Default)]
pub struct CloseApproachDashboard {
    pub status: DashboardStatus,
    approaches: Vec<CloseApproach>,
    pub sort: SortState,
    pub last_update: Option<DateTime<Utc>>,
}

impl CloseApproachDashboard {
    pub fn apply(&mut self, update: DashboardUpdate) {
        match update {
            DashboardUpdate::Refreshing => self.status = DashboardStatus::Loading,
            DashboardUpdate::Loaded(approaches) => {
                self.approaches = approaches;
                self.status = DashboardStatus::Ready;
                self.last_update = Some(Utc::now());
            }
            DashboardUpdate::Failed(message) => self.status = DashboardStatus::Error(message),
        }
    }

    /// Back to the initial state, used when the view is torn down.
    pub fn reset(&mut self) {
        let sort = self.sort;
        *self = Self {
            sort,
            ..Default::default()
        };
    }

    pub fn approaches(&self) -> &[CloseApproach] {
        &self.approaches
    }

    /// Rows for the table, or `None` when the table must not be drawn.
    pub fn visible_rows(&self) -> Option<Vec<&CloseApproach>> {
        match self.status {
            DashboardStatus::Ready => Some(self.sort.apply(&self.approaches)),
            _ => None,
        }
    }

    pub fn summary(&self) -> ApproachSummary {
        ApproachSummary::from_approaches(self.approaches())
    }
}

/// Time left until `epoch_ms`, as shown in the countdown column.
pub fn format_countdown(epoch_ms: i64, now_ms: i64) -> String {
    let diff = epoch_ms.saturating_sub(now_ms);
    if diff < 0 {
        return "Passed".to_string();
    }
    let days = diff / DAY_MS;
    let hours = (diff % DAY_MS) / HOUR_MS;
    let minutes = (diff % HOUR_MS) / MINUTE_MS;
    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}
