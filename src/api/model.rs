//! Records exchanged with the impact service.

use serde::{Deserialize, Serialize};

use crate::api::coerce::{lenient_f64, lenient_string, null_default};

/// Candidate asteroid from the hazard list. Numeric fields are coerced on decode.
#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct Asteroid {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// km
    #[serde(default, deserialize_with = "lenient_f64")]
    pub diameter: f64,
    /// km/s
    #[serde(default, deserialize_with = "lenient_f64")]
    pub velocity: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub impact_probability: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub palermo_scale: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Default, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis, meters.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub a: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub e: f64,
    /// Angles in radians.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub i: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub omega: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub w: f64,
    #[serde(rename = "M", default, deserialize_with = "lenient_f64")]
    pub mean_anomaly: f64,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct AsteroidDetails {
    pub orbital_elements: OrbitalElements,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    pub asteroid_id: String,
    pub impact_lat: f64,
    pub impact_lon: f64,
    pub mitigation_delta_v: f64,
}

pub type TrajectoryPoint = [f64; 3];

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct SimulationResult {
    pub impact_energy_mt: f64,
    pub crater_diameter_km: f64,
    #[serde(default)]
    pub tsunami_risk: bool,
    #[serde(default)]
    pub seismic_magnitude: f64,
    #[serde(default)]
    pub fireball_radius_km: f64,
    #[serde(default)]
    pub target_type: String,
    #[serde(default)]
    pub original_trajectory: Vec<TrajectoryPoint>,
    #[serde(default)]
    pub deflected_trajectory: Vec<TrajectoryPoint>,
    #[serde(default)]
    pub miss_distance_km: f64,
    #[serde(default)]
    pub asteroid_name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Moderate,
    High,
    Extreme,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
            RiskLevel::Extreme => "EXTREME",
        }
    }

    pub fn is_elevated(&self) -> bool {
        matches!(self, RiskLevel::High | RiskLevel::Extreme)
    }
}

/// Upcoming near-Earth close approach, taken from the service as-is.
#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CloseApproach {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    pub close_approach_date: Option<String>,
    /// Unix epoch, milliseconds.
    #[serde(deserialize_with = "null_default")]
    pub epoch_date_close_approach: i64,
    #[serde(deserialize_with = "lenient_f64")]
    pub miss_distance_km: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub miss_distance_lunar: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub velocity_km_s: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub diameter_min_m: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub diameter_max_m: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub avg_diameter_m: f64,
    #[serde(deserialize_with = "null_default")]
    pub is_potentially_hazardous: bool,
    #[serde(deserialize_with = "null_default")]
    pub risk_level: RiskLevel,
    #[serde(deserialize_with = "lenient_string")]
    pub nasa_jpl_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiAsteroidParams {
    pub asteroid_id: String,
    pub name: String,
    pub diameter: f64,
    pub velocity: f64,
    pub impact_lat: f64,
    pub impact_lon: f64,
    pub mitigation_delta_v: f64,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct IndividualResult {
    pub asteroid_id: String,
    #[serde(default)]
    pub asteroid_name: String,
    pub impact_lat: f64,
    pub impact_lon: f64,
    pub impact_energy_mt: f64,
    pub crater_diameter_km: f64,
    #[serde(default)]
    pub tsunami_risk: bool,
    #[serde(default)]
    pub seismic_magnitude: f64,
    #[serde(default)]
    pub fireball_radius_km: f64,
    #[serde(default)]
    pub target_type: String,
    #[serde(default)]
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct TrajectorySet {
    pub asteroid_id: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub original_trajectory: Vec<TrajectoryPoint>,
    #[serde(default)]
    pub deflected_trajectory: Vec<TrajectoryPoint>,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CombinedEffects {
    pub total_energy_mt: f64,
    pub max_crater_km: f64,
    pub total_crater_area_km2: f64,
    pub combined_seismic: f64,
    pub max_fireball_km: f64,
    pub tsunami_risk: bool,
    pub impact_count: usize,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct MultiImpactResult {
    pub individual_results: Vec<IndividualResult>,
    #[serde(default)]
    pub trajectories: Vec<TrajectorySet>,
    pub combined_effects: CombinedEffects,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct HistoricalImpact {
    pub id: String,
    pub name: String,
    pub location: String,
    pub age_years: u64,
    pub age_display: String,
    pub crater_diameter_km: f64,
    pub energy_mt: f64,
    pub energy_display: String,
    pub asteroid_diameter_km: f64,
    pub description: String,
    pub effects: String,
    pub emoji: String,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct HistoricalComparison {
    pub closest_impact: HistoricalImpact,
    pub energy_ratio: f64,
    pub comparison_text: String,
    pub hiroshima_equivalent: f64,
    pub hiroshima_text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonRequest {
    pub energy_mt: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crater_km: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}
