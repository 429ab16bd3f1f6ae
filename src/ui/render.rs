//! Panel contents as plain lines, rebuilt from state on every change.

use chrono::{DateTime, Utc};

use crate::api::model::{CloseApproach, IndividualResult, RiskLevel, SimulationResult};
use crate::api::types::{ServiceState, ServiceStatus};
use crate::dashboard::model::{CloseApproachDashboard, DashboardStatus, format_countdown};
use crate::historical::types::HistoricalState;
use crate::results::format::{format_energy, format_km, yes_no};
use crate::results::types::{ResultsPhase, ResultsState, SimulationKind};
use crate::scenario::builder::available_candidates;
use crate::scenario::types::{AsteroidCatalog, ScenarioState};

/// How a line is colored when drawn.
#[derive(Clone, Debug, PartialEq)]
pub enum Tone {
    Normal,
    Dim,
    Heading,
    Warning,
    /// Scenario position, colored from the entry palette.
    Entry(usize),
    /// Server-assigned `#rrggbb`, with the position as fallback.
    Hex(String, usize),
    Risk(RiskLevel),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    pub text: String,
    pub tone: Tone,
}

impl Line {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

fn normal(text: impl Into<String>) -> Line {
    Line::new(text, Tone::Normal)
}

fn dim(text: impl Into<String>) -> Line {
    Line::new(text, Tone::Dim)
}

fn heading(text: impl Into<String>) -> Line {
    Line::new(text, Tone::Heading)
}

fn warning(text: impl Into<String>) -> Line {
    Line::new(text, Tone::Warning)
}

pub fn render_scenario(
    catalog: &AsteroidCatalog,
    scenario: &ScenarioState,
    max_asteroids: usize,
) -> Vec<Line> {
    let mut lines = vec![heading(format!(
        "SCENARIO ({}/{})",
        scenario.entries.len(),
        max_asteroids
    ))];

    if scenario.entries.is_empty() {
        lines.push(dim("No asteroids selected. Press A to add one."));
    }
    for (i, entry) in scenario.entries.iter().enumerate() {
        let marker = if scenario.selected == Some(i) { ">" } else { " " };
        lines.push(Line::new(
            format!(
                "{}[{}] {}  {:.2}°, {:.2}°  Δv {:.1} km/s",
                marker,
                i + 1,
                entry.asteroid.name,
                entry.impact_lat,
                entry.impact_lon,
                entry.mitigation_delta_v
            ),
            Tone::Entry(i),
        ));
    }
    if let Some(reading) = &scenario.elevation {
        lines.push(normal(format!(
            "Elevation at {:.2}°, {:.2}°: {:.0} m",
            reading.lat, reading.lng, reading.meters
        )));
    }
    if let Some(err) = &scenario.elevation_error {
        lines.push(warning(format!("Elevation: {}", err)));
    }

    lines.push(normal(""));
    lines.push(heading("CANDIDATES"));
    if catalog.is_loading {
        lines.push(dim("Loading asteroids..."));
    } else if let Some(err) = &catalog.error {
        lines.push(warning(format!("Error: {}", err)));
    }

    if scenario.entries.len() >= max_asteroids {
        lines.push(dim(format!("Scenario full ({} max)", max_asteroids)));
    }
    let available = available_candidates(&catalog.asteroids, &scenario.entries);
    if available.is_empty() && !catalog.is_loading && catalog.error.is_none() {
        lines.push(dim("No more asteroids available"));
    }
    for (i, asteroid) in available.iter().enumerate() {
        let marker = if i == scenario.candidate_cursor { ">" } else { " " };
        lines.push(normal(format!(
            "{} {}  {:.3} km  {:.1} km/s  P={:.2e}  PS {:.2}",
            marker,
            asteroid.name,
            asteroid.diameter,
            asteroid.velocity,
            asteroid.impact_probability,
            asteroid.palermo_scale
        )));
    }

    if let Some(err) = &catalog.details_error {
        lines.push(warning(format!("Details: {}", err)));
    }
    if let Some((id, details)) = &catalog.details {
        let el = &details.orbital_elements;
        let name = if details.name.is_empty() { id } else { &details.name };
        lines.push(normal(""));
        lines.push(heading(format!("ORBIT {}", name)));
        lines.push(normal(format!(
            "a {:.4e} m  e {:.4}  i {:.4} rad",
            el.a, el.e, el.i
        )));
        lines.push(normal(format!(
            "Ω {:.4}  ω {:.4}  M {:.4} rad",
            el.omega, el.w, el.mean_anomaly
        )));
    }
    lines
}

pub fn render_results(results: &ResultsState) -> Vec<Line> {
    match &results.phase {
        ResultsPhase::Idle => vec![
            heading("RESULTS"),
            dim("No simulation run yet."),
            dim("Press S for the selected asteroid or Enter for the whole scenario."),
        ],
        ResultsPhase::Pending(kind) => {
            let what = match kind {
                SimulationKind::Single => "impact",
                SimulationKind::Multi => "multi-asteroid impact",
            };
            let mut lines = vec![heading("RESULTS"), dim(format!("Simulating {}...", what))];
            lines.extend(
                ["Energy", "Crater", "Seismic", "Tsunami"]
                    .iter()
                    .map(|label| dim(format!("{:<9}░░░░░░░░", label))),
            );
            lines
        }
        ResultsPhase::Error(message) => {
            vec![heading("RESULTS"), warning(format!("Error: {}", message))]
        }
        ResultsPhase::Single(result) => render_single(result),
        ResultsPhase::Multi(result) => {
            let combined = &result.combined_effects;
            let mut lines = vec![
                heading(format!("COMBINED EFFECTS ({} impacts)", combined.impact_count)),
                normal(format!("Total energy    {}", format_energy(combined.total_energy_mt))),
                normal(format!("Largest crater  {}", format_km(combined.max_crater_km))),
                normal(format!(
                    "Crater area     {:.1} km²",
                    combined.total_crater_area_km2
                )),
                normal(format!("Seismic         M{:.1}", combined.combined_seismic)),
                normal(format!("Fireball        {}", format_km(combined.max_fireball_km))),
                tsunami_line(combined.tsunami_risk),
                normal(""),
                heading("INDIVIDUAL IMPACTS"),
            ];
            for (i, individual) in result.individual_results.iter().enumerate() {
                lines.push(individual_line(i, individual));
            }
            let points: usize = result
                .trajectories
                .iter()
                .map(|t| t.original_trajectory.len() + t.deflected_trajectory.len())
                .sum();
            if points > 0 {
                lines.push(dim(format!(
                    "{} trajectories, {} points",
                    result.trajectories.len(),
                    points
                )));
            }
            lines
        }
    }
}

fn render_single(result: &SimulationResult) -> Vec<Line> {
    let title = if result.asteroid_name.is_empty() {
        "IMPACT".to_string()
    } else {
        format!("IMPACT: {}", result.asteroid_name)
    };
    let mut lines = vec![
        heading(title),
        normal(format!("Energy    {}", format_energy(result.impact_energy_mt))),
        normal(format!("Crater    {}", format_km(result.crater_diameter_km))),
        normal(format!("Seismic   M{:.1}", result.seismic_magnitude)),
        normal(format!("Fireball  {}", format_km(result.fireball_radius_km))),
        tsunami_line(result.tsunami_risk),
    ];
    if !result.target_type.is_empty() {
        lines.push(normal(format!("Target    {}", result.target_type)));
    }
    if result.miss_distance_km > 0.0 {
        lines.push(normal(format!(
            "Deflected: misses by {:.0} km",
            result.miss_distance_km
        )));
    }
    lines.push(dim(format!(
        "Trajectory points: {} original, {} deflected",
        result.original_trajectory.len(),
        result.deflected_trajectory.len()
    )));
    lines
}

fn tsunami_line(risk: bool) -> Line {
    let text = format!("Tsunami   {}", yes_no(risk));
    if risk { warning(text) } else { normal(text) }
}

fn individual_line(position: usize, result: &IndividualResult) -> Line {
    Line::new(
        format!(
            "{}  {:.2}°, {:.2}°  {}  crater {}  M{:.1}{}",
            result.asteroid_name,
            result.impact_lat,
            result.impact_lon,
            format_energy(result.impact_energy_mt),
            format_km(result.crater_diameter_km),
            result.seismic_magnitude,
            if result.tsunami_risk { "  tsunami" } else { "" }
        ),
        Tone::Hex(result.color.clone(), position),
    )
}

pub fn render_historical(state: &HistoricalState) -> Vec<Line> {
    let mut lines = vec![heading("HISTORICAL IMPACTS")];
    if state.is_loading {
        lines.push(dim("Loading historical impacts..."));
    }
    if let Some(err) = &state.comparison_error {
        lines.push(warning(format!("Comparison failed: {}", err)));
    }
    if state.comparing {
        lines.push(dim("Comparing..."));
    } else if let Some(comparison) = &state.comparison {
        lines.push(normal(comparison.comparison_text.clone()));
        if !comparison.hiroshima_text.is_empty() {
            lines.push(normal(comparison.hiroshima_text.clone()));
        }
        lines.push(dim(format!(
            "Closest: {} ({:.2}x)",
            comparison.closest_impact.name, comparison.energy_ratio
        )));
    } else {
        lines.push(dim("Press C to compare the latest result."));
    }
    lines.push(normal(""));
    if let Some(err) = &state.impacts_error {
        lines.push(warning(format!("Error: {}", err)));
        lines.push(dim("Press G to retry."));
    }
    for impact in &state.impacts {
        lines.push(normal(format!(
            "{} {} ({}), {}",
            impact.emoji, impact.name, impact.location, impact.age_display
        )));
        lines.push(dim(format!(
            "   crater {}  energy {}",
            format_km(impact.crater_diameter_km),
            impact.energy_display
        )));
    }
    lines
}

pub fn render_dashboard(
    dashboard: &CloseApproachDashboard,
    now: DateTime<Utc>,
    service_available: bool,
) -> Vec<Line> {
    let mut lines = vec![heading("CLOSE APPROACHES")];
    if !service_available {
        lines.push(warning("Close approach service unavailable"));
        return lines;
    }

    match &dashboard.status {
        DashboardStatus::Loading => {
            lines.push(dim("Loading close approaches..."));
            return lines;
        }
        DashboardStatus::Error(message) => {
            lines.push(warning(format!("Error: {}", message)));
            lines.push(dim("Will retry on the next refresh."));
            return lines;
        }
        DashboardStatus::Ready => {}
    }

    let summary = dashboard.summary();
    lines.push(normal(format!(
        "Total {}  Hazardous {}  High risk {}  <10 LD {}",
        summary.total, summary.hazardous, summary.high_risk, summary.within_ten_lunar
    )));
    let arrow = if dashboard.sort.descending { "▼" } else { "▲" };
    let mut sort_line = format!("Sort: {} {}  (F1-F4)", dashboard.sort.field.label(), arrow);
    if let Some(updated) = dashboard.last_update {
        sort_line.push_str(&format!("  updated {}", updated.format("%H:%M:%S UTC")));
    }
    lines.push(dim(sort_line));

    let Some(rows) = dashboard.visible_rows() else {
        return lines;
    };
    if rows.is_empty() {
        lines.push(dim("No close approaches in the current window."));
        return lines;
    }
    let now_ms = now.timestamp_millis();
    lines.extend(rows.into_iter().map(|approach| approach_line(approach, now_ms)));
    lines
}

/// A missing approach date renders as an em dash.
pub fn approach_date(approach: &CloseApproach) -> &str {
    approach.close_approach_date.as_deref().unwrap_or("—")
}

fn approach_line(approach: &CloseApproach, now_ms: i64) -> Line {
    Line::new(
        format!(
            "{}{}  {}  in {}  {:.0} km ({:.2} LD)  {:.1} km/s  {:.0} m  {}",
            approach.name,
            if approach.is_potentially_hazardous { " [PHA]" } else { "" },
            approach_date(approach),
            format_countdown(approach.epoch_date_close_approach, now_ms),
            approach.miss_distance_km,
            approach.miss_distance_lunar,
            approach.velocity_km_s,
            approach.avg_diameter_m,
            approach.risk_level.label()
        ),
        Tone::Risk(approach.risk_level),
    )
}

pub fn render_status(status: &ServiceStatus, worker_running: bool, base_url: &str) -> Line {
    if !worker_running {
        return warning(format!("Service unavailable ({})", base_url));
    }
    match &status.state {
        ServiceState::Checking => dim(format!("Connecting to {}...", base_url)),
        ServiceState::Online(health) => normal(format!(
            "{}: {}  ({})   D dashboard  H history",
            if health.service.is_empty() { "impact service" } else { health.service.as_str() },
            health.status,
            base_url
        )),
        ServiceState::Offline(message) => warning(format!("Service offline: {}", message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::model::{
        Asteroid, CombinedEffects, HealthStatus, MultiImpactResult,
    };
    use crate::dashboard::poller::DashboardUpdate;
    use crate::scenario::types::ScenarioEntry;

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn approach(name: &str, date: Option<&str>) -> CloseApproach {
        CloseApproach {
            id: name.to_string(),
            name: name.to_string(),
            close_approach_date: date.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn error_panel_replaces_table() {
        let mut dashboard = CloseApproachDashboard::default();
        dashboard.apply(DashboardUpdate::Loaded(vec![approach("2024 AB", Some("2026-Oct-20 10:00"))]));
        let ready = text(&render_dashboard(&dashboard, Utc::now(), true));
        assert!(ready.contains("2024 AB"));

        dashboard.apply(DashboardUpdate::Failed("Failed to fetch close approaches".into()));
        let failed = text(&render_dashboard(&dashboard, Utc::now(), true));
        assert!(failed.contains("Error: Failed to fetch close approaches"));
        assert!(!failed.contains("2024 AB"));
    }

    #[test]
    fn null_date_renders_dash() {
        let mut dashboard = CloseApproachDashboard::default();
        dashboard.apply(DashboardUpdate::Loaded(vec![approach("1999 XY", None)]));
        let rendered = text(&render_dashboard(&dashboard, Utc::now(), true));
        assert!(rendered.contains("1999 XY  —  in Passed"));
    }

    #[test]
    fn empty_ready_list_has_inline_message() {
        let mut dashboard = CloseApproachDashboard::default();
        dashboard.apply(DashboardUpdate::Loaded(Vec::new()));
        let rendered = text(&render_dashboard(&dashboard, Utc::now(), true));
        assert!(rendered.contains("Total 0"));
        assert!(rendered.contains("No close approaches in the current window."));
    }

    #[test]
    fn missing_worker_is_reported() {
        let dashboard = CloseApproachDashboard::default();
        let rendered = text(&render_dashboard(&dashboard, Utc::now(), false));
        assert!(rendered.contains("unavailable"));

        let status = render_status(&ServiceStatus::default(), false, "http://localhost:5000");
        assert_eq!(status.tone, Tone::Warning);
    }

    #[test]
    fn results_states_are_distinct() {
        let idle = text(&render_results(&ResultsState::default()));
        assert!(idle.contains("No simulation run yet."));

        let pending = text(&render_results(&ResultsState {
            phase: ResultsPhase::Pending(SimulationKind::Multi),
        }));
        assert!(pending.contains("Simulating multi-asteroid impact..."));
        assert!(!pending.contains("No simulation"));
    }

    #[test]
    fn multi_result_lists_each_impact_with_its_color() {
        let results = ResultsState {
            phase: ResultsPhase::Multi(MultiImpactResult {
                individual_results: vec![
                    IndividualResult {
                        asteroid_name: "Apophis".into(),
                        impact_energy_mt: 1500.0,
                        color: "#ef4444".into(),
                        ..Default::default()
                    },
                    IndividualResult {
                        asteroid_name: "Bennu".into(),
                        impact_energy_mt: 42.0,
                        ..Default::default()
                    },
                ],
                combined_effects: CombinedEffects {
                    total_energy_mt: 1542.0,
                    impact_count: 2,
                    tsunami_risk: true,
                    ..Default::default()
                },
                ..Default::default()
            }),
        };
        let lines = render_results(&results);
        let rendered = text(&lines);
        assert!(rendered.contains("COMBINED EFFECTS (2 impacts)"));
        assert!(rendered.contains("Total energy    1.5 Gigatons"));
        assert!(rendered.contains("Tsunami   YES"));
        let bennu = lines.iter().find(|l| l.text.starts_with("Bennu")).unwrap();
        assert_eq!(bennu.tone, Tone::Hex(String::new(), 1));
    }

    #[test]
    fn scenario_lists_entries_and_remaining_candidates() {
        let catalog = AsteroidCatalog {
            asteroids: vec![
                Asteroid {
                    id: "1".into(),
                    name: "Apophis".into(),
                    ..Default::default()
                },
                Asteroid {
                    id: "2".into(),
                    name: "Bennu".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let scenario = ScenarioState {
            entries: vec![ScenarioEntry {
                asteroid: catalog.asteroids[0].clone(),
                impact_lat: 34.05,
                impact_lon: -118.24,
                mitigation_delta_v: 0.0,
            }],
            selected: Some(0),
            ..Default::default()
        };
        let lines = render_scenario(&catalog, &scenario, 3);
        let rendered = text(&lines);
        assert!(rendered.starts_with("SCENARIO (1/3)"));
        assert!(rendered.contains(">[1] Apophis  34.05°, -118.24°"));
        assert!(rendered.contains("> Bennu"));
        assert_eq!(
            lines.iter().filter(|l| l.text.contains("Apophis")).count(),
            1
        );
    }

    #[test]
    fn online_status_names_service() {
        let status = ServiceStatus {
            state: ServiceState::Online(HealthStatus {
                status: "healthy".into(),
                service: "Impact Simulation API".into(),
            }),
            requested: true,
        };
        let line = render_status(&status, true, "http://localhost:5000");
        assert!(line.text.starts_with("Impact Simulation API: healthy"));
    }
}
