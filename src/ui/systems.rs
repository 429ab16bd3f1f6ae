//! Rebuild panel text when the state behind it changes.

use bevy::prelude::*;
use bevy_feathers::palette;
use chrono::Utc;

use crate::api::model::RiskLevel;
use crate::api::types::{ApiChannels, ServiceStatus};
use crate::config::AppConfig;
use crate::dashboard::model::CloseApproachDashboard;
use crate::dashboard::systems::DashboardLifecycle;
use crate::historical::types::HistoricalState;
use crate::results::types::ResultsState;
use crate::scenario::palette::{color_from_hex, entry_color};
use crate::scenario::types::{AsteroidCatalog, ScenarioState};
use crate::ui::layout::{DashboardPanel, HistoricalPanel, PANEL_FONT_SIZE, PanelText};
use crate::ui::render::{self, Line, Tone};

const WARNING: Color = Color::srgb(0.94, 0.27, 0.27);

/// Drives the countdown column between data changes.
#[derive(Resource)]
pub struct CountdownTick(pub Timer);

impl Default for CountdownTick {
    fn default() -> Self {
        Self(Timer::from_seconds(1.0, TimerMode::Repeating))
    }
}

fn tone_color(tone: &Tone) -> Color {
    match tone {
        Tone::Normal => palette::LIGHT_GRAY_1,
        Tone::Dim => palette::LIGHT_GRAY_2,
        Tone::Heading => palette::ACCENT,
        Tone::Warning => WARNING,
        Tone::Entry(position) => entry_color(*position),
        Tone::Hex(hex, position) => color_from_hex(hex, *position),
        Tone::Risk(level) => match level {
            RiskLevel::Low => Color::srgb_u8(0x10, 0xb9, 0x81),
            RiskLevel::Moderate => Color::srgb_u8(0xf5, 0x9e, 0x0b),
            RiskLevel::High => Color::srgb_u8(0xf9, 0x73, 0x16),
            RiskLevel::Extreme => WARNING,
        },
    }
}

fn write_panel(
    commands: &mut Commands,
    panels: &Query<(Entity, &PanelText)>,
    kind: PanelText,
    lines: Vec<Line>,
) {
    for (entity, _) in panels.iter().filter(|(_, k)| **k == kind) {
        commands
            .entity(entity)
            .despawn_related::<Children>()
            .with_children(|text| {
                for line in &lines {
                    text.spawn((
                        TextSpan::new(format!("{}\n", line.text)),
                        TextFont {
                            font_size: PANEL_FONT_SIZE,
                            ..default()
                        },
                        TextColor(tone_color(&line.tone)),
                    ));
                }
            });
    }
}

pub fn refresh_scenario_panel(
    mut commands: Commands,
    config: Res<AppConfig>,
    catalog: Res<AsteroidCatalog>,
    scenario: Res<ScenarioState>,
    panels: Query<(Entity, &PanelText)>,
) {
    if !(catalog.is_changed() || scenario.is_changed()) {
        return;
    }
    let lines = render::render_scenario(&catalog, &scenario, config.max_asteroids);
    write_panel(&mut commands, &panels, PanelText::Scenario, lines);
}

pub fn refresh_results_panel(
    mut commands: Commands,
    results: Res<ResultsState>,
    panels: Query<(Entity, &PanelText)>,
) {
    if !results.is_changed() {
        return;
    }
    write_panel(
        &mut commands,
        &panels,
        PanelText::Results,
        render::render_results(&results),
    );
}

pub fn refresh_historical_panel(
    mut commands: Commands,
    historical: Res<HistoricalState>,
    panels: Query<(Entity, &PanelText)>,
) {
    if !historical.is_changed() {
        return;
    }
    write_panel(
        &mut commands,
        &panels,
        PanelText::Historical,
        render::render_historical(&historical),
    );
}

pub fn refresh_dashboard_panel(
    mut commands: Commands,
    time: Res<Time>,
    mut tick: ResMut<CountdownTick>,
    dashboard: Res<CloseApproachDashboard>,
    lifecycle: Res<DashboardLifecycle>,
    channels: Option<Res<ApiChannels>>,
    panels: Query<(Entity, &PanelText)>,
) {
    let ticked = tick.0.tick(time.delta()).just_finished();
    if !lifecycle.visible {
        return;
    }
    if !(ticked || dashboard.is_changed() || lifecycle.is_changed()) {
        return;
    }
    let lines = render::render_dashboard(&dashboard, Utc::now(), channels.is_some());
    write_panel(&mut commands, &panels, PanelText::Dashboard, lines);
}

pub fn refresh_status_bar(
    mut commands: Commands,
    config: Res<AppConfig>,
    status: Res<ServiceStatus>,
    channels: Option<Res<ApiChannels>>,
    panels: Query<(Entity, &PanelText)>,
) {
    if !status.is_changed() {
        return;
    }
    let line = render::render_status(&status, channels.is_some(), &config.api_base_url);
    write_panel(&mut commands, &panels, PanelText::Status, vec![line]);
}

pub fn sync_panel_visibility(
    lifecycle: Res<DashboardLifecycle>,
    historical: Res<HistoricalState>,
    mut panels: Query<(&mut Node, Has<DashboardPanel>, Has<HistoricalPanel>)>,
) {
    if !(lifecycle.is_changed() || historical.is_changed()) {
        return;
    }
    for (mut node, is_dashboard, is_historical) in panels.iter_mut() {
        let visible = if is_dashboard {
            lifecycle.visible
        } else if is_historical {
            historical.visible
        } else {
            continue;
        };
        let display = if visible { Display::Flex } else { Display::None };
        if node.display != display {
            node.display = display;
        }
    }
}
