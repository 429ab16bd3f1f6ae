//! API worker startup and result routing.

use anyhow::{Context, Result};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::api::client::ImpactApiClient;
use crate::api::fetcher::start_api_worker;
use crate::api::types::{
    ApiCall, ApiChannels, ApiCommand, ApiResult, ServiceState, ServiceStatus,
};
use crate::config::AppConfig;
use crate::dashboard::model::CloseApproachDashboard;
use crate::dashboard::systems::DashboardLifecycle;
use crate::historical::systems::queue_comparison;
use crate::historical::types::HistoricalState;
use crate::results::types::{ResultsPhase, ResultsState};
use crate::scenario::types::{AsteroidCatalog, ElevationReading, ScenarioState};

pub fn setup_api_worker(mut commands: Commands, config: Res<AppConfig>) {
    match build_api_worker(&config) {
        Ok(channels) => commands.insert_resource(channels),
        Err(err) => error!("[INIT] API worker failed to start: {:#}", err),
    }
}

fn build_api_worker(config: &AppConfig) -> Result<ApiChannels> {
    let client = ImpactApiClient::new(&config.api_base_url, config.request_timeout())
        .context("building API client")?;
    info!("[INIT] API worker starting for {}", client.base_url());
    start_api_worker(client)
}

pub fn request_health(mut status: ResMut<ServiceStatus>, channels: Option<Res<ApiChannels>>) {
    if status.requested {
        return;
    }
    status.requested = true;
    let Some(channels) = channels else {
        status.state = ServiceState::Offline("service unavailable".to_string());
        return;
    };
    if !channels.send(ApiCommand::CheckHealth) {
        status.state = ServiceState::Offline("service unavailable".to_string());
    }
}

/// Resources that worker results are written into.
#[derive(SystemParam)]
pub struct ApiTargets<'w> {
    catalog: ResMut<'w, AsteroidCatalog>,
    scenario: ResMut<'w, ScenarioState>,
    results: ResMut<'w, ResultsState>,
    historical: ResMut<'w, HistoricalState>,
    dashboard: ResMut<'w, CloseApproachDashboard>,
    lifecycle: Res<'w, DashboardLifecycle>,
    service: ResMut<'w, ServiceStatus>,
}

pub fn apply_api_results(mut targets: ApiTargets, channels: Option<Res<ApiChannels>>) {
    let Some(channels) = channels else { return };
    let Ok(guard) = channels.res_rx.lock() else {
        return;
    };

    while let Ok(msg) = guard.try_recv() {
        match msg {
            ApiResult::Asteroids(asteroids) => {
                info!("[API] {} asteroids loaded", asteroids.len());
                targets.catalog.asteroids = asteroids;
                targets.catalog.is_loading = false;
                targets.catalog.error = None;
            }
            ApiResult::AsteroidDetails { id, details } => {
                targets.catalog.details = Some((id, details));
                targets.catalog.details_error = None;
            }
            ApiResult::Simulation(result) => {
                targets.results.phase = ResultsPhase::Single(result);
            }
            ApiResult::Elevation {
                lat,
                lng,
                elevation,
            } => {
                targets.scenario.elevation = Some(ElevationReading {
                    lat,
                    lng,
                    meters: elevation,
                });
                targets.scenario.elevation_error = None;
            }
            ApiResult::MultiSimulation(result) => {
                let combined = &result.combined_effects;
                queue_comparison(
                    &mut targets.historical,
                    &channels,
                    combined.total_energy_mt,
                    Some(combined.max_crater_km),
                );
                targets.results.phase = ResultsPhase::Multi(result);
            }
            ApiResult::HistoricalImpacts(impacts) => {
                targets.historical.impacts = impacts;
                targets.historical.is_loading = false;
                targets.historical.impacts_error = None;
            }
            ApiResult::Comparison(comparison) => {
                targets.historical.comparison = Some(comparison);
                targets.historical.comparing = false;
                targets.historical.comparison_error = None;
            }
            ApiResult::Health(health) => {
                info!("[API] {} is {}", health.service, health.status);
                targets.service.state = ServiceState::Online(health);
            }
            ApiResult::CloseApproaches { watch_id, update } => {
                if targets.lifecycle.accepts(watch_id) {
                    targets.dashboard.apply(update);
                } else {
                    debug!("[DASHBOARD] ignoring update from stale watch_id={}", watch_id);
                }
            }
            ApiResult::Error { call, error } => {
                let message = error.to_string();
                match call {
                    ApiCall::Asteroids => {
                        targets.catalog.is_loading = false;
                        targets.catalog.error = Some(message);
                    }
                    ApiCall::AsteroidDetails => {
                        targets.catalog.details = None;
                        targets.catalog.details_error = Some(message);
                    }
                    ApiCall::Simulate | ApiCall::MultiSimulate => {
                        targets.results.phase = ResultsPhase::Error(message);
                    }
                    ApiCall::Elevation => targets.scenario.elevation_error = Some(message),
                    ApiCall::HistoricalImpacts => {
                        targets.historical.is_loading = false;
                        targets.historical.impacts_error = Some(message);
                    }
                    ApiCall::Compare => {
                        targets.historical.comparing = false;
                        targets.historical.comparison_error = Some(message);
                    }
                    ApiCall::Health => targets.service.state = ServiceState::Offline(message),
                }
            }
        }
    }
}
