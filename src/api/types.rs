//! Worker commands, results and the channel resource.

use bevy::prelude::*;
use std::sync::{Arc, Mutex, mpsc::Receiver};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use crate::api::error::RequestError;
use crate::api::model::{
    Asteroid, AsteroidDetails, HealthStatus, HistoricalComparison, HistoricalImpact,
    MultiAsteroidParams, MultiImpactResult, SimulationParams, SimulationResult,
};
use crate::dashboard::poller::DashboardUpdate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiCall {
    Asteroids,
    AsteroidDetails,
    Simulate,
    Elevation,
    MultiSimulate,
    HistoricalImpacts,
    Compare,
    Health,
}

#[derive(Debug)]
pub enum ApiCommand {
    FetchAsteroids,
    FetchAsteroidDetails { id: String },
    Simulate(SimulationParams),
    FetchElevation { lat: f64, lng: f64 },
    SimulateMulti(Vec<MultiAsteroidParams>),
    FetchHistoricalImpacts,
    Compare { energy_mt: f64, crater_km: Option<f64> },
    CheckHealth,
    /// Start polling close approaches until `token` is cancelled.
    WatchCloseApproaches {
        watch_id: u64,
        interval: Duration,
        token: CancellationToken,
    },
}

#[derive(Debug)]
pub enum ApiResult {
    Asteroids(Vec<Asteroid>),
    AsteroidDetails { id: String, details: AsteroidDetails },
    Simulation(SimulationResult),
    Elevation { lat: f64, lng: f64, elevation: f64 },
    MultiSimulation(MultiImpactResult),
    HistoricalImpacts(Vec<HistoricalImpact>),
    Comparison(HistoricalComparison),
    Health(HealthStatus),
    CloseApproaches { watch_id: u64, update: DashboardUpdate },
    Error { call: ApiCall, error: RequestError },
}

#[derive(Resource)]
pub struct ApiChannels {
    pub cmd_tx: UnboundedSender<ApiCommand>,
    pub res_rx: Arc<Mutex<Receiver<ApiResult>>>,
}

impl ApiChannels {
    /// Queue a command; false when the worker has gone away.
    pub fn send(&self, cmd: ApiCommand) -> bool {
        match self.cmd_tx.send(cmd) {
            Ok(()) => true,
            Err(err) => {
                error!("[API] worker unavailable, dropped {:?}", err.0);
                false
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ServiceState {
    #[default]
    Checking,
    Online(HealthStatus),
    Offline(String),
}

/// Reachability of the impact service, shown in the status bar.
#[derive(Resource, Debug, Default)]
pub struct ServiceStatus {
    pub state: ServiceState,
    pub requested: bool,
}
