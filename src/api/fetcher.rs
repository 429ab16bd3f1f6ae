//! Impact service worker: owns the Tokio runtime and the HTTP client.

use anyhow::{Context, Result};
use bevy::log::{info, warn};
use std::sync::{
    Arc, Mutex,
    mpsc::{self, Sender},
};
use std::thread;
use tokio::sync::mpsc as async_mpsc;

use crate::api::client::ImpactApiClient;
use crate::api::types::{ApiCall, ApiChannels, ApiCommand, ApiResult};
use crate::dashboard::poller::watch_close_approaches;

pub fn start_api_worker(client: ImpactApiClient) -> Result<ApiChannels> {
    let (cmd_tx, mut cmd_rx) = async_mpsc::unbounded_channel::<ApiCommand>();
    let (res_tx, res_rx) = mpsc::channel::<ApiResult>();
    let rt = tokio::runtime::Runtime::new().context("tokio runtime")?;

    thread::Builder::new()
        .name("impact-api".to_string())
        .spawn(move || {
            rt.block_on(async move {
                // Requests from the UI run one at a time; only close-approach
                // watches are spawned alongside.
                while let Some(cmd) = cmd_rx.recv().await {
                    handle_command(&client, cmd, &res_tx).await;
                }
                info!("[API] command channel closed, worker exiting");
            });
        })
        .context("spawn api worker thread")?;

    Ok(ApiChannels {
        cmd_tx,
        res_rx: Arc::new(Mutex::new(res_rx)),
    })
}

async fn handle_command(client: &ImpactApiClient, cmd: ApiCommand, res_tx: &Sender<ApiResult>) {
    let (call, result) = match cmd {
        ApiCommand::WatchCloseApproaches {
            watch_id,
            interval,
            token,
        } => {
            let client = client.clone();
            let tx = res_tx.clone();
            info!(
                "[API] watching close approaches watch_id={} every {}s",
                watch_id,
                interval.as_secs()
            );
            tokio::spawn(async move {
                watch_close_approaches(
                    interval,
                    token,
                    move || {
                        let client = client.clone();
                        async move { client.get_close_approaches().await }
                    },
                    move |update| {
                        let _ = tx.send(ApiResult::CloseApproaches { watch_id, update });
                    },
                )
                .await;
                info!("[API] close approach watch_id={} stopped", watch_id);
            });
            return;
        }
        ApiCommand::FetchAsteroids => (
            ApiCall::Asteroids,
            client.get_asteroids().await.map(ApiResult::Asteroids),
        ),
        ApiCommand::FetchAsteroidDetails { id } => (
            ApiCall::AsteroidDetails,
            client
                .get_asteroid_details(&id)
                .await
                .map(|details| ApiResult::AsteroidDetails { id, details }),
        ),
        ApiCommand::Simulate(params) => (
            ApiCall::Simulate,
            client
                .simulate_impact(&params)
                .await
                .map(ApiResult::Simulation),
        ),
        ApiCommand::FetchElevation { lat, lng } => (
            ApiCall::Elevation,
            client
                .get_elevation(lat, lng)
                .await
                .map(|elevation| ApiResult::Elevation {
                    lat,
                    lng,
                    elevation,
                }),
        ),
        ApiCommand::SimulateMulti(asteroids) => (
            ApiCall::MultiSimulate,
            client
                .simulate_multi_impact(&asteroids)
                .await
                .map(ApiResult::MultiSimulation),
        ),
        ApiCommand::FetchHistoricalImpacts => (
            ApiCall::HistoricalImpacts,
            client
                .get_historical_impacts()
                .await
                .map(ApiResult::HistoricalImpacts),
        ),
        ApiCommand::Compare {
            energy_mt,
            crater_km,
        } => (
            ApiCall::Compare,
            client
                .get_comparison(energy_mt, crater_km)
                .await
                .map(ApiResult::Comparison),
        ),
        ApiCommand::CheckHealth => (
            ApiCall::Health,
            client.health().await.map(ApiResult::Health),
        ),
    };

    let msg = match result {
        Ok(msg) => msg,
        Err(error) => {
            warn!("[API] {:?} failed: {}", call, error);
            ApiResult::Error { call, error }
        }
    };
    let _ = res_tx.send(msg);
}
