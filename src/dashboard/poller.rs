//! Periodic close-approach refresh, bound to a cancellation token.

use bevy::log::{debug, warn};
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::api::error::RequestError;
use crate::api::model::CloseApproach;

#[derive(Clone, Debug, PartialEq)]
pub enum DashboardUpdate {
    /// A fetch has started.
    Refreshing,
    Loaded(Vec<CloseApproach>),
    Failed(String),
}

/// Fetch immediately, then every `interval`, until `token` is cancelled.
///
/// The token is checked again after every fetch so a result that lands after
/// cancellation is dropped instead of delivered. Failures do not change the
/// schedule.
pub async fn watch_close_approaches<F, Fut, D>(
    interval: Duration,
    token: CancellationToken,
    mut fetch: F,
    mut deliver: D,
) where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Vec<CloseApproach>, RequestError>>,
    D: FnMut(DashboardUpdate),
{
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        deliver(DashboardUpdate::Refreshing);
        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            outcome = fetch() => outcome,
        };
        if token.is_cancelled() {
            debug!("[DASHBOARD] dropping result fetched after cancellation");
            break;
        }

        match outcome {
            Ok(approaches) => deliver(DashboardUpdate::Loaded(approaches)),
            Err(err) => {
                warn!("[DASHBOARD] close approach refresh failed: {}", err);
                deliver(DashboardUpdate::Failed(err.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn approach(name: &str) -> CloseApproach {
        CloseApproach {
            id: name.to_string(),
            name: name.to_string(),
            miss_distance_km: 1.0,
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn failure_then_scheduled_recovery() {
        let token = CancellationToken::new();
        let stop = token.clone();
        let mut script: VecDeque<Result<Vec<CloseApproach>, RequestError>> = VecDeque::from([
            Err(RequestError::Rejected("NeoWs unavailable".into())),
            Ok(vec![approach("2024 AA")]),
        ]);
        let mut updates = Vec::new();
        let mut settled = 0;
        let started = tokio::time::Instant::now();

        watch_close_approaches(
            Duration::from_secs(300),
            token,
            move || {
                let next = script.pop_front().unwrap_or_else(|| Ok(Vec::new()));
                async move { next }
            },
            |update| {
                if !matches!(update, DashboardUpdate::Refreshing) {
                    settled += 1;
                    if settled == 2 {
                        stop.cancel();
                    }
                }
                updates.push(update);
            },
        )
        .await;

        assert_eq!(
            updates,
            vec![
                DashboardUpdate::Refreshing,
                DashboardUpdate::Failed("NeoWs unavailable".into()),
                DashboardUpdate::Refreshing,
                DashboardUpdate::Loaded(vec![approach("2024 AA")]),
            ]
        );
        // Second fetch waited for the full interval.
        assert!(started.elapsed() >= Duration::from_secs(300));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_token_never_fetches() {
        let token = CancellationToken::new();
        token.cancel();
        let mut calls = 0;
        let mut updates = Vec::new();

        watch_close_approaches(
            Duration::from_secs(300),
            token,
            || {
                calls += 1;
                async { Ok::<_, RequestError>(Vec::new()) }
            },
            |update| updates.push(update),
        )
        .await;

        assert_eq!(calls, 0);
        assert!(updates.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn result_arriving_after_cancel_is_dropped() {
        let token = CancellationToken::new();
        let cancel_inside = token.clone();
        let mut updates = Vec::new();

        watch_close_approaches(
            Duration::from_secs(300),
            token,
            move || {
                // Teardown happens while the request is in flight.
                cancel_inside.cancel();
                async { Ok::<_, RequestError>(vec![approach("late")]) }
            },
            |update| updates.push(update),
        )
        .await;

        assert_eq!(updates, vec![DashboardUpdate::Refreshing]);
    }
}
