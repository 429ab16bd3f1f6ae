//! Mounting, unmounting and sorting the close-approach dashboard.

use bevy::prelude::*;
use tokio_util::sync::CancellationToken;

use crate::api::types::{ApiChannels, ApiCommand};
use crate::config::AppConfig;
use crate::dashboard::model::{CloseApproachDashboard, SortField};
use crate::dashboard::poller::DashboardUpdate;

/// A running poll on the worker. Dropping it stops the poll.
#[derive(Debug)]
pub struct ActiveWatch {
    pub id: u64,
    token: CancellationToken,
}

impl Drop for ActiveWatch {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[derive(Resource, Debug)]
pub struct DashboardLifecycle {
    /// Whether the dashboard is mounted.
    pub visible: bool,
    watch: Option<ActiveWatch>,
    next_watch_id: u64,
}

impl Default for DashboardLifecycle {
    fn default() -> Self {
        Self {
            visible: true,
            watch: None,
            next_watch_id: 1,
        }
    }
}

impl DashboardLifecycle {
    pub fn active_watch_id(&self) -> Option<u64> {
        self.watch.as_ref().map(|watch| watch.id)
    }

    /// Updates from any other watch belong to an unmounted dashboard.
    pub fn accepts(&self, watch_id: u64) -> bool {
        self.active_watch_id() == Some(watch_id)
    }

    fn begin(&mut self) -> (u64, CancellationToken) {
        let id = self.next_watch_id;
        self.next_watch_id += 1;
        let token = CancellationToken::new();
        self.watch = Some(ActiveWatch {
            id,
            token: token.clone(),
        });
        (id, token)
    }
}

pub fn toggle_dashboard(keys: Res<ButtonInput<KeyCode>>, mut lifecycle: ResMut<DashboardLifecycle>) {
    if keys.just_pressed(KeyCode::KeyD) {
        lifecycle.visible = !lifecycle.visible;
    }
}

/// Start a watch when the dashboard is mounted, cancel it when unmounted.
pub fn sync_dashboard_watch(
    config: Res<AppConfig>,
    mut lifecycle: ResMut<DashboardLifecycle>,
    mut dashboard: ResMut<CloseApproachDashboard>,
    channels: Option<Res<ApiChannels>>,
) {
    if !lifecycle.visible {
        if let Some(watch) = lifecycle.watch.take() {
            info!("[DASHBOARD] unmounted, stopping watch_id={}", watch.id);
            drop(watch);
            dashboard.reset();
        }
        return;
    }

    if lifecycle.watch.is_some() {
        return;
    }
    let Some(channels) = channels else { return };

    let (watch_id, token) = lifecycle.begin();
    let sent = channels.send(ApiCommand::WatchCloseApproaches {
        watch_id,
        interval: config.close_approach_refresh(),
        token,
    });
    if sent {
        info!("[DASHBOARD] mounted, watch_id={}", watch_id);
    } else {
        // Keep the watch so the send is not retried every frame.
        dashboard.apply(DashboardUpdate::Failed(
            "Close approach service unavailable".to_string(),
        ));
    }
}

pub fn handle_sort_keys(
    keys: Res<ButtonInput<KeyCode>>,
    lifecycle: Res<DashboardLifecycle>,
    mut dashboard: ResMut<CloseApproachDashboard>,
) {
    if !lifecycle.visible {
        return;
    }
    let bindings = [KeyCode::F1, KeyCode::F2, KeyCode::F3, KeyCode::F4];
    for (key, field) in bindings.into_iter().zip(SortField::ALL) {
        if keys.just_pressed(key) {
            dashboard.sort.select(field);
        }
    }
}
