//! Live close-approach dashboard.
//!
//! While mounted, the API worker polls the close-approach feed on a fixed
//! interval. Unmounting cancels the poll and resets the view.

use bevy::prelude::*;

pub mod model;
pub mod poller;
pub mod systems;

pub use model::CloseApproachDashboard;
pub use systems::DashboardLifecycle;

pub struct DashboardPlugin;

impl Plugin for DashboardPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CloseApproachDashboard>()
            .init_resource::<DashboardLifecycle>()
            .add_systems(
                Update,
                (
                    systems::toggle_dashboard,
                    systems::sync_dashboard_watch,
                    systems::handle_sort_keys,
                )
                    .chain(),
            );
    }
}
