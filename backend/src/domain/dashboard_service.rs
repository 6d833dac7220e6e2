//! Loader for the admin dashboard overview.

use std::sync::Arc;

use futures_util::future::join4;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::ApiClient;
use crate::domain::{
    DashboardOverview, DashboardStats, Envelope, Notification, NotificationId, PopularProduct,
    RecentUser, mark_notification_read,
};

const NOTIFICATIONS_PATH: &str = "/notifications";

/// Fetches the four dashboard panels and acknowledges notifications.
#[derive(Clone)]
pub struct DashboardService<C> {
    client: Arc<C>,
}

impl<C> DashboardService<C> {
    /// Create a new dashboard loader over the API client.
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C> DashboardService<C>
where
    C: ApiClient,
{
    /// Fetch stats, recent users, popular products, and notifications
    /// concurrently.
    ///
    /// The first failing panel, in that order, fails the whole load.
    pub async fn load_overview(&self) -> Envelope<DashboardOverview> {
        let (stats, users, products, notifications) = join4(
            self.client.get("/dashboard/stats"),
            self.client.get("/users/recent"),
            self.client.get("/products/popular"),
            self.client.get(NOTIFICATIONS_PATH),
        )
        .await;

        stats.decode::<DashboardStats>().and_then(|stats| {
            users.decode::<Vec<RecentUser>>().and_then(|recent_users| {
                products
                    .decode::<Vec<PopularProduct>>()
                    .and_then(|popular_products| {
                        notifications
                            .decode::<Vec<Notification>>()
                            .map(|notifications| DashboardOverview {
                                stats,
                                recent_users,
                                popular_products,
                                notifications,
                            })
                    })
            })
        })
    }

    /// Fetch the notification list on its own, without the other panels.
    pub async fn load_notifications(&self) -> Envelope<Vec<Notification>> {
        self.client.get(NOTIFICATIONS_PATH).await.decode()
    }

    /// Acknowledge notification `id` and return the updated list.
    ///
    /// `notifications` is left untouched; on failure nothing is marked.
    pub async fn mark_notification_read(
        &self,
        notifications: &[Notification],
        id: &NotificationId,
    ) -> Envelope<Vec<Notification>> {
        let acknowledged = self
            .client
            .put(&format!("{NOTIFICATIONS_PATH}/{id}/read"), &json!({}))
            .await;
        acknowledged.map(|_| {
            debug!(notification = %id, "notification marked read");
            mark_notification_read(notifications, id)
        })
    }
}

#[cfg(test)]
#[path = "dashboard_service_tests.rs"]
mod tests;
