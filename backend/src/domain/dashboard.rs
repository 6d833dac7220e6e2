//! Admin dashboard overview: headline stats, recent sign-ups, best sellers,
//! and notifications.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::{NotificationId, UserId};
use super::timestamp;

/// Headline counters. Missing fields read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    /// Registered users.
    pub total_users: u64,
    /// Users active in the current period.
    pub active_users: u64,
    /// Revenue to date.
    pub total_revenue: Decimal,
    /// Orders awaiting fulfilment.
    pub pending_orders: u64,
}

/// Recently registered user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentUser {
    /// Account identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Avatar URL, if the user uploaded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Registration instant.
    #[serde(with = "timestamp")]
    pub joined_at: DateTime<Utc>,
    /// Account status label (`active`, `suspended`, ...).
    pub status: String,
}

impl RecentUser {
    /// Whether the account is active.
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }

    /// Presentation colour token for the status pill.
    pub fn status_badge_color(&self) -> &'static str {
        if self.is_active() {
            "bg-green-100 text-green-800"
        } else {
            "bg-gray-100 text-gray-800"
        }
    }
}

/// Best-selling product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularProduct {
    /// Product identifier.
    pub id: String,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Units sold.
    #[serde(default)]
    pub sales: u64,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Admin notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Notification identifier.
    pub id: NotificationId,
    /// Message body.
    pub message: String,
    /// Whether an admin has acknowledged it.
    #[serde(default)]
    pub read: bool,
    /// Creation instant.
    #[serde(with = "timestamp")]
    pub date: DateTime<Utc>,
}

/// Return a copy of `notifications` with `id` marked as read.
///
/// Unknown ids leave every entry as it was.
#[must_use]
pub fn mark_notification_read(
    notifications: &[Notification],
    id: &NotificationId,
) -> Vec<Notification> {
    notifications
        .iter()
        .map(|notification| {
            if &notification.id == id {
                Notification {
                    read: true,
                    ..notification.clone()
                }
            } else {
                notification.clone()
            }
        })
        .collect()
}

/// Everything the dashboard page renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    /// Headline counters.
    pub stats: DashboardStats,
    /// Recent sign-ups.
    pub recent_users: Vec<RecentUser>,
    /// Best sellers.
    pub popular_products: Vec<PopularProduct>,
    /// Notifications, newest first as served.
    pub notifications: Vec<Notification>,
}

impl DashboardOverview {
    /// Notifications nobody has acknowledged yet.
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn notifications() -> Vec<Notification> {
        serde_json::from_value(json!([
            { "id": "n1", "message": "Low stock: lamps", "read": false, "date": "2024-05-01T08:00:00Z" },
            { "id": "n2", "message": "New review", "date": "2024-05-02" }
        ]))
        .expect("fixture notifications")
    }

    #[rstest]
    fn marks_only_the_matching_notification(notifications: Vec<Notification>) {
        let id = NotificationId::new("n2").expect("id");
        let updated = mark_notification_read(&notifications, &id);

        assert_eq!(
            updated.iter().map(|n| n.read).collect::<Vec<_>>(),
            vec![false, true]
        );
        assert!(!notifications.iter().any(|n| n.read), "input must not change");
    }

    #[rstest]
    fn unknown_id_changes_nothing(notifications: Vec<Notification>) {
        let id = NotificationId::new("n404").expect("id");
        assert_eq!(mark_notification_read(&notifications, &id), notifications);
    }

    #[test]
    fn stats_default_missing_counters_to_zero() {
        let stats: DashboardStats =
            serde_json::from_value(json!({ "totalUsers": 12 })).expect("decode");
        assert_eq!(stats.total_users, 12);
        assert_eq!(stats.pending_orders, 0);
        assert_eq!(stats.total_revenue, Decimal::ZERO);
    }

    #[rstest]
    #[case::active("active", "bg-green-100 text-green-800")]
    #[case::suspended("suspended", "bg-gray-100 text-gray-800")]
    fn recent_user_status_colours(#[case] status: &str, #[case] expected: &str) {
        let user: RecentUser = serde_json::from_value(json!({
            "id": "u1",
            "name": "Ada",
            "email": "ada@example.com",
            "joinedAt": "2024-04-30",
            "status": status
        }))
        .expect("decode");
        assert_eq!(user.status_badge_color(), expected);
    }

    #[rstest]
    fn counts_unread(notifications: Vec<Notification>) {
        let overview = DashboardOverview {
            stats: DashboardStats::default(),
            recent_users: Vec::new(),
            popular_products: Vec::new(),
            notifications,
        };
        assert_eq!(overview.unread_count(), 2);
    }
}
