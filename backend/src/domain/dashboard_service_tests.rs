//! Tests for the dashboard overview loader.

use std::sync::Arc;

use serde_json::{Value, json};

use super::*;
use crate::domain::ports::MockApiClient;

fn expect_panel(client: &mut MockApiClient, path: &'static str, response: Envelope<Value>) {
    client
        .expect_get()
        .withf(move |requested: &str| requested == path)
        .times(1)
        .return_once(move |_| response);
}

fn notifications_json() -> Value {
    json!([
        { "id": "n1", "message": "Low stock", "read": false, "date": "2024-05-01T08:00:00Z" },
        { "id": "n2", "message": "New review", "read": true, "date": "2024-05-02T08:00:00Z" }
    ])
}

fn healthy_client() -> MockApiClient {
    let mut client = MockApiClient::new();
    expect_panel(
        &mut client,
        "/dashboard/stats",
        Envelope::success(json!({
            "totalUsers": 120, "activeUsers": 80, "totalRevenue": 15234.5, "pendingOrders": 4
        })),
    );
    expect_panel(
        &mut client,
        "/users/recent",
        Envelope::success(json!([{
            "id": "u9", "name": "Grace", "email": "grace@example.com",
            "joinedAt": "2024-04-28T12:00:00Z", "status": "active"
        }])),
    );
    expect_panel(
        &mut client,
        "/products/popular",
        Envelope::success(json!([{ "id": "p1", "name": "Desk lamp", "price": 39.99, "sales": 210 }])),
    );
    expect_panel(
        &mut client,
        "/notifications",
        Envelope::success(notifications_json()),
    );
    client
}

#[tokio::test]
async fn loads_all_panels() {
    let overview = DashboardService::new(Arc::new(healthy_client()))
        .load_overview()
        .await
        .into_result()
        .expect("overview should load");

    assert_eq!(overview.stats.total_users, 120);
    assert_eq!(overview.recent_users.len(), 1);
    assert_eq!(
        overview.popular_products.first().map(|p| p.sales),
        Some(210)
    );
    assert_eq!(overview.unread_count(), 1);
}

#[tokio::test]
async fn one_failing_panel_fails_the_overview() {
    let mut client = MockApiClient::new();
    expect_panel(&mut client, "/dashboard/stats", Envelope::success(json!({})));
    expect_panel(&mut client, "/users/recent", Envelope::success(json!([])));
    expect_panel(
        &mut client,
        "/products/popular",
        Envelope::failure("request failed with status 502: bad gateway"),
    );
    expect_panel(&mut client, "/notifications", Envelope::success(json!([])));

    let overview = DashboardService::new(Arc::new(client))
        .load_overview()
        .await;

    assert_eq!(
        overview.error(),
        Some("request failed with status 502: bad gateway")
    );
}

#[tokio::test]
async fn notifications_load_without_the_other_panels() {
    let mut client = MockApiClient::new();
    expect_panel(
        &mut client,
        "/notifications",
        Envelope::success(notifications_json()),
    );

    let notifications = DashboardService::new(Arc::new(client))
        .load_notifications()
        .await
        .into_result()
        .expect("notifications should load");

    let ids: Vec<&str> = notifications.iter().map(|n| n.id.as_ref()).collect();
    assert_eq!(ids, ["n1", "n2"]);
}

#[tokio::test]
async fn notifications_failure_is_reported() {
    let mut client = MockApiClient::new();
    expect_panel(
        &mut client,
        "/notifications",
        Envelope::failure("request failed with status 503: maintenance"),
    );

    let result = DashboardService::new(Arc::new(client))
        .load_notifications()
        .await;

    assert_eq!(
        result.error(),
        Some("request failed with status 503: maintenance")
    );
}

#[tokio::test]
async fn mark_read_updates_list_after_acknowledgement() {
    let mut client = MockApiClient::new();
    client
        .expect_put()
        .withf(|path: &str, _body: &Value| path == "/notifications/n1/read")
        .times(1)
        .return_once(|_, _| Envelope::success(Value::Null));

    let notifications: Vec<Notification> =
        serde_json::from_value(notifications_json()).expect("fixture");
    let id = NotificationId::new("n1").expect("id");
    let updated = DashboardService::new(Arc::new(client))
        .mark_notification_read(&notifications, &id)
        .await
        .into_result()
        .expect("acknowledgement should succeed");

    assert!(updated.iter().all(|n| n.read));
}

#[tokio::test]
async fn mark_read_failure_marks_nothing() {
    let mut client = MockApiClient::new();
    client
        .expect_put()
        .return_once(|_, _| Envelope::failure("network request failed: timed out"));

    let notifications: Vec<Notification> =
        serde_json::from_value(notifications_json()).expect("fixture");
    let id = NotificationId::new("n1").expect("id");
    let result = DashboardService::new(Arc::new(client))
        .mark_notification_read(&notifications, &id)
        .await;

    assert_eq!(result.error(), Some("network request failed: timed out"));
}
