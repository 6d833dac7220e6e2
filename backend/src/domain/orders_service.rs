//! Orders loader and order actions.
//!
//! Fetching lives here; filtering, sorting, and summarising stay in
//! [`crate::domain::order`] so they can run without a network.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::debug;

use crate::domain::ports::{ApiClient, ApiError};
use crate::domain::{Envelope, Order, OrderId, OrdersDashboard, SortKey, StatusFilter};

const ORDERS_PATH: &str = "/orders";

/// Loads orders and performs per-order actions through an [`ApiClient`].
#[derive(Clone)]
pub struct OrdersService<C> {
    client: Arc<C>,
}

impl<C> OrdersService<C> {
    /// Create a new orders service over the API client.
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C> OrdersService<C>
where
    C: ApiClient,
{
    /// Fetch the full order collection.
    pub async fn load_orders(&self) -> Envelope<Vec<Order>> {
        let orders = self.client.get(ORDERS_PATH).await.decode::<Vec<Order>>();
        if let Some(loaded) = orders.value() {
            debug!(count = loaded.len(), "orders loaded");
        }
        orders
    }

    /// Fetch orders and shape them for the dashboard.
    pub async fn load_dashboard(
        &self,
        filter: &StatusFilter,
        sort: SortKey,
    ) -> Envelope<OrdersDashboard> {
        self.load_orders()
            .await
            .map(|orders| OrdersDashboard::build(&orders, filter, sort))
    }

    /// Ask the API to email the customer a reminder about `order_id`.
    pub async fn send_reminder(&self, order_id: &OrderId) -> Envelope<Value> {
        self.client
            .post(&format!("{ORDERS_PATH}/{order_id}/send-reminder"), &json!({}))
            .await
    }

    /// Mark `order` as shipped.
    ///
    /// Orders that are already shipped are rejected without a request.
    pub async fn mark_as_shipped(&self, order: &Order) -> Envelope<Value> {
        if !order.is_shippable() {
            return Envelope::failure(
                ApiError::validation(format!("order {} is already shipped", order.id()))
                    .to_string(),
            );
        }
        self.client
            .put(
                &format!("{ORDERS_PATH}/{}", order.id()),
                &json!({ "status": "shipped" }),
            )
            .await
    }
}

#[cfg(test)]
#[path = "orders_service_tests.rs"]
mod tests;
