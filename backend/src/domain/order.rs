//! Order records and the pure query helpers the orders dashboard uses.
//!
//! Nothing here performs I/O. Orders arrive already fetched; a new fetch
//! replaces the whole collection, so helpers return fresh vectors and never
//! mutate their input.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::{IdentifierValidationError, OrderId};
use super::money;

/// Lifecycle label of an order.
///
/// Only `completed`, `processing`, and `shipped` are interpreted; any other
/// label is kept verbatim in [`OrderStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    /// Delivered and paid.
    Completed,
    /// Accepted but not yet dispatched.
    Processing,
    /// Handed to the carrier.
    Shipped,
    /// Any label the dashboard does not interpret.
    Other(String),
}

impl OrderStatus {
    /// Wire label for this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => "completed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Other(label) => label.as_str(),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        match value {
            "completed" => Self::Completed,
            "processing" => Self::Processing,
            "shipped" => Self::Shipped,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "completed" | "processing" | "shipped" => Self::from(value.as_str()),
            _ => Self::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::Other(label) => label,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors raised while building an [`Order`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderValidationError {
    /// The order identifier is unusable.
    Id(IdentifierValidationError),
    /// The total was below zero.
    NegativeTotal {
        /// Rejected total.
        total: Decimal,
    },
    /// The date was neither RFC 3339 nor `YYYY-MM-DD`.
    InvalidDate {
        /// Parser message.
        message: String,
    },
}

impl fmt::Display for OrderValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(err) => err.fmt(f),
            Self::NegativeTotal { total } => {
                write!(f, "order total must not be negative (got {total})")
            }
            Self::InvalidDate { message } => write!(f, "order date is invalid: {message}"),
        }
    }
}

impl std::error::Error for OrderValidationError {}

impl From<IdentifierValidationError> for OrderValidationError {
    fn from(value: IdentifierValidationError) -> Self {
        Self::Id(value)
    }
}

/// One order as served by the storefront API.
///
/// ## Invariants
/// - `total` is never negative.
///
/// Serialised in camelCase (`customerName`, `customerEmail`); `date` accepts
/// RFC 3339 timestamps or bare `YYYY-MM-DD` dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OrderDto", into = "OrderDto")]
pub struct Order {
    id: OrderId,
    status: OrderStatus,
    date: DateTime<Utc>,
    total: Decimal,
    customer_name: String,
    customer_email: String,
}

/// Customer contact attached to an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Display name.
    pub name: String,
    /// Contact email; also the key for counting unique customers.
    pub email: String,
}

impl Order {
    /// Build an order, rejecting negative totals.
    pub fn new(
        id: OrderId,
        status: OrderStatus,
        date: DateTime<Utc>,
        total: Decimal,
        customer: Customer,
    ) -> Result<Self, OrderValidationError> {
        if total < Decimal::ZERO {
            return Err(OrderValidationError::NegativeTotal { total });
        }
        Ok(Self {
            id,
            status,
            date,
            total,
            customer_name: customer.name,
            customer_email: customer.email,
        })
    }

    /// Order identifier.
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// Lifecycle status.
    pub fn status(&self) -> &OrderStatus {
        &self.status
    }

    /// Placement timestamp.
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Order total.
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Customer display name.
    pub fn customer_name(&self) -> &str {
        self.customer_name.as_str()
    }

    /// Customer email.
    pub fn customer_email(&self) -> &str {
        self.customer_email.as_str()
    }

    /// Whether the order can still be marked as shipped.
    pub fn is_shippable(&self) -> bool {
        self.status != OrderStatus::Shipped
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderDto {
    id: String,
    status: String,
    date: String,
    total: Decimal,
    customer_name: String,
    customer_email: String,
}

impl From<Order> for OrderDto {
    fn from(value: Order) -> Self {
        Self {
            id: value.id.into(),
            status: value.status.into(),
            date: value.date.to_rfc3339(),
            total: value.total,
            customer_name: value.customer_name,
            customer_email: value.customer_email,
        }
    }
}

impl TryFrom<OrderDto> for Order {
    type Error = OrderValidationError;

    fn try_from(value: OrderDto) -> Result<Self, Self::Error> {
        let OrderDto {
            id,
            status,
            date,
            total,
            customer_name,
            customer_email,
        } = value;

        let date = super::parse_timestamp(&date)
            .map_err(|message| OrderValidationError::InvalidDate { message })?;
        Self::new(
            OrderId::try_from(id)?,
            OrderStatus::from(status),
            date,
            total,
            Customer {
                name: customer_name,
                email: customer_email,
            },
        )
    }
}

/// Which orders a status filter keeps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Keep every order.
    #[default]
    All,
    /// Keep orders whose status equals this one.
    Only(OrderStatus),
}

impl StatusFilter {
    /// Parse a filter label. Total: `all` and unrecognised labels keep
    /// every order.
    ///
    /// # Examples
    /// ```
    /// use storefront::domain::{OrderStatus, StatusFilter};
    ///
    /// assert_eq!(StatusFilter::parse("shipped"), StatusFilter::Only(OrderStatus::Shipped));
    /// assert_eq!(StatusFilter::parse("cancelled"), StatusFilter::All);
    /// ```
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match OrderStatus::from(label) {
            OrderStatus::Other(_) => Self::All,
            status => Self::Only(status),
        }
    }

    fn keeps(&self, order: &Order) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => order.status() == status,
        }
    }
}

/// Ordering applied to the dashboard table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Newest first.
    #[default]
    Date,
    /// Largest total first.
    Total,
    /// Keep the fetched order.
    Unsorted,
}

impl SortKey {
    /// Parse a sort label. Total: anything other than `date` or `total` is
    /// [`SortKey::Unsorted`].
    #[must_use]
    pub fn parse(label: &str) -> Self {
        match label {
            "date" => Self::Date,
            "total" => Self::Total,
            _ => Self::Unsorted,
        }
    }
}

/// Keep the orders matching `filter`, preserving their relative order.
///
/// # Examples
/// ```
/// use storefront::domain::{filter_orders, StatusFilter};
///
/// assert!(filter_orders(&[], &StatusFilter::All).is_empty());
/// ```
#[must_use]
pub fn filter_orders(orders: &[Order], filter: &StatusFilter) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| filter.keeps(order))
        .cloned()
        .collect()
}

/// Return a sorted copy of `orders`, descending by the chosen key.
///
/// Equal keys keep their input order.
#[must_use]
pub fn sort_orders(orders: &[Order], key: SortKey) -> Vec<Order> {
    let mut sorted = orders.to_vec();
    match key {
        SortKey::Date => sorted.sort_by(|a, b| b.date.cmp(&a.date)),
        SortKey::Total => sorted.sort_by(|a, b| b.total.cmp(&a.total)),
        SortKey::Unsorted => {}
    }
    sorted
}

/// Presentation colour token for a status badge.
#[must_use]
pub fn status_badge_color(status: &OrderStatus) -> &'static str {
    match status {
        OrderStatus::Completed => "bg-green-100 text-green-800",
        OrderStatus::Processing => "bg-yellow-100 text-yellow-800",
        OrderStatus::Shipped | OrderStatus::Other(_) => "bg-blue-100 text-blue-800",
    }
}

/// Headline figures shown above the orders table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Number of fetched orders.
    pub total_orders: usize,
    /// Sum of all order totals, clamped to `Decimal::MAX`.
    #[serde(serialize_with = "money::serialize_two_decimals")]
    pub total_revenue: Decimal,
    /// Distinct customer emails.
    pub unique_customers: usize,
}

/// Summarise the whole fetched collection, ignoring any active filter.
///
/// Revenue past the `Decimal` range is clamped to `Decimal::MAX`.
#[must_use]
pub fn summarize_orders(orders: &[Order]) -> OrderSummary {
    let unique_customers = orders
        .iter()
        .map(Order::customer_email)
        .collect::<HashSet<_>>()
        .len();
    OrderSummary {
        total_orders: orders.len(),
        total_revenue: money::saturating_total(orders.iter().map(Order::total)),
        unique_customers,
    }
}

/// Everything the orders dashboard renders, computed from one fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersDashboard {
    /// Figures over the unfiltered collection.
    pub summary: OrderSummary,
    /// Filtered, then sorted, rows.
    pub orders: Vec<Order>,
}

impl OrdersDashboard {
    /// Summarise `orders`, then filter and sort the rows.
    #[must_use]
    pub fn build(orders: &[Order], filter: &StatusFilter, sort: SortKey) -> Self {
        Self {
            summary: summarize_orders(orders),
            orders: sort_orders(&filter_orders(orders, filter), sort),
        }
    }
}
