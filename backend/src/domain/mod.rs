//! Domain types, pure transforms, and loaders.
//!
//! Order and metrics transforms do no I/O. Network calls go through the
//! [`ports::ApiClient`] port, and loaders return an [`Envelope`] instead of
//! an error.
//!
//! Public surface:
//! - Order helpers: `filter_orders`, `sort_orders`, `status_badge_color`,
//!   `summarize_orders`.
//! - Metrics: `calculate_user_metrics` and its `UserMetrics` result.
//! - Loaders: `OrdersService`, `UserStatisticsService`, `ProfileService`,
//!   `DashboardService`.

pub mod dashboard;
pub mod dashboard_service;
pub mod envelope;
pub mod ids;
pub mod metrics;
pub mod money;
pub mod order;
pub mod orders_service;
pub mod ports;
pub mod profile_service;
pub mod timestamp;
pub mod user;
pub mod user_statistics_service;

pub use self::dashboard::{
    DashboardOverview, DashboardStats, Notification, PopularProduct, RecentUser,
    mark_notification_read,
};
pub use self::dashboard_service::DashboardService;
pub use self::envelope::Envelope;
pub use self::ids::{IdentifierValidationError, NotificationId, OrderId, UserId};
pub use self::metrics::{
    AverageSpend, Transaction, UserAccount, UserMetrics, UserTier, calculate_user_metrics,
};
pub use self::money::format_amount;
pub use self::order::{
    Customer, Order, OrderStatus, OrderSummary, OrderValidationError, OrdersDashboard, SortKey,
    StatusFilter, filter_orders, sort_orders, status_badge_color, summarize_orders,
};
pub use self::orders_service::OrdersService;
pub use self::profile_service::ProfileService;
pub use self::timestamp::parse_timestamp;
pub use self::user::{ProfileUpdate, UserProfile};
pub use self::user_statistics_service::{UserStatistics, UserStatisticsService};
