//! Loads a user and their transactions, then derives spending metrics.

use std::sync::Arc;

use futures_util::future::join;
use serde::Serialize;

use crate::domain::ports::ApiClient;
use crate::domain::{
    Envelope, Transaction, UserAccount, UserId, UserMetrics, calculate_user_metrics,
};

/// Account, history, and the metrics derived from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatistics {
    /// The account as served.
    pub user: UserAccount,
    /// The account's transactions.
    pub transactions: Vec<Transaction>,
    /// Summary over `transactions`.
    pub metrics: UserMetrics,
}

/// Loader for the user statistics card.
#[derive(Clone)]
pub struct UserStatisticsService<C> {
    client: Arc<C>,
}

impl<C> UserStatisticsService<C> {
    /// Create a new statistics loader over the API client.
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C> UserStatisticsService<C>
where
    C: ApiClient,
{
    /// Fetch the account and its transactions concurrently.
    ///
    /// If either request fails the whole load fails with that error; the
    /// account's failure is reported when both fail.
    pub async fn load(&self, user_id: &UserId) -> Envelope<UserStatistics> {
        let user_path = format!("/users/{user_id}");
        let transactions_path = format!("/transactions?userId={user_id}");
        let (user, transactions) = join(
            self.client.get(&user_path),
            self.client.get(&transactions_path),
        )
        .await;

        user.decode::<UserAccount>().and_then(|user| {
            transactions
                .decode::<Vec<Transaction>>()
                .map(|transactions| {
                    let metrics = calculate_user_metrics(&transactions, Some(&user));
                    UserStatistics {
                        user,
                        transactions,
                        metrics,
                    }
                })
        })
    }
}

#[cfg(test)]
#[path = "user_statistics_service_tests.rs"]
mod tests;
