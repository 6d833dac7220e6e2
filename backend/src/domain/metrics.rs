//! Spending summary derived from a user's transaction history.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use super::ids::UserId;
use super::money;

/// Label reported when no category can be named.
pub const NO_CATEGORY: &str = "None";
/// Spend above which a user is [`UserTier::Gold`].
pub const GOLD_THRESHOLD: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);
/// Spend above which a user is [`UserTier::Platinum`].
pub const PLATINUM_THRESHOLD: Decimal = Decimal::from_parts(10000, 0, 0, false, 0);

/// One purchase made by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction identifier.
    pub id: String,
    /// Amount spent.
    pub amount: Decimal,
    /// Free-form category label.
    pub category: String,
    /// Owning user.
    pub user_id: UserId,
}

/// The account fields metrics read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    /// Account identifier.
    pub id: UserId,
    /// Cumulative spend; absent in the payload means nothing spent yet.
    #[serde(default)]
    pub total_spent: Decimal,
    /// Display name, when the API includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Loyalty classification derived from cumulative spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserTier {
    /// Default tier.
    Silver,
    /// Spend above 5000.
    Gold,
    /// Spend above 10000.
    Platinum,
}

impl UserTier {
    /// Tier for a cumulative spend. Thresholds are exclusive.
    ///
    /// # Examples
    /// ```
    /// use rust_decimal::Decimal;
    /// use storefront::domain::UserTier;
    ///
    /// assert_eq!(UserTier::for_spend(Decimal::from(5000)), UserTier::Silver);
    /// assert_eq!(UserTier::for_spend(Decimal::from(5001)), UserTier::Gold);
    /// ```
    #[must_use]
    pub fn for_spend(total_spent: Decimal) -> Self {
        if total_spent > PLATINUM_THRESHOLD {
            Self::Platinum
        } else if total_spent > GOLD_THRESHOLD {
            Self::Gold
        } else {
            Self::Silver
        }
    }

    /// Tier label as rendered.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
        }
    }

    /// Presentation colour token for the tier badge.
    #[must_use]
    pub fn badge_color(self) -> &'static str {
        match self {
            Self::Platinum => "bg-purple-200 text-purple-800",
            Self::Gold => "bg-yellow-200 text-yellow-800",
            Self::Silver => "bg-gray-200 text-gray-800",
        }
    }
}

impl fmt::Display for UserTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mean transaction amount.
///
/// Serialises as the number `0` when there were no transactions and as
/// two-decimal text (`"42.50"`) otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AverageSpend {
    /// No transactions to average.
    NoTransactions,
    /// Mean rounded to cents.
    Amount(Decimal),
}

impl fmt::Display for AverageSpend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTransactions => f.write_str("0"),
            Self::Amount(amount) => f.write_str(&money::format_amount(*amount)),
        }
    }
}

impl Serialize for AverageSpend {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::NoTransactions => serializer.serialize_u8(0),
            Self::Amount(amount) => money::serialize_two_decimals(amount, serializer),
        }
    }
}

/// Summary statistics for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMetrics {
    /// Mean transaction amount.
    pub average_spend: AverageSpend,
    /// Most frequent category, or [`NO_CATEGORY`].
    pub top_category: String,
    /// Loyalty tier.
    pub user_tier: UserTier,
}

impl UserMetrics {
    /// Metrics reported for an empty history.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            average_spend: AverageSpend::NoTransactions,
            top_category: NO_CATEGORY.to_owned(),
            user_tier: UserTier::Silver,
        }
    }
}

/// Derive average spend, top category, and tier.
///
/// An empty history yields [`UserMetrics::empty`] without looking at `user`.
/// An absent user counts as zero spend. Histories whose total exceeds the
/// `Decimal` range still produce a mean.
///
/// # Examples
/// ```
/// use storefront::domain::{calculate_user_metrics, UserMetrics};
///
/// assert_eq!(calculate_user_metrics(&[], None), UserMetrics::empty());
/// ```
#[must_use]
pub fn calculate_user_metrics(
    transactions: &[Transaction],
    user: Option<&UserAccount>,
) -> UserMetrics {
    let Some(mean) = money::mean(transactions.iter().map(|t| t.amount)) else {
        return UserMetrics::empty();
    };
    let total_spent = user.map_or(Decimal::ZERO, |account| account.total_spent);

    UserMetrics {
        average_spend: AverageSpend::Amount(money::round_to_cents(mean)),
        top_category: top_category(transactions),
        user_tier: UserTier::for_spend(total_spent),
    }
}

/// Most frequent category. Ties go to the category seen first; an empty
/// winning label is reported as [`NO_CATEGORY`].
fn top_category(transactions: &[Transaction]) -> String {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut tallies: Vec<(&str, usize)> = Vec::new();
    for transaction in transactions {
        let category = transaction.category.as_str();
        let slot = *slots.entry(category).or_insert_with(|| {
            tallies.push((category, 0));
            tallies.len() - 1
        });
        if let Some((_, count)) = tallies.get_mut(slot) {
            *count += 1;
        }
    }

    tallies
        .into_iter()
        .reduce(|best, next| if next.1 > best.1 { next } else { best })
        .map(|(category, _)| category)
        .filter(|category| !category.is_empty())
        .unwrap_or(NO_CATEGORY)
        .to_owned()
}
