//! Two-decimal rendering of monetary amounts.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serializer;

/// Round to cents, half away from zero.
#[must_use]
pub fn round_to_cents(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Render an amount with exactly two decimals (`42.5` becomes `"42.50"`).
///
/// # Examples
/// ```
/// use rust_decimal::Decimal;
/// use storefront::domain::format_amount;
///
/// assert_eq!(format_amount(Decimal::new(425, 1)), "42.50");
/// assert_eq!(format_amount(Decimal::from(7)), "7.00");
/// ```
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    round_to_cents(amount).to_string()
}

/// Sum of `amounts`, clamped to `Decimal::MAX`/`Decimal::MIN` on overflow.
#[must_use]
pub fn saturating_total<I>(amounts: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Mean of `amounts`, or `None` when there are none.
///
/// The total is summed exactly when it fits in a `Decimal`. Otherwise each
/// amount is divided by the count first, so the mean is still produced.
///
/// # Examples
/// ```
/// use rust_decimal::Decimal;
/// use storefront::domain::money::mean;
///
/// assert_eq!(mean([Decimal::from(3), Decimal::from(5)]), Some(Decimal::from(4)));
/// assert_eq!(mean(Vec::<Decimal>::new()), None);
/// ```
#[must_use]
pub fn mean<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
    I::IntoIter: Clone,
{
    let amounts = amounts.into_iter();
    let count = Decimal::from(amounts.clone().count());
    if count.is_zero() {
        return None;
    }
    match amounts.clone().try_fold(Decimal::ZERO, Decimal::checked_add) {
        Some(total) => total.checked_div(count),
        None => amounts
            .map(|amount| amount.checked_div(count))
            .try_fold(Decimal::ZERO, |acc, share| share.map(|share| acc.saturating_add(share))),
    }
}

pub(crate) fn serialize_two_decimals<S>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_amount(*amount))
}
