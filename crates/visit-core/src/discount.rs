//! Discount Calculator
//!
//! Flat percentage discount on a purchase amount.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Discount applied to every purchase, in percent
pub const DISCOUNT_PERCENT: u32 = 5;

/// Monetary fields are rounded to cents
const MONEY_DP: u32 = 2;

/// Result of applying a discount to a purchase amount
///
/// Field names on the wire match the JSON returned by `POST /calcular`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountResult {
    /// Discount percentage applied
    #[serde(rename = "descuento_pct")]
    pub percentage: u32,

    /// Amount taken off the purchase
    #[serde(rename = "descuento_monto", with = "rust_decimal::serde::float")]
    pub discount: Decimal,

    /// Amount left to pay
    #[serde(rename = "total_final", with = "rust_decimal::serde::float")]
    pub total: Decimal,

    /// Purchase amount after clamping negatives to zero
    #[serde(rename = "monto_original", with = "rust_decimal::serde::float")]
    pub original_amount: Decimal,
}

/// Discount percentage currently in effect.
pub const fn percentage() -> u32 {
    DISCOUNT_PERCENT
}

/// Compute the discount and final total for `amount`.
///
/// Negative amounts are treated as zero. `percentage` defaults to
/// [`percentage()`]. Money is rounded to two decimals with banker's rounding.
/// Amounts near `Decimal::MAX` never overflow; the discount saturates.
pub fn compute(amount: Decimal, percentage: Option<u32>) -> DiscountResult {
    let percentage = percentage.unwrap_or(DISCOUNT_PERCENT);
    let amount = amount.max(Decimal::ZERO);

    let rate = Decimal::from(percentage) / Decimal::ONE_HUNDRED;
    let discount = amount.checked_mul(rate).unwrap_or_else(|| {
        (amount / Decimal::ONE_HUNDRED).saturating_mul(Decimal::from(percentage))
    });
    let total = amount.saturating_sub(discount);

    DiscountResult {
        percentage,
        discount: discount.round_dp(MONEY_DP),
        total: total.round_dp(MONEY_DP),
        original_amount: amount.round_dp(MONEY_DP),
    }
}
