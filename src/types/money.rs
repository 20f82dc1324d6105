use rust_decimal::{Decimal, RoundingStrategy};

pub const MONEY_SCALE: u32 = 2;

/// Converts an amount to integer cents, rejecting values with more than two
/// decimal places or more than `max_digits` significant digits.
pub fn to_cents(value: Decimal, max_digits: u32) -> Option<i64> {
    let normalized = value.normalize();
    if normalized.scale() > MONEY_SCALE {
        return None;
    }
    let mut scaled = normalized;
    scaled.rescale(MONEY_SCALE);
    let cents = i64::try_from(scaled.mantissa()).ok()?;
    let limit = 10i64.checked_pow(max_digits)?;
    if cents.abs() >= limit {
        return None;
    }
    Some(cents)
}

pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, MONEY_SCALE)
}

/// Rounds half away from zero and pins the scale so `20` renders as `20.00`.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}
