//! Harberger tax arithmetic shared by both slot variants.
//!
//! # Formulas
//!
//! ```text
//! bond            = valuation × bond_rate / 10_000
//! tax(seconds)    = valuation × annual_rate × seconds / (10_000 × SECONDS_PER_YEAR)
//! tax(periods)    = tax(tax_period × periods)
//! period_decay    = valuation − valuation × TAX_BASE / (TAX_BASE + annual_rate × tax_period)
//! ```
//!
//! Every intermediate product is computed in `u128` with checked operations;
//! every division truncates.  Overflow is reported as
//! [`SlotError::ArithmeticOverflow`]; nothing here wraps or saturates.

use {
    crate::{
        config::SlotConfig,
        constants::{BPS_DENOMINATOR, SECONDS_PER_YEAR, TAX_BASE},
        error::SlotError,
    },
    solana_clock::UnixTimestamp,
};

const BPS: u128 = BPS_DENOMINATOR as u128;

/// Collateral locked (enabled) or bonded (shielded) for a declared valuation.
pub fn bond_amount(valuation: u128, bond_rate_bps: u16) -> Result<u128, SlotError> {
    valuation
        .checked_mul(u128::from(bond_rate_bps))
        .map(|scaled| scaled / BPS)
        .ok_or(SlotError::ArithmeticOverflow)
}

/// Tax owed on `valuation` over an arbitrary number of seconds.
pub fn tax_for_duration(
    valuation: u128,
    seconds: u128,
    annual_tax_rate_bps: u16,
) -> Result<u128, SlotError> {
    let numerator = valuation
        .checked_mul(u128::from(annual_tax_rate_bps))
        .and_then(|v| v.checked_mul(seconds))
        .ok_or(SlotError::ArithmeticOverflow)?;
    Ok(numerator / (BPS * u128::from(SECONDS_PER_YEAR)))
}

/// Tax owed on `valuation` for `periods` whole tax periods.
///
/// This is the sizing used both for prepayment at claim/takeover/renew time
/// and for the prepaid balance the slot later drains.
pub fn tax_for_periods(
    valuation: u128,
    periods: u64,
    annual_tax_rate_bps: u16,
    tax_period_seconds: u64,
) -> Result<u128, SlotError> {
    let seconds = u128::from(tax_period_seconds)
        .checked_mul(u128::from(periods))
        .ok_or(SlotError::ArithmeticOverflow)?;
    tax_for_duration(valuation, seconds, annual_tax_rate_bps)
}

/// Portion of `valuation` consumed by one overdue tax period.
///
/// Erodes the valuation multiplicatively: successive periods charge less as
/// the valuation shrinks, and the charge never reaches the full valuation.
pub fn period_decay(
    valuation: u128,
    annual_tax_rate_bps: u16,
    tax_period_seconds: u64,
) -> Result<u128, SlotError> {
    let rate_term = u128::from(annual_tax_rate_bps)
        .checked_mul(u128::from(tax_period_seconds))
        .and_then(|v| v.checked_add(TAX_BASE))
        .ok_or(SlotError::ArithmeticOverflow)?;
    let retained = mul_div_floor(valuation, TAX_BASE, rate_term)?;
    Ok(valuation.saturating_sub(retained))
}

/// Smallest valuation a takeover bid must declare.
///
/// Rounds up so that the bid is never below the configured increment.
pub fn min_next_valuation(current: u128, min_bid_increment_bps: u16) -> Result<u128, SlotError> {
    let numerator = current
        .checked_mul(BPS + u128::from(min_bid_increment_bps))
        .ok_or(SlotError::ArithmeticOverflow)?;
    Ok(numerator.div_ceil(BPS))
}

/// Residual amount at or below which collateral is swept instead of kept.
pub fn dust_floor(amount: u128, dust_rate_bps: u16) -> Result<u128, SlotError> {
    bond_amount(amount, dust_rate_bps)
}

/// Part of the prepaid balance consumed between `last_settlement` and
/// `min(now, paid_until)`.
///
/// The prepaid balance covers the window `[last_settlement, paid_until]`
/// linearly; once `now` reaches `paid_until` the whole balance is due.
pub fn prepaid_accrual(
    prepaid: u128,
    last_settlement: UnixTimestamp,
    paid_until: UnixTimestamp,
    now: UnixTimestamp,
) -> Result<u128, SlotError> {
    if prepaid == 0 || now <= last_settlement {
        return Ok(0);
    }
    if now >= paid_until {
        return Ok(prepaid);
    }
    let elapsed = seconds_between(last_settlement, now)?;
    let window = seconds_between(last_settlement, paid_until)?;
    mul_div_floor(prepaid, elapsed, window)
}

/// Whole tax periods (rounded up) by which `now` has passed `paid_until`.
pub fn overdue_periods(
    paid_until: UnixTimestamp,
    now: UnixTimestamp,
    tax_period_seconds: u64,
) -> Result<u64, SlotError> {
    if now <= paid_until || tax_period_seconds == 0 {
        return Ok(0);
    }
    let late = seconds_between(paid_until, now)?;
    let periods = late.div_ceil(u128::from(tax_period_seconds));
    u64::try_from(periods).map_err(|_| SlotError::ArithmeticOverflow)
}

/// `start + tax_period_seconds × periods`, checked.
pub fn advance_by_periods(
    start: UnixTimestamp,
    tax_period_seconds: u64,
    periods: u64,
) -> Result<UnixTimestamp, SlotError> {
    let seconds = tax_period_seconds
        .checked_mul(periods)
        .and_then(|s| i64::try_from(s).ok())
        .ok_or(SlotError::ArithmeticOverflow)?;
    start
        .checked_add(seconds)
        .ok_or(SlotError::ArithmeticOverflow)
}

/// Payment a claim or takeover must attach: bond plus prepaid tax.
pub fn claim_cost(config: &SlotConfig, valuation: u128, periods: u64) -> Result<u128, SlotError> {
    let bond = bond_amount(valuation, config.bond_rate_bps)?;
    let tax = tax_for_periods(
        valuation,
        periods,
        config.annual_tax_rate_bps,
        config.tax_period_seconds,
    )?;
    bond.checked_add(tax).ok_or(SlotError::ArithmeticOverflow)
}

/// `floor(value × numerator / denominator)` without forming the full product.
///
/// Splits `value = q × denominator + r`, so only `r × numerator` (with
/// `r < denominator`) has to fit.
fn mul_div_floor(value: u128, numerator: u128, denominator: u128) -> Result<u128, SlotError> {
    if denominator == 0 {
        return Err(SlotError::ArithmeticOverflow);
    }
    let (quotient, remainder) = (value / denominator, value % denominator);
    let whole = quotient
        .checked_mul(numerator)
        .ok_or(SlotError::ArithmeticOverflow)?;
    let part = remainder
        .checked_mul(numerator)
        .ok_or(SlotError::ArithmeticOverflow)?
        / denominator;
    whole.checked_add(part).ok_or(SlotError::ArithmeticOverflow)
}

fn seconds_between(from: UnixTimestamp, to: UnixTimestamp) -> Result<u128, SlotError> {
    let delta = to.checked_sub(from).ok_or(SlotError::ArithmeticOverflow)?;
    u128::try_from(delta).map_err(|_| SlotError::ArithmeticOverflow)
}
