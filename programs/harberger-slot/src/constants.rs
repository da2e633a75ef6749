//! Constants for the Harberger slot program.
//!
//! Rates are expressed in basis points, durations in seconds, amounts in the
//! settlement currency's smallest unit.

/// Basis points denominator (10_000 bps = 100%).
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Seconds per day.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Seconds per (non-leap) year, the horizon the annual tax rate refers to.
pub const SECONDS_PER_YEAR: u64 = 365 * SECONDS_PER_DAY;

/// Denominator of the per-period decay formula: `BPS_DENOMINATOR × SECONDS_PER_YEAR`.
pub const TAX_BASE: u128 = BPS_DENOMINATOR as u128 * SECONDS_PER_YEAR as u128;

// ---------------------------------------------------------------------------
// Default slot configuration
// ---------------------------------------------------------------------------

/// Default bond: 10% of the declared valuation.
pub const DEFAULT_BOND_RATE_BPS: u16 = 1_000;

/// Default annual tax: 80% of the declared valuation per year.
pub const DEFAULT_ANNUAL_TAX_RATE_BPS: u16 = 8_000;

/// Default minimum outbid increment: 10% above the current valuation.
pub const DEFAULT_MIN_BID_INCREMENT_BPS: u16 = 1_000;

/// Default tax period: one week.
pub const DEFAULT_TAX_PERIOD_SECONDS: u64 = 7 * SECONDS_PER_DAY;

/// Default number of creative updates allowed per ownership term.
pub const DEFAULT_CONTENT_UPDATE_LIMIT: u32 = 3;

/// Default dust threshold for the enabled variant: 1% of the term's face value.
pub const DEFAULT_DUST_RATE_BPS: u16 = 100;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum length of a creative reference (IPFS URI or inline data URI).
pub const MAX_AD_URI_LEN: usize = 1_024;

/// Upper bound on serialized instruction data.
pub const MAX_INSTRUCTION_DATA_LEN: u64 = 1_232;
