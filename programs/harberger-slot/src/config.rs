use {
    crate::{
        constants::{
            BPS_DENOMINATOR, DEFAULT_ANNUAL_TAX_RATE_BPS, DEFAULT_BOND_RATE_BPS,
            DEFAULT_CONTENT_UPDATE_LIMIT, DEFAULT_MIN_BID_INCREMENT_BPS,
            DEFAULT_TAX_PERIOD_SECONDS,
        },
        error::SlotError,
    },
    borsh::{BorshDeserialize, BorshSerialize},
    log::*,
    serde::{Deserialize, Serialize},
};

/// Immutable economic parameters of a slot, fixed when the factory deploys it.
///
/// Both variants share this set; the enabled variant additionally carries a
/// dust rate (see [`crate::state::EnabledSlot`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct SlotConfig {
    /// Collateral posted per unit of declared valuation, in basis points.
    pub bond_rate_bps: u16,

    /// Tax charged per year on the declared valuation, in basis points.
    pub annual_tax_rate_bps: u16,

    /// Minimum amount a takeover bid must exceed the current valuation by,
    /// in basis points of the current valuation.
    pub min_bid_increment_bps: u16,

    /// Length of one tax period.  Claims, takeovers and renewals prepay
    /// whole periods; overdue settlement charges whole periods.
    pub tax_period_seconds: u64,

    /// Smallest valuation a claimant may declare.
    pub min_valuation: u128,

    /// Creative updates allowed per ownership term.
    pub content_update_limit: u32,
}

impl SlotConfig {
    /// Check that the parameters describe a usable slot.
    pub fn validate(&self) -> Result<(), SlotError> {
        if self.bond_rate_bps == 0 || u64::from(self.bond_rate_bps) > BPS_DENOMINATOR {
            debug!("invalid slot config: bond_rate_bps {} outside 1..=10000", self.bond_rate_bps);
            return Err(SlotError::InvalidConfig);
        }
        if self.annual_tax_rate_bps == 0 {
            debug!("invalid slot config: annual_tax_rate_bps must be > 0");
            return Err(SlotError::InvalidConfig);
        }
        if self.tax_period_seconds == 0 || i64::try_from(self.tax_period_seconds).is_err() {
            debug!("invalid slot config: tax_period_seconds {}", self.tax_period_seconds);
            return Err(SlotError::InvalidConfig);
        }
        Ok(())
    }
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            bond_rate_bps: DEFAULT_BOND_RATE_BPS,             // 10 % of valuation
            annual_tax_rate_bps: DEFAULT_ANNUAL_TAX_RATE_BPS, // 80 % per year
            min_bid_increment_bps: DEFAULT_MIN_BID_INCREMENT_BPS,
            tax_period_seconds: DEFAULT_TAX_PERIOD_SECONDS, // one week
            min_valuation: 0,
            content_update_limit: DEFAULT_CONTENT_UPDATE_LIMIT,
        }
    }
}

/// Validate an enabled-variant dust rate.
pub fn validate_dust_rate(dust_rate_bps: u16) -> Result<(), SlotError> {
    if u64::from(dust_rate_bps) > BPS_DENOMINATOR {
        debug!("invalid slot config: dust_rate_bps {dust_rate_bps} above 10000");
        return Err(SlotError::InvalidConfig);
    }
    Ok(())
}
