//! The lifecycle interface shared by both slot variants.

use {
    crate::{
        config::SlotConfig,
        constants::MAX_AD_URI_LEN,
        context::InvokeContext,
        error::SlotError,
        state::{EnabledSlot, ShieldedSlot},
        tax::{bond_amount, tax_for_periods},
    },
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
    solana_clock::{Clock, UnixTimestamp},
    solana_pubkey::Pubkey,
};

/// Which variant a slot is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    BorshSerialize, BorshDeserialize,
)]
pub enum SlotType {
    /// Bond-erosion variant.
    ValuationTaxEnabled,
    /// Bond-forfeiture variant.
    ValuationTaxShielded,
}

/// What one settlement pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Settlement {
    /// Tax forwarded to the treasury (prepaid drain plus overdue charges).
    pub tax_collected: u128,
    /// Residual collateral swept to the treasury when the slot was vacated.
    pub swept: u128,
    /// Overdue periods charged against collateral.
    pub periods_charged: u64,
    /// Whether settlement returned the slot to vacant.
    pub forfeited: bool,
}

/// Claim / takeover / renew / poke / forfeit lifecycle of a Harberger slot.
///
/// Every mutating operation settles accrued tax first, so the effective
/// state never depends on whether someone poked in between.
pub trait HarbergerSlot: Clone {
    fn slot_type(&self) -> SlotType;
    fn address(&self) -> Pubkey;
    fn treasury(&self) -> Pubkey;
    fn config(&self) -> &SlotConfig;
    fn current_owner(&self) -> Option<Pubkey>;
    fn valuation(&self) -> u128;
    fn prepaid_tax_balance(&self) -> u128;
    fn tax_paid_until(&self) -> UnixTimestamp;

    /// Funds the escrow must hold for the current state (collateral plus
    /// prepaid tax).
    fn escrow_balance(&self) -> Result<u128, SlotError>;

    /// Settle tax accrued up to `ctx.now()`, forwarding it to the treasury.
    fn settle(&mut self, ctx: &mut InvokeContext) -> Result<Settlement, SlotError>;

    fn claim(
        &mut self,
        ctx: &mut InvokeContext,
        valuation: u128,
        periods: u64,
        ad_uri: String,
    ) -> Result<(), SlotError>;

    fn take_over(
        &mut self,
        ctx: &mut InvokeContext,
        valuation: u128,
        periods: u64,
        ad_uri: String,
    ) -> Result<(), SlotError>;

    fn renew(&mut self, ctx: &mut InvokeContext, periods: u64) -> Result<(), SlotError>;

    fn forfeit(&mut self, ctx: &mut InvokeContext) -> Result<(), SlotError>;

    fn update_ad_uri(&mut self, ctx: &mut InvokeContext, ad_uri: String)
        -> Result<(), SlotError>;

    /// Permissionless settlement tick.
    fn poke(&mut self, ctx: &mut InvokeContext) -> Result<Settlement, SlotError> {
        ctx.reject_payment()?;
        self.settle(ctx)
    }

    /// State a `poke` at `now` would produce, without touching `self`.
    fn preview(&self, now: UnixTimestamp) -> Result<(Self, Settlement), SlotError> {
        let mut projected = self.clone();
        let clock = Clock {
            unix_timestamp: now,
            ..Clock::default()
        };
        let mut ctx = InvokeContext::new(Pubkey::default(), 0, clock);
        let settlement = projected.settle(&mut ctx)?;
        Ok((projected, settlement))
    }
}

/// Validate a new ownership term and price it.  Returns `(bond, prepaid_tax)`.
pub(crate) fn price_term(
    config: &SlotConfig,
    valuation: u128,
    periods: u64,
    ad_uri: &str,
) -> Result<(u128, u128), SlotError> {
    if periods == 0 {
        return Err(SlotError::ZeroPeriods);
    }
    if ad_uri.len() > MAX_AD_URI_LEN {
        return Err(SlotError::AdUriTooLong);
    }
    let bond = bond_amount(valuation, config.bond_rate_bps)?;
    if valuation < config.min_valuation || bond == 0 {
        return Err(SlotError::ValuationBelowMinimum);
    }
    let tax = tax_for_periods(
        valuation,
        periods,
        config.annual_tax_rate_bps,
        config.tax_period_seconds,
    )?;
    Ok((bond, tax))
}

/// A deployed slot of either variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Enabled(EnabledSlot),
    Shielded(ShieldedSlot),
}

macro_rules! delegate {
    ($self:expr, $slot:ident => $body:expr) => {
        match $self {
            Slot::Enabled($slot) => $body,
            Slot::Shielded($slot) => $body,
        }
    };
}

impl Slot {
    /// Serialise into account data (discriminator selects the variant).
    pub fn serialize_into(&self, data: &mut [u8]) -> Result<(), std::io::Error> {
        delegate!(self, slot => slot.serialize_into(data))
    }

    /// Deserialise account data of either variant.
    pub fn deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        match data.first() {
            Some(&crate::state::ENABLED_SLOT_DISCRIMINATOR) => {
                EnabledSlot::deserialize(data).map(Slot::Enabled)
            }
            _ => ShieldedSlot::deserialize(data).map(Slot::Shielded),
        }
    }

    pub fn as_enabled(&self) -> Option<&EnabledSlot> {
        match self {
            Slot::Enabled(slot) => Some(slot),
            Slot::Shielded(_) => None,
        }
    }

    pub fn as_shielded(&self) -> Option<&ShieldedSlot> {
        match self {
            Slot::Shielded(slot) => Some(slot),
            Slot::Enabled(_) => None,
        }
    }
}

impl HarbergerSlot for Slot {
    fn slot_type(&self) -> SlotType {
        delegate!(self, slot => slot.slot_type())
    }

    fn address(&self) -> Pubkey {
        delegate!(self, slot => slot.address())
    }

    fn treasury(&self) -> Pubkey {
        delegate!(self, slot => slot.treasury())
    }

    fn config(&self) -> &SlotConfig {
        delegate!(self, slot => HarbergerSlot::config(slot))
    }

    fn current_owner(&self) -> Option<Pubkey> {
        delegate!(self, slot => slot.current_owner())
    }

    fn valuation(&self) -> u128 {
        delegate!(self, slot => slot.valuation())
    }

    fn prepaid_tax_balance(&self) -> u128 {
        delegate!(self, slot => slot.prepaid_tax_balance())
    }

    fn tax_paid_until(&self) -> UnixTimestamp {
        delegate!(self, slot => slot.tax_paid_until())
    }

    fn escrow_balance(&self) -> Result<u128, SlotError> {
        delegate!(self, slot => slot.escrow_balance())
    }

    fn settle(&mut self, ctx: &mut InvokeContext) -> Result<Settlement, SlotError> {
        delegate!(self, slot => slot.settle(ctx))
    }

    fn claim(
        &mut self,
        ctx: &mut InvokeContext,
        valuation: u128,
        periods: u64,
        ad_uri: String,
    ) -> Result<(), SlotError> {
        delegate!(self, slot => slot.claim(ctx, valuation, periods, ad_uri))
    }

    fn take_over(
        &mut self,
        ctx: &mut InvokeContext,
        valuation: u128,
        periods: u64,
        ad_uri: String,
    ) -> Result<(), SlotError> {
        delegate!(self, slot => slot.take_over(ctx, valuation, periods, ad_uri))
    }

    fn renew(&mut self, ctx: &mut InvokeContext, periods: u64) -> Result<(), SlotError> {
        delegate!(self, slot => slot.renew(ctx, periods))
    }

    fn forfeit(&mut self, ctx: &mut InvokeContext) -> Result<(), SlotError> {
        delegate!(self, slot => slot.forfeit(ctx))
    }

    fn update_ad_uri(
        &mut self,
        ctx: &mut InvokeContext,
        ad_uri: String,
    ) -> Result<(), SlotError> {
        delegate!(self, slot => slot.update_ad_uri(ctx, ad_uri))
    }
}
