//! Instruction definitions for the slot factory program.
//!
//! Serialised with `bincode`, like the slot program's own instructions.

use {
    serde::{Deserialize, Serialize},
    solana_pubkey::Pubkey,
};

/// Instructions supported by the slot factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactoryInstruction {
    /// Set the treasury and governance addresses captured by new slots.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`   — Factory owner.
    /// 1. `[writable]` — Factory state account.
    ///
    /// # Data
    ///
    /// * `treasury`   — Receives slot tax and swept collateral (non-zero).
    /// * `governance` — Policy authority (non-zero).
    SetGlobalAddresses {
        treasury: Pubkey,
        governance: Pubkey,
    },

    /// Deploy a bond-erosion slot.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`   — Factory owner.
    /// 1. `[writable]` — Factory state account.
    /// 2. `[writable]` — New slot account (derived address).
    ///
    /// # Data
    ///
    /// * `bond_rate_bps`          — Collateral per unit valuation.
    /// * `content_update_limit`   — Creative updates per term.
    /// * `tax_period_seconds`     — Length of one tax period.
    /// * `annual_tax_rate_bps`    — Yearly tax on valuation.
    /// * `min_bid_increment_bps`  — Minimum takeover premium.
    /// * `min_valuation`          — Smallest declarable valuation.
    /// * `dust_rate_bps`          — Residual share of collateral swept as dust.
    CreateValuationTaxEnabledSlot {
        bond_rate_bps: u16,
        content_update_limit: u32,
        tax_period_seconds: u64,
        annual_tax_rate_bps: u16,
        min_bid_increment_bps: u16,
        min_valuation: u128,
        dust_rate_bps: u16,
    },

    /// Deploy a bond-forfeiture slot.  Same parameters as
    /// [`FactoryInstruction::CreateValuationTaxEnabledSlot`] without a dust rate.
    CreateValuationTaxShieldedSlot {
        bond_rate_bps: u16,
        content_update_limit: u32,
        tax_period_seconds: u64,
        annual_tax_rate_bps: u16,
        min_bid_increment_bps: u16,
        min_valuation: u128,
    },

    /// Nominate a new owner.  Takes effect once they accept.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`   — Factory owner.
    /// 1. `[writable]` — Factory state account.
    TransferOwnership { new_owner: Pubkey },

    /// Accept a pending nomination.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`   — Pending owner.
    /// 1. `[writable]` — Factory state account.
    AcceptOwnership,
}
