//! Instruction definitions for the Harberger slot program.
//!
//! Instructions are serialised with `bincode`; the processor decodes them
//! with a size limit of [`MAX_INSTRUCTION_DATA_LEN`](crate::constants::MAX_INSTRUCTION_DATA_LEN).

use serde::{Deserialize, Serialize};

/// Instructions supported by a Harberger slot.
///
/// Every variant settles accrued tax before doing anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotInstruction {
    /// Take a vacant slot at a self-assessed valuation.
    ///
    /// Attached funds must cover `bond + tax for periods`; any excess is
    /// returned to the signer.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer, writable]` — Claimant (payer).
    /// 1. `[writable]`         — Slot account (escrow).
    /// 2. `[writable]`         — Treasury.
    ///
    /// # Data
    ///
    /// * `valuation` — Self-assessed valuation.
    /// * `periods`   — Tax periods to prepay (non-zero).
    /// * `ad_uri`    — Creative to display.
    Claim {
        valuation: u128,
        periods: u64,
        ad_uri: String,
    },

    /// Force-buy an occupied slot.
    ///
    /// `valuation` must be at least the current valuation raised by the
    /// minimum bid increment.  The incumbent's unconsumed collateral and
    /// prepaid tax are refunded to them.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer, writable]` — Challenger (payer).
    /// 1. `[writable]`         — Slot account (escrow).
    /// 2. `[writable]`         — Treasury.
    /// 3. `[writable]`         — Incumbent owner.
    TakeOver {
        valuation: u128,
        periods: u64,
        ad_uri: String,
    },

    /// Prepay `periods` more tax periods at the current valuation.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer, writable]` — Current owner.
    /// 1. `[writable]`         — Slot account.
    /// 2. `[writable]`         — Treasury.
    Renew { periods: u64 },

    /// Settle accrued tax.  Anyone may call; no funds may be attached.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`   — Any caller.
    /// 1. `[writable]` — Slot account.
    /// 2. `[writable]` — Treasury.
    Poke,

    /// Release the slot.  The owner may forfeit at any time, anyone else
    /// only once coverage has lapsed.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`   — Owner, or any caller once overdue.
    /// 1. `[writable]` — Slot account.
    /// 2. `[writable]` — Treasury.
    /// 3. `[writable]` — Outgoing owner (prepaid refund).
    Forfeit,

    /// Replace the displayed creative, limited per ownership term.
    ///
    /// # Accounts expected
    ///
    /// 0. `[signer]`   — Current owner.
    /// 1. `[writable]` — Slot account.
    UpdateAdUri { ad_uri: String },
}

impl SlotInstruction {
    /// Encode for submission.
    pub fn to_bytes(&self) -> Vec<u8> {
        // Only fails for types serde cannot represent; none appear here.
        bincode::serialize(self).unwrap_or_default()
    }
}
