//! Host-ledger balances.
//!
//! [`Bank`] is the boundary between slot logic and whatever ledger actually
//! holds the funds.  A call's transfers are handed over as one batch of
//! [`TransferLeg`]s and either all land or none do.

use {
    crate::error::SlotError,
    log::*,
    solana_pubkey::Pubkey,
    std::collections::{HashMap, HashSet},
};

/// One movement of funds between two ledger accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferLeg {
    pub from: Pubkey,
    pub to: Pubkey,
    pub amount: u128,
}

pub trait Bank {
    /// Current balance of `account`.
    fn balance(&self, account: &Pubkey) -> u128;

    /// Execute `legs` in order, atomically.  On error no balance changes.
    fn execute(&mut self, legs: &[TransferLeg]) -> Result<(), SlotError>;
}

/// Balance map used by tests and off-chain simulation.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBank {
    balances: HashMap<Pubkey, u128>,
    rejecting: HashSet<Pubkey>,
}

impl InMemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint `amount` into `account`.
    pub fn fund(&mut self, account: &Pubkey, amount: u128) {
        let balance = self.balances.entry(*account).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Make every incoming transfer to `account` fail, as a recipient
    /// contract that reverts on receive would.
    pub fn reject_incoming(&mut self, account: &Pubkey) {
        self.rejecting.insert(*account);
    }

    /// Undo [`Self::reject_incoming`].
    pub fn accept_incoming(&mut self, account: &Pubkey) {
        self.rejecting.remove(account);
    }

    /// Sum of all balances.
    pub fn total_supply(&self) -> u128 {
        self.balances.values().copied().sum()
    }

    fn apply(&mut self, leg: &TransferLeg) -> Result<(), SlotError> {
        if leg.amount == 0 {
            return Ok(());
        }
        if self.rejecting.contains(&leg.to) {
            warn!("transfer of {} to {} rejected by recipient", leg.amount, leg.to);
            return Err(SlotError::TransferFailed);
        }
        let source = self.balances.entry(leg.from).or_default();
        *source = source
            .checked_sub(leg.amount)
            .ok_or(SlotError::InsufficientFunds)?;
        let destination = self.balances.entry(leg.to).or_default();
        *destination = destination
            .checked_add(leg.amount)
            .ok_or(SlotError::ArithmeticOverflow)?;
        Ok(())
    }
}

impl Bank for InMemoryBank {
    fn balance(&self, account: &Pubkey) -> u128 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn execute(&mut self, legs: &[TransferLeg]) -> Result<(), SlotError> {
        let snapshot = self.balances.clone();
        for leg in legs {
            if let Err(err) = self.apply(leg) {
                self.balances = snapshot;
                return Err(err);
            }
        }
        Ok(())
    }
}
