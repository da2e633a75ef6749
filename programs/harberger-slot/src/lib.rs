//! # Pensieve Harberger Slot Program
//!
//! Advertising slots sold under a **Harberger tax**: the holder declares
//! their own valuation, pays a periodic tax proportional to it, and must
//! sell to anyone who bids at least that valuation plus a minimum
//! increment.
//!
//! Two variants share the [`HarbergerSlot`] lifecycle:
//!
//! - [`EnabledSlot`]: collateral is a fraction of the valuation; overdue
//!   tax erodes both, period by period, until the lock is exhausted or
//!   falls to dust.
//! - [`ShieldedSlot`]: a separate bond is posted; once prepaid coverage
//!   lapses the whole bond is forfeited and the slot becomes vacant.
//!
//! ## Instructions
//!
//! | Instruction  | Description                                          |
//! |--------------|------------------------------------------------------|
//! | Claim        | Occupy a vacant slot, posting bond + prepaid tax     |
//! | TakeOver     | Force-buy an occupied slot, refunding the incumbent  |
//! | Renew        | Prepay more tax periods                              |
//! | Poke         | Settle accrued tax (anyone)                          |
//! | Forfeit      | Release the slot (owner, or anyone once overdue)     |
//! | UpdateAdUri  | Replace the creative, limited per ownership term     |
//!
//! ## Quick start
//!
//! ```rust
//! use {
//!     pensieve_harberger_slot_program::{
//!         bank::{Bank, InMemoryBank},
//!         context::InvokeContext,
//!         instruction::SlotInstruction,
//!         processor, tax, EnabledSlot, SlotConfig,
//!     },
//!     solana_clock::Clock,
//!     solana_pubkey::Pubkey,
//! };
//!
//! let config = SlotConfig::default();
//! let treasury = Pubkey::new_unique();
//! let mut slot = EnabledSlot::new(
//!     Pubkey::new_unique(),
//!     Pubkey::new_unique(),
//!     treasury,
//!     Pubkey::new_unique(),
//!     config.clone(),
//!     100,
//! )
//! .unwrap();
//!
//! let owner = Pubkey::new_unique();
//! let cost = tax::claim_cost(&config, 1_000_000, 2).unwrap();
//! let mut bank = InMemoryBank::new();
//! bank.fund(&owner, cost);
//!
//! let claim = SlotInstruction::Claim {
//!     valuation: 1_000_000,
//!     periods: 2,
//!     ad_uri: "ipfs://creative".into(),
//! };
//! let ctx = InvokeContext::new(owner, cost, Clock::default());
//! processor::process_instruction(&mut slot, &mut bank, ctx, &claim.to_bytes()).unwrap();
//!
//! assert_eq!(slot.state.current_owner, Some(owner));
//! assert_eq!(bank.balance(&slot.address), cost);
//! ```

#![allow(clippy::arithmetic_side_effects)]

pub mod bank;
pub mod config;
pub mod constants;
pub mod context;
pub mod enabled;
pub mod error;
pub mod instruction;
pub mod processor;
pub mod shielded;
pub mod slot;
pub mod state;
pub mod tax;


// Re-exports for convenience.
pub use {
    config::SlotConfig,
    error::SlotError,
    processor::{id, Receipt},
    slot::{HarbergerSlot, Settlement, Slot, SlotType},
    state::{EnabledSlot, ShieldedSlot},
};
