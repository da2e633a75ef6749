//! Pensieve Slot Factory Program
//!
//! Deploys Harberger slots of either variant and keeps the registries
//! indexers read: per-type address lists, id → record and address → type.
//!
//! ## Ownership
//!
//! The factory owner configures the global treasury/governance addresses
//! and is the only account allowed to create slots.  Ownership moves in two
//! steps: the owner nominates a successor, who must then accept.
//!
//! ## Instructions
//!
//! | Instruction                     | Description                                  |
//! |---------------------------------|----------------------------------------------|
//! | SetGlobalAddresses              | Set treasury and governance for new slots    |
//! | CreateValuationTaxEnabledSlot   | Deploy a bond-erosion slot                   |
//! | CreateValuationTaxShieldedSlot  | Deploy a bond-forfeiture slot                |
//! | TransferOwnership               | Nominate a new owner                         |
//! | AcceptOwnership                 | Pending owner takes control                  |

#![allow(clippy::arithmetic_side_effects)]

pub mod constants;
pub mod error;
pub mod factory;
pub mod instruction;
pub mod processor;
pub mod state;

pub use {
    error::FactoryError,
    factory::{derive_slot_address, SlotFactory},
    processor::id,
    state::{FactoryState, SlotRecord},
};
