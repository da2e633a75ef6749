//! Pensieve Property-Based Invariant Tests
//!
//! Uses proptest to verify the Harberger slot invariants across:
//! - Tax formulas (bond, prorated tax, decay, bid increment)
//! - Value conservation over arbitrary slot call sequences
//! - Ownership / collateral consistency of both slot variants

pub mod slot_invariants;
pub mod tax_invariants;
