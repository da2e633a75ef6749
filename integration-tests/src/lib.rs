//! Pensieve Integration Tests
//!
//! Integration test suite for the Harberger slot programs.
//!
//! # Subsystems Tested
//!
//! 1. **Enabled slots** — claim, takeover, renew, period decay, dust and
//!    exhaustion forfeiture, content-update limits, excess refunds
//! 2. **Shielded slots** — prepaid drain, binary expiry sweeping the whole
//!    bond, takeover refunds, forfeit
//! 3. **Factory** — id counter, per-type registries, two-step ownership,
//!    routing of slot calls
//! 4. **Atomicity** — refusing recipients revert the entire call

pub mod harness;
