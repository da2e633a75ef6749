//! Constants for the slot factory program.

/// Seed prefix for deterministic slot addresses:
/// `sha256(SLOT_ADDRESS_SEED ‖ factory ‖ slot_id as u64 LE)`.
pub const SLOT_ADDRESS_SEED: &[u8] = b"slot";

/// Upper bound on encoded factory instructions.
pub const MAX_INSTRUCTION_DATA_LEN: u64 = 1232;
