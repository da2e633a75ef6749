//! Instruction processing logic for the slot factory program.

use {
    crate::{
        constants::MAX_INSTRUCTION_DATA_LEN, error::FactoryError, factory::SlotFactory,
        instruction::FactoryInstruction,
    },
    bincode::Options,
    log::*,
    pensieve_harberger_slot_program::context::InvokeContext,
};

// ---------------------------------------------------------------------------
// Program ID
// ---------------------------------------------------------------------------

solana_pubkey::declare_id!("S1otFactory11111111111111111111111111111111");

// ---------------------------------------------------------------------------
// Entrypoint
// ---------------------------------------------------------------------------

/// Decode `instruction_data` and apply it to `factory`.
///
/// Handlers validate before writing, so a failed instruction leaves the
/// factory unchanged.
pub fn process_instruction(
    factory: &mut SlotFactory,
    invoke_context: &mut InvokeContext,
    instruction_data: &[u8],
) -> Result<(), FactoryError> {
    if instruction_data.len() as u64 > MAX_INSTRUCTION_DATA_LEN {
        return Err(FactoryError::InvalidInstructionData);
    }
    let instruction: FactoryInstruction = bincode::options()
        .with_limit(MAX_INSTRUCTION_DATA_LEN)
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .deserialize_from(instruction_data)
        .map_err(|_| FactoryError::InvalidInstructionData)?;

    trace!("slot factory process_instruction: {instruction:?}");

    match instruction {
        FactoryInstruction::SetGlobalAddresses {
            treasury,
            governance,
        } => factory.set_global_addresses(invoke_context, treasury, governance),
        FactoryInstruction::CreateValuationTaxEnabledSlot {
            bond_rate_bps,
            content_update_limit,
            tax_period_seconds,
            annual_tax_rate_bps,
            min_bid_increment_bps,
            min_valuation,
            dust_rate_bps,
        } => factory
            .create_valuation_tax_enabled_slot(
                invoke_context,
                bond_rate_bps,
                content_update_limit,
                tax_period_seconds,
                annual_tax_rate_bps,
                min_bid_increment_bps,
                min_valuation,
                dust_rate_bps,
            )
            .map(|_| ()),
        FactoryInstruction::CreateValuationTaxShieldedSlot {
            bond_rate_bps,
            content_update_limit,
            tax_period_seconds,
            annual_tax_rate_bps,
            min_bid_increment_bps,
            min_valuation,
        } => factory
            .create_valuation_tax_shielded_slot(
                invoke_context,
                bond_rate_bps,
                content_update_limit,
                tax_period_seconds,
                annual_tax_rate_bps,
                min_bid_increment_bps,
                min_valuation,
            )
            .map(|_| ()),
        FactoryInstruction::TransferOwnership { new_owner } => {
            factory.transfer_ownership(invoke_context, new_owner)
        }
        FactoryInstruction::AcceptOwnership => factory.accept_ownership(invoke_context),
    }
}
