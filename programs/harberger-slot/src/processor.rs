//! Instruction processing logic for the Harberger slot program.

use {
    crate::{
        bank::{Bank, TransferLeg},
        constants::MAX_INSTRUCTION_DATA_LEN,
        context::{InvokeContext, Transfer},
        error::SlotError,
        instruction::SlotInstruction,
        slot::{HarbergerSlot, Settlement},
    },
    bincode::Options,
    log::*,
};

// ---------------------------------------------------------------------------
// Program ID
// ---------------------------------------------------------------------------

solana_pubkey::declare_id!("HarbergerS1ot111111111111111111111111111111");

// ---------------------------------------------------------------------------
// Receipt
// ---------------------------------------------------------------------------

/// Outcome of a successfully processed instruction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Receipt {
    /// Payments out of the slot escrow, in execution order.
    pub transfers: Vec<Transfer>,
    /// Program log messages.
    pub log_messages: Vec<String>,
    /// Set for `Poke`.
    pub settlement: Option<Settlement>,
}

// ---------------------------------------------------------------------------
// Entrypoint
// ---------------------------------------------------------------------------

/// Decode `instruction_data` (bincode, size-limited).
pub fn decode_instruction(instruction_data: &[u8]) -> Result<SlotInstruction, SlotError> {
    if instruction_data.len() as u64 > MAX_INSTRUCTION_DATA_LEN {
        debug!("slot instruction of {} bytes exceeds limit", instruction_data.len());
        return Err(SlotError::InvalidInstructionData);
    }
    bincode::options()
        .with_limit(MAX_INSTRUCTION_DATA_LEN)
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .deserialize_from(instruction_data)
        .map_err(|err| {
            debug!("slot instruction decode failed: {err}");
            SlotError::InvalidInstructionData
        })
}

/// Decode and execute one instruction against `slot`.
///
/// The instruction runs on a copy of the slot.  Its transfers (the signer's
/// attached funds into the escrow first, then every queued payment out of
/// it) are handed to `bank` as one batch; the copy replaces `slot` only if
/// that batch succeeds, so any failure leaves both the slot and the ledger
/// untouched.
pub fn process_instruction<S: HarbergerSlot, B: Bank>(
    slot: &mut S,
    bank: &mut B,
    invoke_context: InvokeContext,
    instruction_data: &[u8],
) -> Result<Receipt, SlotError> {
    let instruction = decode_instruction(instruction_data)?;
    trace!("harberger slot process_instruction: {instruction:?}");
    execute(slot, bank, invoke_context, instruction)
}

/// Execute an already-decoded instruction.  See [`process_instruction`].
pub fn execute<S: HarbergerSlot, B: Bank>(
    slot: &mut S,
    bank: &mut B,
    mut invoke_context: InvokeContext,
    instruction: SlotInstruction,
) -> Result<Receipt, SlotError> {
    let mut next = slot.clone();
    let ctx = &mut invoke_context;

    let outcome = match instruction {
        SlotInstruction::Claim {
            valuation,
            periods,
            ad_uri,
        } => next.claim(ctx, valuation, periods, ad_uri).map(|()| None),
        SlotInstruction::TakeOver {
            valuation,
            periods,
            ad_uri,
        } => next.take_over(ctx, valuation, periods, ad_uri).map(|()| None),
        SlotInstruction::Renew { periods } => next.renew(ctx, periods).map(|()| None),
        SlotInstruction::Poke => next.poke(ctx).map(Some),
        SlotInstruction::Forfeit => next.forfeit(ctx).map(|()| None),
        SlotInstruction::UpdateAdUri { ad_uri } => {
            next.update_ad_uri(ctx, ad_uri).map(|()| None)
        }
    };
    let settlement = outcome.inspect_err(|err| {
        debug!("slot {} instruction failed: {err}", slot.address());
    })?;

    let escrow = next.address();
    let payer = invoke_context.signer;
    let attached = invoke_context.attached;
    let (transfers, log_messages) = invoke_context.into_parts();

    let legs = build_legs(payer, escrow, attached, &transfers);
    bank.execute(&legs).inspect_err(|err| {
        warn!("slot {escrow}: transfer batch reverted: {err}");
    })?;

    *slot = next;
    Ok(Receipt {
        transfers,
        log_messages,
        settlement,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_legs(
    payer: solana_pubkey::Pubkey,
    escrow: solana_pubkey::Pubkey,
    attached: u128,
    transfers: &[Transfer],
) -> Vec<TransferLeg> {
    let deposit = (attached > 0).then_some(TransferLeg {
        from: payer,
        to: escrow,
        amount: attached,
    });
    deposit
        .into_iter()
        .chain(transfers.iter().map(|transfer| TransferLeg {
            from: escrow,
            to: transfer.to,
            amount: transfer.amount,
        }))
        .collect()
}
