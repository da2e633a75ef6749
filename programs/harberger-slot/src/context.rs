//! Per-call execution context.
//!
//! An [`InvokeContext`] carries who is calling, how much they attached, and
//! the ledger clock.  Slot operations never move funds directly: they queue
//! [`Transfer`]s out of the slot's escrow here, and the processor executes
//! them only after the new slot state has been fully computed.

use {
    crate::error::SlotError,
    solana_clock::{Clock, UnixTimestamp},
    solana_pubkey::Pubkey,
};

/// Record a program log message on the context and mirror it to `log::debug!`.
#[macro_export]
macro_rules! ic_msg {
    ($invoke_context:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        log::debug!("{}", message);
        $invoke_context.log_messages.push(message);
    }};
}

/// Why funds leave a slot escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferReason {
    /// Settled tax forwarded to the treasury.
    Tax,
    /// Collateral swept to the treasury on forfeiture or expiry.
    Sweep,
    /// Unconsumed collateral and prepaid tax returned to an outgoing owner.
    Refund,
    /// Attached funds above the required payment, returned to the payer.
    Excess,
}

/// A queued payment out of the slot escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub to: Pubkey,
    pub amount: u128,
    pub reason: TransferReason,
}

#[derive(Debug, Clone)]
pub struct InvokeContext {
    /// Account that signed the call.
    pub signer: Pubkey,
    /// Funds attached to the call (moved into the slot escrow before any
    /// outgoing transfer executes).
    pub attached: u128,
    /// Ledger clock; `unix_timestamp` is "now" for every tax computation.
    pub clock: Clock,
    /// Program log collector.
    pub log_messages: Vec<String>,
    transfers: Vec<Transfer>,
    payment_collected: bool,
}

impl InvokeContext {
    pub fn new(signer: Pubkey, attached: u128, clock: Clock) -> Self {
        Self {
            signer,
            attached,
            clock,
            log_messages: Vec::new(),
            transfers: Vec::new(),
            payment_collected: false,
        }
    }

    /// Current ledger timestamp.
    #[inline]
    pub fn now(&self) -> UnixTimestamp {
        self.clock.unix_timestamp
    }

    /// Queue a transfer out of the slot escrow.  Zero amounts are dropped.
    pub fn transfer_out(&mut self, to: Pubkey, amount: u128, reason: TransferReason) {
        if amount > 0 {
            self.transfers.push(Transfer { to, amount, reason });
        }
    }

    /// Consume `required` from the attached funds and queue the excess back
    /// to the payer.
    ///
    /// May be called at most once per context.
    pub fn collect_payment(&mut self, required: u128) -> Result<(), SlotError> {
        if self.payment_collected {
            return Err(SlotError::InsufficientPayment);
        }
        if self.attached < required {
            ic_msg!(
                self,
                "payment: attached {} < required {}",
                self.attached,
                required
            );
            return Err(SlotError::InsufficientPayment);
        }
        self.payment_collected = true;
        let excess = self.attached.saturating_sub(required);
        self.transfer_out(self.signer, excess, TransferReason::Excess);
        Ok(())
    }

    /// Fail if funds were attached to an unfunded operation.
    pub fn reject_payment(&self) -> Result<(), SlotError> {
        if self.attached > 0 {
            return Err(SlotError::UnexpectedPayment);
        }
        Ok(())
    }

    /// Transfers queued so far, in execution order.
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Sum of queued transfers for one reason.
    pub fn total_for(&self, reason: TransferReason) -> u128 {
        self.transfers
            .iter()
            .filter(|t| t.reason == reason)
            .map(|t| t.amount)
            .sum()
    }

    pub(crate) fn into_parts(self) -> (Vec<Transfer>, Vec<String>) {
        (self.transfers, self.log_messages)
    }
}
