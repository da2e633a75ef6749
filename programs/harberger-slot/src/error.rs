//! Custom errors for the Harberger slot program.

use {
    num_derive::{FromPrimitive, ToPrimitive},
    thiserror::Error,
};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum SlotError {
    #[error("Slot is already occupied")]
    SlotAlreadyOccupied = 0,

    #[error("Slot is vacant")]
    SlotNotOccupied,

    #[error("Signer is not the current slot owner")]
    NotSlotOwner,

    #[error("Signer already owns this slot")]
    AlreadySlotOwner,

    #[error("Valuation is below the slot minimum or yields a zero bond")]
    ValuationBelowMinimum,

    #[error("Bid does not clear the minimum increment over the current valuation")]
    BidIncrementTooLow,

    #[error("Number of tax periods must be greater than zero")]
    ZeroPeriods,

    #[error("Attached funds do not cover the required bond and tax")]
    InsufficientPayment,

    #[error("Funds attached to an operation that does not accept payment")]
    UnexpectedPayment,

    #[error("Creative update limit reached for this ownership term")]
    ContentUpdateLimitReached,

    #[error("Ad URI exceeds the maximum length")]
    AdUriTooLong,

    #[error("Slot is not overdue and the signer is not its owner")]
    NotForfeitable,

    #[error("Invalid slot configuration")]
    InvalidConfig,

    #[error("Treasury or governance is the zero address")]
    ZeroAddress,

    #[error("Slot account data is invalid or corrupted")]
    InvalidAccountData,

    #[error("Instruction data could not be decoded")]
    InvalidInstructionData,

    #[error("No slot is deployed at the given address")]
    UnknownSlot,

    #[error("Insufficient funds in the source account")]
    InsufficientFunds,

    #[error("Recipient rejected the transfer")]
    TransferFailed,

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
}
