//! Custom errors for the slot factory program.

use {
    num_derive::{FromPrimitive, ToPrimitive},
    pensieve_harberger_slot_program::SlotError,
    thiserror::Error,
};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, FromPrimitive, ToPrimitive)]
pub enum FactoryError {
    #[error("Signer is not the factory owner")]
    NotOwner = 0,

    #[error("Signer is not the pending factory owner")]
    NotPendingOwner,

    #[error("Address must not be zero")]
    ZeroAddress,

    #[error("Treasury and governance addresses are not configured")]
    GlobalAddressesNotSet,

    #[error("No slot with this id")]
    SlotNotFound,

    #[error("Slot parameters are out of range")]
    InvalidSlotConfig,

    #[error("Factory calls do not accept attached funds")]
    UnexpectedPayment,

    #[error("Invalid factory account data")]
    InvalidAccountData,

    #[error("Invalid instruction data")]
    InvalidInstructionData,

    #[error("Arithmetic overflow")]
    ArithmeticOverflow,
}

impl From<SlotError> for FactoryError {
    fn from(err: SlotError) -> Self {
        match err {
            SlotError::ZeroAddress => Self::ZeroAddress,
            SlotError::UnexpectedPayment => Self::UnexpectedPayment,
            SlotError::ArithmeticOverflow => Self::ArithmeticOverflow,
            _ => Self::InvalidSlotConfig,
        }
    }
}
