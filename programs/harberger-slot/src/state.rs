//! Account state types for the Harberger slot program.

use {
    crate::{config::SlotConfig, constants::MAX_AD_URI_LEN},
    borsh::{BorshDeserialize, BorshSerialize},
    solana_clock::UnixTimestamp,
    solana_pubkey::Pubkey,
};

// ---------------------------------------------------------------------------
// Discriminator bytes
// ---------------------------------------------------------------------------

/// Discriminator for bond-erosion ("enabled") slot accounts.
pub const ENABLED_SLOT_DISCRIMINATOR: u8 = 1;

/// Discriminator for bond-forfeiture ("shielded") slot accounts.
pub const SHIELDED_SLOT_DISCRIMINATOR: u8 = 2;

/// Borsh size of `SlotConfig`: 2 + 2 + 2 + 8 + 16 + 4.
const SLOT_CONFIG_SIZE: usize = 34;

/// Borsh size of a `String` of at most `MAX_AD_URI_LEN` bytes.
const AD_URI_MAX_SIZE: usize = 4 + MAX_AD_URI_LEN;

// ---------------------------------------------------------------------------
// Enabled slot
// ---------------------------------------------------------------------------

/// Mutable ownership state of an enabled slot.
///
/// `current_owner` is `None` exactly when `valuation` is zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct EnabledSlotState {
    pub current_owner: Option<Pubkey>,

    /// Live valuation; eroded by overdue settlement.
    pub valuation: u128,

    /// Face valuation declared when the current term began.
    pub base_valuation: u128,

    /// Collateral held in escrow; never exceeds `valuation`.
    pub locked_valuation: u128,

    /// Tax paid in advance, covering `[last_tax_settlement, tax_paid_until]`.
    pub prepaid_tax_balance: u128,

    pub tax_paid_until: UnixTimestamp,
    pub last_tax_settlement: UnixTimestamp,
    pub current_ad_uri: String,

    /// Creative updates used in the current term.
    pub content_update_count: u32,
}

impl EnabledSlotState {
    pub fn is_vacant(&self) -> bool {
        self.current_owner.is_none()
    }

    /// Clear every field, returning the slot to vacant.
    pub fn vacate(&mut self) {
        *self = Self::default();
    }
}

/// A bond-erosion slot account.
///
/// Overdue tax is charged out of the locked collateral and shrinks the
/// valuation with it until the lock is exhausted or falls to dust.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct EnabledSlot {
    /// Address of this slot (escrow account for its collateral).
    pub address: Pubkey,
    /// Factory that deployed the slot.
    pub factory: Pubkey,
    /// Receives settled tax and swept collateral.
    pub treasury: Pubkey,
    /// Policy authority captured at deployment.
    pub governance: Pubkey,
    pub config: SlotConfig,
    /// Residual share of the term's face value below which collateral is swept.
    pub dust_rate_bps: u16,
    pub state: EnabledSlotState,
}

impl EnabledSlot {
    /// Upper bound of the serialised size (discriminator + borsh payload).
    ///
    /// Layout:
    ///   discriminator        (1)
    ///   address              (32)
    ///   factory              (32)
    ///   treasury             (32)
    ///   governance           (32)
    ///   config               (34)
    ///   dust_rate_bps        (2)
    ///   current_owner        (1 + 32)
    ///   valuation            (16)
    ///   base_valuation       (16)
    ///   locked_valuation     (16)
    ///   prepaid_tax_balance  (16)
    ///   tax_paid_until       (8)
    ///   last_tax_settlement  (8)
    ///   current_ad_uri       (4 + 1024)
    ///   content_update_count (4)
    ///   = 1310 bytes
    pub const MAX_SERIALIZED_SIZE: usize = 1
        + 32 * 4
        + SLOT_CONFIG_SIZE
        + 2
        + (1 + 32)
        + 16 * 4
        + 8 * 2
        + AD_URI_MAX_SIZE
        + 4;

    /// Deserialise from raw account data (expects leading discriminator).
    pub fn deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        deserialize_with_discriminator(data, ENABLED_SLOT_DISCRIMINATOR, "enabled slot")
    }

    /// Serialise into raw account data (prepends discriminator).
    pub fn serialize_into(&self, data: &mut [u8]) -> Result<(), std::io::Error> {
        serialize_with_discriminator(
            self,
            data,
            ENABLED_SLOT_DISCRIMINATOR,
            Self::MAX_SERIALIZED_SIZE,
        )
    }
}

// ---------------------------------------------------------------------------
// Shielded slot
// ---------------------------------------------------------------------------

/// Mutable ownership state of a shielded slot.
///
/// `current_owner` is `None` exactly when `bonded_amount` is zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ShieldedSlotState {
    pub current_owner: Option<Pubkey>,

    /// Declared valuation; settlement never touches it.
    pub valuation: u128,

    /// Bond posted at claim/takeover, forfeited whole on expiry.
    pub bonded_amount: u128,

    pub prepaid_tax_balance: u128,
    pub tax_paid_until: UnixTimestamp,
    pub last_tax_settlement: UnixTimestamp,
    pub current_ad_uri: String,
    pub content_update_count: u32,
}

impl ShieldedSlotState {
    pub fn is_vacant(&self) -> bool {
        self.current_owner.is_none()
    }

    pub fn vacate(&mut self) {
        *self = Self::default();
    }
}

/// A bond-forfeiture slot account.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ShieldedSlot {
    pub address: Pubkey,
    pub factory: Pubkey,
    pub treasury: Pubkey,
    pub governance: Pubkey,
    pub config: SlotConfig,
    pub state: ShieldedSlotState,
}

impl ShieldedSlot {
    /// Upper bound of the serialised size.
    ///
    /// Layout:
    ///   discriminator        (1)
    ///   addresses            (32 × 4)
    ///   config               (34)
    ///   current_owner        (1 + 32)
    ///   valuation            (16)
    ///   bonded_amount        (16)
    ///   prepaid_tax_balance  (16)
    ///   tax_paid_until       (8)
    ///   last_tax_settlement  (8)
    ///   current_ad_uri       (4 + 1024)
    ///   content_update_count (4)
    ///   = 1292 bytes
    pub const MAX_SERIALIZED_SIZE: usize =
        1 + 32 * 4 + SLOT_CONFIG_SIZE + (1 + 32) + 16 * 3 + 8 * 2 + AD_URI_MAX_SIZE + 4;

    pub fn deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        deserialize_with_discriminator(data, SHIELDED_SLOT_DISCRIMINATOR, "shielded slot")
    }

    pub fn serialize_into(&self, data: &mut [u8]) -> Result<(), std::io::Error> {
        serialize_with_discriminator(
            self,
            data,
            SHIELDED_SLOT_DISCRIMINATOR,
            Self::MAX_SERIALIZED_SIZE,
        )
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn deserialize_with_discriminator<T: BorshDeserialize>(
    data: &[u8],
    discriminator: u8,
    what: &str,
) -> Result<T, std::io::Error> {
    if data.first() != Some(&discriminator) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("missing or invalid {what} discriminator"),
        ));
    }
    let mut cursor = &data[1..];
    BorshDeserialize::deserialize_reader(&mut cursor)
}

fn serialize_with_discriminator<T: BorshSerialize>(
    value: &T,
    data: &mut [u8],
    discriminator: u8,
    max_size: usize,
) -> Result<(), std::io::Error> {
    if data.len() < max_size {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "account data buffer too small",
        ));
    }
    data[0] = discriminator;
    let mut cursor = &mut data[1..];
    BorshSerialize::serialize(value, &mut cursor)
}
