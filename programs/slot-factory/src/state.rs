//! Account state types for the slot factory program.

use {
    borsh::{BorshDeserialize, BorshSerialize},
    pensieve_harberger_slot_program::SlotType,
    serde::{Deserialize, Serialize},
    solana_pubkey::Pubkey,
    std::collections::BTreeMap,
};

/// Discriminator for `FactoryState` accounts.
///
/// Follows the two slot discriminators (1 = enabled, 2 = shielded).
pub const FACTORY_STATE_DISCRIMINATOR: u8 = 3;

/// Registry entry for one deployed slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct SlotRecord {
    pub slot_id: u64,
    pub slot_address: Pubkey,
    pub slot_type: SlotType,
}

/// Factory ownership, global addresses and the append-only slot registries.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct FactoryState {
    pub owner: Pubkey,

    /// Nominated by `transfer_ownership`, cleared by `accept_ownership`.
    pub pending_owner: Option<Pubkey>,

    /// Captured by every slot created afterwards.
    pub treasury: Pubkey,
    pub governance: Pubkey,

    /// Id of the most recently created slot (0 before the first).
    pub slot_id_counter: u64,

    /// Enabled-variant slot addresses in creation order.
    pub enabled_slots: Vec<Pubkey>,

    /// Shielded-variant slot addresses in creation order.
    pub shielded_slots: Vec<Pubkey>,

    pub slots_by_id: BTreeMap<u64, SlotRecord>,
    pub slot_types: BTreeMap<Pubkey, SlotType>,
}

impl FactoryState {
    pub fn new(owner: Pubkey) -> Self {
        Self {
            owner,
            ..Self::default()
        }
    }

    /// Whether both global addresses are set.
    pub fn has_global_addresses(&self) -> bool {
        self.treasury != Pubkey::default() && self.governance != Pubkey::default()
    }

    /// Deserialise from raw account data (expects leading discriminator).
    pub fn deserialize(data: &[u8]) -> Result<Self, std::io::Error> {
        if data.first() != Some(&FACTORY_STATE_DISCRIMINATOR) {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "missing or invalid factory state discriminator",
            ));
        }
        let mut cursor = &data[1..];
        BorshDeserialize::deserialize_reader(&mut cursor)
    }

    /// Serialise to account data (prepends discriminator).
    ///
    /// The registries grow with every slot, so the buffer is sized here
    /// rather than preallocated by the caller.
    pub fn serialize(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut data = vec![FACTORY_STATE_DISCRIMINATOR];
        BorshSerialize::serialize(self, &mut data)?;
        Ok(data)
    }
}
