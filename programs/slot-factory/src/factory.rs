//! Slot deployment, registries and two-step ownership.

use {
    crate::{
        constants::SLOT_ADDRESS_SEED,
        error::FactoryError,
        state::{FactoryState, SlotRecord},
    },
    log::*,
    pensieve_harberger_slot_program::{
        bank::Bank,
        context::InvokeContext,
        error::SlotError,
        ic_msg, processor, EnabledSlot, Receipt, ShieldedSlot, Slot, SlotConfig, SlotType,
    },
    solana_pubkey::Pubkey,
    solana_sha256_hasher::hashv,
    std::collections::BTreeMap,
};

/// Deterministic address of slot `slot_id` deployed by `factory`.
pub fn derive_slot_address(factory: &Pubkey, slot_id: u64) -> Pubkey {
    let hash = hashv(&[
        SLOT_ADDRESS_SEED,
        factory.as_ref(),
        &slot_id.to_le_bytes(),
    ]);
    Pubkey::new_from_array(hash.to_bytes())
}

/// The factory and every slot it has deployed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotFactory {
    pub address: Pubkey,
    pub state: FactoryState,
    slots: BTreeMap<Pubkey, Slot>,
}

impl SlotFactory {
    pub fn new(address: Pubkey, owner: Pubkey) -> Self {
        Self {
            address,
            state: FactoryState::new(owner),
            slots: BTreeMap::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Admin
    // -----------------------------------------------------------------------

    pub fn set_global_addresses(
        &mut self,
        ctx: &mut InvokeContext,
        treasury: Pubkey,
        governance: Pubkey,
    ) -> Result<(), FactoryError> {
        self.check_owner(ctx)?;
        if treasury == Pubkey::default() || governance == Pubkey::default() {
            return Err(FactoryError::ZeroAddress);
        }
        self.state.treasury = treasury;
        self.state.governance = governance;
        ic_msg!(
            ctx,
            "SetGlobalAddresses: treasury={}, governance={}",
            treasury,
            governance
        );
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_valuation_tax_enabled_slot(
        &mut self,
        ctx: &mut InvokeContext,
        bond_rate_bps: u16,
        content_update_limit: u32,
        tax_period_seconds: u64,
        annual_tax_rate_bps: u16,
        min_bid_increment_bps: u16,
        min_valuation: u128,
        dust_rate_bps: u16,
    ) -> Result<SlotRecord, FactoryError> {
        let config = SlotConfig {
            bond_rate_bps,
            annual_tax_rate_bps,
            min_bid_increment_bps,
            tax_period_seconds,
            min_valuation,
            content_update_limit,
        };
        self.deploy(ctx, SlotType::ValuationTaxEnabled, |address, factory, state| {
            EnabledSlot::new(
                address,
                factory,
                state.treasury,
                state.governance,
                config,
                dust_rate_bps,
            )
            .map(Slot::Enabled)
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_valuation_tax_shielded_slot(
        &mut self,
        ctx: &mut InvokeContext,
        bond_rate_bps: u16,
        content_update_limit: u32,
        tax_period_seconds: u64,
        annual_tax_rate_bps: u16,
        min_bid_increment_bps: u16,
        min_valuation: u128,
    ) -> Result<SlotRecord, FactoryError> {
        let config = SlotConfig {
            bond_rate_bps,
            annual_tax_rate_bps,
            min_bid_increment_bps,
            tax_period_seconds,
            min_valuation,
            content_update_limit,
        };
        self.deploy(ctx, SlotType::ValuationTaxShielded, |address, factory, state| {
            ShieldedSlot::new(address, factory, state.treasury, state.governance, config)
                .map(Slot::Shielded)
        })
    }

    /// Nominate `new_owner`; the current owner stays in control until they
    /// accept.
    pub fn transfer_ownership(
        &mut self,
        ctx: &mut InvokeContext,
        new_owner: Pubkey,
    ) -> Result<(), FactoryError> {
        self.check_owner(ctx)?;
        if new_owner == Pubkey::default() {
            return Err(FactoryError::ZeroAddress);
        }
        self.state.pending_owner = Some(new_owner);
        ic_msg!(ctx, "TransferOwnership: {} nominated", new_owner);
        Ok(())
    }

    pub fn accept_ownership(&mut self, ctx: &mut InvokeContext) -> Result<(), FactoryError> {
        ctx.reject_payment()?;
        if self.state.pending_owner != Some(ctx.signer) {
            return Err(FactoryError::NotPendingOwner);
        }
        let previous = self.state.owner;
        self.state.owner = ctx.signer;
        self.state.pending_owner = None;
        ic_msg!(ctx, "AcceptOwnership: {} -> {}", previous, ctx.signer);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn owner(&self) -> Pubkey {
        self.state.owner
    }

    pub fn pending_owner(&self) -> Option<Pubkey> {
        self.state.pending_owner
    }

    pub fn treasury(&self) -> Pubkey {
        self.state.treasury
    }

    pub fn governance(&self) -> Pubkey {
        self.state.governance
    }

    pub fn slot_id_counter(&self) -> u64 {
        self.state.slot_id_counter
    }

    pub fn get_slot(&self, slot_id: u64) -> Result<SlotRecord, FactoryError> {
        self.state
            .slots_by_id
            .get(&slot_id)
            .copied()
            .ok_or(FactoryError::SlotNotFound)
    }

    pub fn valuation_tax_enabled_slots(&self) -> &[Pubkey] {
        &self.state.enabled_slots
    }

    pub fn valuation_tax_shielded_slots(&self) -> &[Pubkey] {
        &self.state.shielded_slots
    }

    pub fn slot_type_by_address(&self, address: &Pubkey) -> Option<SlotType> {
        self.state.slot_types.get(address).copied()
    }

    /// Deployed slot at `address`.
    pub fn slot(&self, address: &Pubkey) -> Option<&Slot> {
        self.slots.get(address)
    }

    // -----------------------------------------------------------------------
    // Slot calls
    // -----------------------------------------------------------------------

    /// Route a slot instruction to the slot deployed at `slot_address`.
    pub fn invoke_slot<B: Bank>(
        &mut self,
        slot_address: &Pubkey,
        bank: &mut B,
        invoke_context: InvokeContext,
        instruction_data: &[u8],
    ) -> Result<Receipt, SlotError> {
        let slot = self
            .slots
            .get_mut(slot_address)
            .ok_or(SlotError::UnknownSlot)?;
        processor::process_instruction(slot, bank, invoke_context, instruction_data)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn check_owner(&self, ctx: &mut InvokeContext) -> Result<(), FactoryError> {
        ctx.reject_payment()?;
        if ctx.signer != self.state.owner {
            ic_msg!(ctx, "factory: {} is not the owner", ctx.signer);
            return Err(FactoryError::NotOwner);
        }
        Ok(())
    }

    /// Build, register and store a new slot.  Nothing is recorded unless
    /// `build` succeeds.
    fn deploy<F>(
        &mut self,
        ctx: &mut InvokeContext,
        slot_type: SlotType,
        build: F,
    ) -> Result<SlotRecord, FactoryError>
    where
        F: FnOnce(Pubkey, Pubkey, &FactoryState) -> Result<Slot, SlotError>,
    {
        self.check_owner(ctx)?;
        if !self.state.has_global_addresses() {
            return Err(FactoryError::GlobalAddressesNotSet);
        }
        let slot_id = self
            .state
            .slot_id_counter
            .checked_add(1)
            .ok_or(FactoryError::ArithmeticOverflow)?;
        let slot_address = derive_slot_address(&self.address, slot_id);
        let slot = build(slot_address, self.address, &self.state).inspect_err(|err| {
            debug!("factory: rejected {slot_type:?} slot parameters: {err}");
        })?;

        let record = SlotRecord {
            slot_id,
            slot_address,
            slot_type,
        };
        match slot_type {
            SlotType::ValuationTaxEnabled => self.state.enabled_slots.push(slot_address),
            SlotType::ValuationTaxShielded => self.state.shielded_slots.push(slot_address),
        }
        self.state.slots_by_id.insert(slot_id, record);
        self.state.slot_types.insert(slot_address, slot_type);
        self.state.slot_id_counter = slot_id;
        self.slots.insert(slot_address, slot);

        ic_msg!(
            ctx,
            "CreateSlot: id={} type={:?} address={}",
            slot_id,
            slot_type,
            slot_address
        );
        Ok(record)
    }
}
