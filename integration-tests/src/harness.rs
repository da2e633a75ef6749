//! Pensieve Test Harness
//!
//! A deterministic environment for integration-testing the slot programs:
//!
//! - An [`InMemoryBank`] holding every balance (users, slot escrows, treasury)
//! - A [`SlotFactory`] configured with a treasury and governance address
//! - A simulated clock that tests advance explicitly
//!
//! Slot calls go through [`SlotFactory::invoke_slot`] with bincode-encoded
//! instructions, exactly as a client would submit them.

use {
    pensieve_harberger_slot_program::{
        bank::{Bank, InMemoryBank},
        context::InvokeContext,
        instruction::SlotInstruction,
        tax, HarbergerSlot, Receipt, Slot, SlotConfig, SlotError,
    },
    pensieve_slot_factory_program::{FactoryError, SlotFactory, SlotRecord},
    solana_clock::{Clock, UnixTimestamp},
    solana_keypair::Keypair,
    solana_pubkey::Pubkey,
    solana_signer::Signer,
};

// ─── Constants ───────────────────────────────────────────────────────────────

/// 10^18 base units, the "ETH-equivalent" unit valuations are quoted in.
pub const ETH: u128 = 1_000_000_000_000_000_000;

/// Default user balance.
pub const DEFAULT_USER_BALANCE: u128 = 100_000 * ETH;

/// One week, the default tax period.
pub const WEEK: i64 = 7 * 86_400;

/// Harness start time (~Nov 2023).
pub const GENESIS_TIMESTAMP: UnixTimestamp = 1_700_000_000;

/// Route `log` output to the test writer.  Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Info)
        .try_init();
}

// ─── Test harness ────────────────────────────────────────────────────────────

pub struct PensieveTestHarness {
    pub bank: InMemoryBank,
    pub factory: SlotFactory,
    /// Factory owner.
    pub owner: Keypair,
    pub treasury: Pubkey,
    pub governance: Pubkey,
    /// Current simulated slot.
    pub current_slot: u64,
    /// Current simulated unix timestamp.
    pub current_unix_timestamp: UnixTimestamp,
}

impl Default for PensieveTestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl PensieveTestHarness {
    /// Harness with global addresses already set.
    pub fn new() -> Self {
        let mut harness = Self::without_global_addresses();
        let (treasury, governance) = (Pubkey::new_unique(), Pubkey::new_unique());
        let mut ctx = harness.context(&harness.owner.pubkey(), 0);
        harness
            .factory
            .set_global_addresses(&mut ctx, treasury, governance)
            .expect("owner may set global addresses");
        harness.treasury = treasury;
        harness.governance = governance;
        harness
    }

    /// Harness whose factory has no treasury/governance yet.
    pub fn without_global_addresses() -> Self {
        init_logging();
        let owner = Keypair::new();
        Self {
            bank: InMemoryBank::new(),
            factory: SlotFactory::new(pensieve_slot_factory_program::id(), owner.pubkey()),
            owner,
            treasury: Pubkey::default(),
            governance: Pubkey::default(),
            current_slot: 0,
            current_unix_timestamp: GENESIS_TIMESTAMP,
        }
    }

    // ─── Clock ───────────────────────────────────────────────────────────

    pub fn clock(&self) -> Clock {
        Clock {
            slot: self.current_slot,
            unix_timestamp: self.current_unix_timestamp,
            ..Clock::default()
        }
    }

    /// Advance the simulated time by `seconds`.
    pub fn advance_seconds(&mut self, seconds: i64) {
        self.current_unix_timestamp += seconds;
        // Rough slot advancement: 1 slot = ~400ms
        self.current_slot += (seconds as u64) * 5 / 2;
    }

    /// Advance by `n` default tax periods.
    pub fn advance_periods(&mut self, n: i64) {
        self.advance_seconds(n * WEEK);
    }

    pub fn context(&self, signer: &Pubkey, attached: u128) -> InvokeContext {
        InvokeContext::new(*signer, attached, self.clock())
    }

    // ─── Accounts ────────────────────────────────────────────────────────

    /// Fresh user funded with [`DEFAULT_USER_BALANCE`].
    pub fn new_user(&mut self) -> Keypair {
        let user = Keypair::new();
        self.bank.fund(&user.pubkey(), DEFAULT_USER_BALANCE);
        user
    }

    pub fn balance(&self, account: &Pubkey) -> u128 {
        self.bank.balance(account)
    }

    pub fn treasury_balance(&self) -> u128 {
        self.bank.balance(&self.treasury)
    }

    // ─── Factory ─────────────────────────────────────────────────────────

    /// Deploy an enabled slot with the default economics and a 1 % dust rate.
    pub fn create_enabled_slot(&mut self) -> Result<SlotRecord, FactoryError> {
        let config = SlotConfig::default();
        let mut ctx = self.context(&self.owner.pubkey(), 0);
        self.factory.create_valuation_tax_enabled_slot(
            &mut ctx,
            config.bond_rate_bps,
            config.content_update_limit,
            config.tax_period_seconds,
            config.annual_tax_rate_bps,
            config.min_bid_increment_bps,
            config.min_valuation,
            100,
        )
    }

    /// Deploy a shielded slot with the default economics.
    pub fn create_shielded_slot(&mut self) -> Result<SlotRecord, FactoryError> {
        let config = SlotConfig::default();
        let mut ctx = self.context(&self.owner.pubkey(), 0);
        self.factory.create_valuation_tax_shielded_slot(
            &mut ctx,
            config.bond_rate_bps,
            config.content_update_limit,
            config.tax_period_seconds,
            config.annual_tax_rate_bps,
            config.min_bid_increment_bps,
            config.min_valuation,
        )
    }

    pub fn slot(&self, address: &Pubkey) -> &Slot {
        self.factory
            .slot(address)
            .expect("slot deployed by this harness")
    }

    // ─── Slot calls ──────────────────────────────────────────────────────

    /// Submit `instruction` to the slot at `slot` as `signer`, attaching
    /// `attached` funds.
    pub fn send(
        &mut self,
        signer: &Keypair,
        slot: &Pubkey,
        attached: u128,
        instruction: SlotInstruction,
    ) -> Result<Receipt, SlotError> {
        let ctx = self.context(&signer.pubkey(), attached);
        self.factory
            .invoke_slot(slot, &mut self.bank, ctx, &instruction.to_bytes())
    }

    /// Bond + prepaid tax for a term on `slot`.
    pub fn claim_cost(&self, slot: &Pubkey, valuation: u128, periods: u64) -> u128 {
        tax::claim_cost(self.slot(slot).config(), valuation, periods)
            .expect("claim cost in range")
    }

    /// Claim `slot`, attaching exactly the required payment.
    pub fn claim(
        &mut self,
        signer: &Keypair,
        slot: &Pubkey,
        valuation: u128,
        periods: u64,
    ) -> Result<Receipt, SlotError> {
        let cost = self.claim_cost(slot, valuation, periods);
        self.send(
            signer,
            slot,
            cost,
            SlotInstruction::Claim {
                valuation,
                periods,
                ad_uri: "ipfs://creative".into(),
            },
        )
    }

    /// Take over `slot`, attaching exactly the required payment.
    pub fn take_over(
        &mut self,
        signer: &Keypair,
        slot: &Pubkey,
        valuation: u128,
        periods: u64,
    ) -> Result<Receipt, SlotError> {
        let cost = self.claim_cost(slot, valuation, periods);
        self.send(
            signer,
            slot,
            cost,
            SlotInstruction::TakeOver {
                valuation,
                periods,
                ad_uri: "ipfs://takeover".into(),
            },
        )
    }

    pub fn poke(&mut self, slot: &Pubkey) -> Result<Receipt, SlotError> {
        let caller = Keypair::new();
        self.send(&caller, slot, 0, SlotInstruction::Poke)
    }

    /// Escrow balance on the ledger matches what the slot state accounts for.
    pub fn assert_escrow_backs_state(&self, slot: &Pubkey) {
        let expected = self
            .slot(slot)
            .escrow_balance()
            .expect("escrow balance in range");
        assert_eq!(
            self.balance(slot),
            expected,
            "escrow of {slot} diverged from slot state"
        );
    }
}
