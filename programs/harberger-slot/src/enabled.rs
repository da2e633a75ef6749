//! Bond-erosion ("valuation tax enabled") slot lifecycle.
//!
//! ```text
//! Vacant ──claim──▶ Owned ──takeOver──▶ Owned[new owner]
//!                     │  ▲                    │
//!                     │  └──────renew─────────┘
//!                     └──(collateral exhausted | dust | forfeit)──▶ Vacant
//! ```
//!
//! While the prepaid balance lasts it drains linearly into the treasury.
//! Each whole period past `tax_paid_until` is then charged out of the locked
//! collateral with [`period_decay`], shrinking the valuation by the same
//! amount.  When the charge would consume the remaining lock, or the lock or
//! valuation falls to its dust floor, the slot is vacated and the residual
//! lock swept to the treasury.

use {
    crate::{
        config::{validate_dust_rate, SlotConfig},
        constants::MAX_AD_URI_LEN,
        context::{InvokeContext, TransferReason},
        error::SlotError,
        ic_msg,
        slot::{price_term, HarbergerSlot, Settlement, SlotType},
        state::{EnabledSlot, EnabledSlotState},
        tax::{
            advance_by_periods, bond_amount, dust_floor, min_next_valuation, overdue_periods,
            period_decay, prepaid_accrual, tax_for_periods,
        },
    },
    log::*,
    solana_clock::UnixTimestamp,
    solana_pubkey::Pubkey,
};

impl EnabledSlot {
    /// Build a vacant slot.  Fails on a zero treasury/governance address or
    /// an unusable configuration.
    pub fn new(
        address: Pubkey,
        factory: Pubkey,
        treasury: Pubkey,
        governance: Pubkey,
        config: SlotConfig,
        dust_rate_bps: u16,
    ) -> Result<Self, SlotError> {
        if treasury == Pubkey::default() || governance == Pubkey::default() {
            return Err(SlotError::ZeroAddress);
        }
        config.validate()?;
        validate_dust_rate(dust_rate_bps)?;
        Ok(Self {
            address,
            factory,
            treasury,
            governance,
            config,
            dust_rate_bps,
            state: EnabledSlotState::default(),
        })
    }

    /// Charge up to `overdue` whole periods against the locked collateral.
    ///
    /// Stops early when the slot must be vacated; the caller sweeps.
    fn charge_overdue_periods(
        &mut self,
        overdue: u64,
        settlement: &mut Settlement,
    ) -> Result<(), SlotError> {
        let period = self.config.tax_period_seconds;
        let valuation_floor = dust_floor(self.state.base_valuation, self.dust_rate_bps)?;
        let lock_floor = dust_floor(
            bond_amount(self.state.base_valuation, self.config.bond_rate_bps)?,
            self.dust_rate_bps,
        )?;

        let mut charged = 0u64;
        while charged < overdue {
            let tax = period_decay(
                self.state.valuation,
                self.config.annual_tax_rate_bps,
                period,
            )?;
            settlement.periods_charged += 1;
            if tax >= self.state.locked_valuation {
                settlement.tax_collected += self.state.locked_valuation;
                self.state.locked_valuation = 0;
                settlement.forfeited = true;
                return Ok(());
            }
            self.state.locked_valuation -= tax;
            self.state.valuation -= tax;
            settlement.tax_collected += tax;
            self.state.tax_paid_until = advance_by_periods(self.state.tax_paid_until, period, 1)?;
            charged += 1;

            if self.state.valuation <= valuation_floor || self.state.locked_valuation <= lock_floor
            {
                settlement.forfeited = true;
                return Ok(());
            }
        }
        self.state.last_tax_settlement = self.state.tax_paid_until;
        Ok(())
    }

    /// Start a new ownership term for `ctx.signer`, collecting bond + tax.
    fn occupy(
        &mut self,
        ctx: &mut InvokeContext,
        valuation: u128,
        periods: u64,
        ad_uri: String,
    ) -> Result<(), SlotError> {
        let (bond, tax) = price_term(&self.config, valuation, periods, &ad_uri)?;
        let now = ctx.now();
        let tax_paid_until = advance_by_periods(now, self.config.tax_period_seconds, periods)?;
        ctx.collect_payment(bond.checked_add(tax).ok_or(SlotError::ArithmeticOverflow)?)?;

        self.state = EnabledSlotState {
            current_owner: Some(ctx.signer),
            valuation,
            base_valuation: valuation,
            locked_valuation: bond,
            prepaid_tax_balance: tax,
            tax_paid_until,
            last_tax_settlement: now,
            current_ad_uri: ad_uri,
            content_update_count: 0,
        };
        Ok(())
    }

    /// Owner check after settlement.
    fn settled_owner(&self, ctx: &InvokeContext) -> Result<Pubkey, SlotError> {
        let owner = self.state.current_owner.ok_or(SlotError::SlotNotOccupied)?;
        if owner != ctx.signer {
            return Err(SlotError::NotSlotOwner);
        }
        Ok(owner)
    }
}

impl HarbergerSlot for EnabledSlot {
    fn slot_type(&self) -> SlotType {
        SlotType::ValuationTaxEnabled
    }

    fn address(&self) -> Pubkey {
        self.address
    }

    fn treasury(&self) -> Pubkey {
        self.treasury
    }

    fn config(&self) -> &SlotConfig {
        &self.config
    }

    fn current_owner(&self) -> Option<Pubkey> {
        self.state.current_owner
    }

    fn valuation(&self) -> u128 {
        self.state.valuation
    }

    fn prepaid_tax_balance(&self) -> u128 {
        self.state.prepaid_tax_balance
    }

    fn tax_paid_until(&self) -> UnixTimestamp {
        self.state.tax_paid_until
    }

    fn escrow_balance(&self) -> Result<u128, SlotError> {
        self.state
            .locked_valuation
            .checked_add(self.state.prepaid_tax_balance)
            .ok_or(SlotError::ArithmeticOverflow)
    }

    fn settle(&mut self, ctx: &mut InvokeContext) -> Result<Settlement, SlotError> {
        let Some(owner) = self.state.current_owner else {
            return Ok(Settlement::default());
        };
        let now = ctx.now();
        let mut settlement = Settlement::default();

        // --- Drain prepaid tax up to min(now, tax_paid_until) ---
        let accrued = prepaid_accrual(
            self.state.prepaid_tax_balance,
            self.state.last_tax_settlement,
            self.state.tax_paid_until,
            now,
        )?;
        self.state.prepaid_tax_balance -= accrued;
        settlement.tax_collected = accrued;
        if now > self.state.last_tax_settlement {
            self.state.last_tax_settlement = now.min(self.state.tax_paid_until);
        }

        // --- Charge overdue periods against the lock ---
        let overdue = overdue_periods(
            self.state.tax_paid_until,
            now,
            self.config.tax_period_seconds,
        )?;
        if overdue > 0 {
            self.charge_overdue_periods(overdue, &mut settlement)?;
        }

        if settlement.forfeited {
            settlement.swept = self
                .state
                .locked_valuation
                .checked_add(self.state.prepaid_tax_balance)
                .ok_or(SlotError::ArithmeticOverflow)?;
            warn!(
                "enabled slot {}: collateral of {} exhausted after {} overdue periods",
                self.address, owner, settlement.periods_charged
            );
            ic_msg!(
                ctx,
                "Settle: slot {} forfeited by {}, sweeping {}",
                self.address,
                owner,
                settlement.swept
            );
            self.state.vacate();
        }

        ctx.transfer_out(self.treasury, settlement.tax_collected, TransferReason::Tax);
        ctx.transfer_out(self.treasury, settlement.swept, TransferReason::Sweep);
        Ok(settlement)
    }

    fn claim(
        &mut self,
        ctx: &mut InvokeContext,
        valuation: u128,
        periods: u64,
        ad_uri: String,
    ) -> Result<(), SlotError> {
        self.settle(ctx)?;
        if let Some(owner) = self.state.current_owner {
            ic_msg!(ctx, "Claim: slot {} already owned by {}", self.address, owner);
            return Err(SlotError::SlotAlreadyOccupied);
        }
        self.occupy(ctx, valuation, periods, ad_uri)?;
        ic_msg!(
            ctx,
            "Claim: {} claimed slot {} at valuation {} for {} periods",
            ctx.signer,
            self.address,
            valuation,
            periods
        );
        Ok(())
    }

    fn take_over(
        &mut self,
        ctx: &mut InvokeContext,
        valuation: u128,
        periods: u64,
        ad_uri: String,
    ) -> Result<(), SlotError> {
        let settlement = self.settle(ctx)?;
        let Some(incumbent) = self.state.current_owner else {
            if !settlement.forfeited {
                return Err(SlotError::SlotNotOccupied);
            }
            self.occupy(ctx, valuation, periods, ad_uri)?;
            ic_msg!(
                ctx,
                "TakeOver: incumbent forfeited during settlement; {} claimed slot {}",
                ctx.signer,
                self.address
            );
            return Ok(());
        };
        if incumbent == ctx.signer {
            return Err(SlotError::AlreadySlotOwner);
        }

        let required = min_next_valuation(self.state.valuation, self.config.min_bid_increment_bps)?;
        if valuation < required {
            ic_msg!(
                ctx,
                "TakeOver: bid {} below required {} (current valuation {})",
                valuation,
                required,
                self.state.valuation
            );
            return Err(SlotError::BidIncrementTooLow);
        }

        let refund = self.escrow_balance()?;
        let previous_valuation = self.state.valuation;
        self.occupy(ctx, valuation, periods, ad_uri)?;
        ctx.transfer_out(incumbent, refund, TransferReason::Refund);

        ic_msg!(
            ctx,
            "TakeOver: {} took slot {} from {} ({} -> {}), refunded {}",
            ctx.signer,
            self.address,
            incumbent,
            previous_valuation,
            valuation,
            refund
        );
        Ok(())
    }

    fn renew(&mut self, ctx: &mut InvokeContext, periods: u64) -> Result<(), SlotError> {
        self.settle(ctx)?;
        self.settled_owner(ctx)?;
        if periods == 0 {
            return Err(SlotError::ZeroPeriods);
        }

        let tax = tax_for_periods(
            self.state.valuation,
            periods,
            self.config.annual_tax_rate_bps,
            self.config.tax_period_seconds,
        )?;
        let tax_paid_until = advance_by_periods(
            self.state.tax_paid_until,
            self.config.tax_period_seconds,
            periods,
        )?;
        ctx.collect_payment(tax)?;

        self.state.prepaid_tax_balance = self
            .state
            .prepaid_tax_balance
            .checked_add(tax)
            .ok_or(SlotError::ArithmeticOverflow)?;
        self.state.tax_paid_until = tax_paid_until;

        ic_msg!(
            ctx,
            "Renew: slot {} paid until {} (+{} periods, {} tax)",
            self.address,
            tax_paid_until,
            periods,
            tax
        );
        Ok(())
    }

    fn forfeit(&mut self, ctx: &mut InvokeContext) -> Result<(), SlotError> {
        ctx.reject_payment()?;
        let owner = self.state.current_owner.ok_or(SlotError::SlotNotOccupied)?;
        let overdue = ctx.now() > self.state.tax_paid_until;
        if ctx.signer != owner && !overdue {
            return Err(SlotError::NotForfeitable);
        }

        self.settle(ctx)?;
        if self.state.is_vacant() {
            return Ok(());
        }

        let locked = self.state.locked_valuation;
        let prepaid = self.state.prepaid_tax_balance;
        ctx.transfer_out(self.treasury, locked, TransferReason::Sweep);
        ctx.transfer_out(owner, prepaid, TransferReason::Refund);
        self.state.vacate();

        ic_msg!(
            ctx,
            "Forfeit: slot {} released by {}; {} to treasury, {} prepaid refunded",
            self.address,
            owner,
            locked,
            prepaid
        );
        Ok(())
    }

    fn update_ad_uri(
        &mut self,
        ctx: &mut InvokeContext,
        ad_uri: String,
    ) -> Result<(), SlotError> {
        ctx.reject_payment()?;
        self.settle(ctx)?;
        self.settled_owner(ctx)?;
        if self.state.content_update_count >= self.config.content_update_limit {
            return Err(SlotError::ContentUpdateLimitReached);
        }
        if ad_uri.len() > MAX_AD_URI_LEN {
            return Err(SlotError::AdUriTooLong);
        }
        self.state.current_ad_uri = ad_uri;
        self.state.content_update_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{constants::SECONDS_PER_DAY, tax::claim_cost},
        solana_clock::Clock,
    };

    const ETH: u128 = 1_000_000_000_000_000_000;
    const WEEK: i64 = 7 * SECONDS_PER_DAY as i64;
    const START: i64 = 1_700_000_000;

    fn slot() -> EnabledSlot {
        EnabledSlot::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            SlotConfig::default(),
            100,
        )
        .unwrap()
    }

    fn ctx(signer: Pubkey, attached: u128, now: i64) -> InvokeContext {
        let clock = Clock {
            unix_timestamp: now,
            ..Clock::default()
        };
        InvokeContext::new(signer, attached, clock)
    }

    fn claimed(owner: Pubkey, valuation: u128, periods: u64) -> EnabledSlot {
        let mut slot = slot();
        let cost = claim_cost(&slot.config, valuation, periods).unwrap();
        slot.claim(&mut ctx(owner, cost, START), valuation, periods, "ipfs://a".into())
            .unwrap();
        slot
    }

    #[test]
    fn test_new_rejects_zero_addresses() {
        let result = EnabledSlot::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::default(),
            Pubkey::new_unique(),
            SlotConfig::default(),
            100,
        );
        assert_eq!(result, Err(SlotError::ZeroAddress));
    }

    #[test]
    fn test_new_rejects_bad_dust_rate() {
        let result = EnabledSlot::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            SlotConfig::default(),
            10_001,
        );
        assert_eq!(result, Err(SlotError::InvalidConfig));
    }

    #[test]
    fn test_claim_sets_exact_collateral() {
        let owner = Pubkey::new_unique();
        let slot = claimed(owner, 1_000 * ETH, 2);
        assert_eq!(slot.state.current_owner, Some(owner));
        assert_eq!(slot.state.valuation, 1_000 * ETH);
        assert_eq!(slot.state.base_valuation, 1_000 * ETH);
        assert_eq!(slot.state.locked_valuation, 100 * ETH);
        assert_eq!(
            slot.state.prepaid_tax_balance,
            tax_for_periods(1_000 * ETH, 2, 8_000, 604_800).unwrap()
        );
        assert_eq!(slot.state.tax_paid_until, START + 2 * WEEK);
        assert_eq!(slot.state.last_tax_settlement, START);
        assert_eq!(slot.state.current_ad_uri, "ipfs://a");
    }

    #[test]
    fn test_claim_refunds_excess_payment() {
        let mut slot = slot();
        let owner = Pubkey::new_unique();
        let cost = claim_cost(&slot.config, 1_000, 1).unwrap();
        let mut ctx = ctx(owner, cost + 7, START);
        slot.claim(&mut ctx, 1_000, 1, String::new()).unwrap();
        assert_eq!(ctx.total_for(TransferReason::Excess), 7);
        assert_eq!(slot.escrow_balance().unwrap(), cost);
    }

    #[test]
    fn test_claim_rejects_occupied_slot() {
        let mut slot = claimed(Pubkey::new_unique(), 1_000, 1);
        let result = slot.claim(&mut ctx(Pubkey::new_unique(), 10_000, START), 1_000, 1, String::new());
        assert_eq!(result, Err(SlotError::SlotAlreadyOccupied));
    }

    #[test]
    fn test_claim_rejects_underpayment() {
        let mut slot = slot();
        let cost = claim_cost(&slot.config, 1_000 * ETH, 2).unwrap();
        let result = slot.claim(
            &mut ctx(Pubkey::new_unique(), cost - 1, START),
            1_000 * ETH,
            2,
            String::new(),
        );
        assert_eq!(result, Err(SlotError::InsufficientPayment));
    }

    #[test]
    fn test_prepaid_drains_linearly() {
        let mut slot = claimed(Pubkey::new_unique(), 1_000 * ETH, 2);
        let prepaid = slot.state.prepaid_tax_balance;
        let mut ctx = ctx(Pubkey::new_unique(), 0, START + WEEK);
        let settlement = slot.poke(&mut ctx).unwrap();
        assert_eq!(settlement.tax_collected, prepaid / 2);
        assert_eq!(slot.state.prepaid_tax_balance, prepaid - prepaid / 2);
        assert_eq!(slot.state.valuation, 1_000 * ETH);
        assert_eq!(slot.state.locked_valuation, 100 * ETH);
        assert_eq!(slot.state.last_tax_settlement, START + WEEK);
        assert_eq!(ctx.total_for(TransferReason::Tax), prepaid / 2);
    }

    #[test]
    fn test_overdue_period_decays_lock_and_valuation() {
        let mut slot = claimed(Pubkey::new_unique(), 1_000 * ETH, 1);
        let prepaid = slot.state.prepaid_tax_balance;
        let decay = period_decay(1_000 * ETH, 8_000, 604_800).unwrap();

        let mut ctx = ctx(Pubkey::new_unique(), 0, START + WEEK + 1);
        let settlement = slot.poke(&mut ctx).unwrap();
        assert_eq!(settlement.periods_charged, 1);
        assert_eq!(settlement.tax_collected, prepaid + decay);
        assert!(!settlement.forfeited);
        assert_eq!(slot.state.prepaid_tax_balance, 0);
        assert_eq!(slot.state.valuation, 1_000 * ETH - decay);
        assert_eq!(slot.state.locked_valuation, 100 * ETH - decay);
        assert_eq!(slot.state.base_valuation, 1_000 * ETH);
        assert_eq!(slot.state.tax_paid_until, START + 2 * WEEK);
        assert_eq!(slot.state.last_tax_settlement, START + 2 * WEEK);
    }

    #[test]
    fn test_exhaustion_vacates_and_sweeps() {
        let mut slot = claimed(Pubkey::new_unique(), 1_000 * ETH, 1);
        let escrow = slot.escrow_balance().unwrap();

        let mut ctx = ctx(Pubkey::new_unique(), 0, START + 30 * WEEK);
        let settlement = slot.poke(&mut ctx).unwrap();
        assert!(settlement.forfeited);
        assert!(slot.state.is_vacant());
        assert_eq!(slot.state, EnabledSlotState::default());
        let forwarded = ctx.total_for(TransferReason::Tax) + ctx.total_for(TransferReason::Sweep);
        assert_eq!(forwarded, escrow);
        // A 10 % lock erodes in well under 30 periods at 80 % a year.
        assert!(settlement.periods_charged < 30);
    }

    #[test]
    fn test_dust_floor_forces_vacancy() {
        let mut slot = EnabledSlot::new(
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            Pubkey::new_unique(),
            SlotConfig::default(),
            9_000,
        )
        .unwrap();
        let cost = claim_cost(&slot.config, 1_000 * ETH, 1).unwrap();
        slot.claim(&mut ctx(Pubkey::new_unique(), cost, START), 1_000 * ETH, 1, String::new())
            .unwrap();
        // A 90 % dust floor on the lock is crossed by the first overdue charge.
        let settlement = slot.poke(&mut ctx(Pubkey::new_unique(), 0, START + WEEK + 1)).unwrap();
        assert!(settlement.forfeited);
        assert_eq!(settlement.periods_charged, 1);
        assert!(settlement.swept > 0);
        assert!(slot.state.is_vacant());
    }

    #[test]
    fn test_take_over_refunds_incumbent() {
        let incumbent = Pubkey::new_unique();
        let challenger = Pubkey::new_unique();
        let mut slot = claimed(incumbent, 1_000 * ETH, 2);
        let escrow = slot.escrow_balance().unwrap();

        let cost = claim_cost(&slot.config, 1_500 * ETH, 3).unwrap();
        let mut ctx = ctx(challenger, cost, START + WEEK);
        slot.take_over(&mut ctx, 1_500 * ETH, 3, "ipfs://b".into()).unwrap();

        let refund = ctx.total_for(TransferReason::Refund);
        let tax = ctx.total_for(TransferReason::Tax);
        assert_eq!(refund + tax, escrow);
        assert_eq!(slot.state.current_owner, Some(challenger));
        assert_eq!(slot.state.locked_valuation, 150 * ETH);
        assert_eq!(slot.state.tax_paid_until, START + WEEK + 3 * WEEK);
        assert_eq!(slot.state.content_update_count, 0);
        assert_eq!(slot.state.current_ad_uri, "ipfs://b");
    }

    #[test]
    fn test_take_over_requires_increment() {
        let mut slot = claimed(Pubkey::new_unique(), 1_000, 1);
        let result = slot.take_over(
            &mut ctx(Pubkey::new_unique(), u128::MAX / 2, START),
            1_099,
            1,
            String::new(),
        );
        assert_eq!(result, Err(SlotError::BidIncrementTooLow));
        assert!(slot
            .clone()
            .take_over(&mut ctx(Pubkey::new_unique(), 10_000, START), 1_100, 1, String::new())
            .is_ok());
    }

    #[test]
    fn test_take_over_vacant_slot_fails() {
        let mut slot = slot();
        let result = slot.take_over(&mut ctx(Pubkey::new_unique(), 10_000, START), 1_000, 1, String::new());
        assert_eq!(result, Err(SlotError::SlotNotOccupied));
    }

    #[test]
    fn test_take_over_own_slot_fails() {
        let owner = Pubkey::new_unique();
        let mut slot = claimed(owner, 1_000, 1);
        let result = slot.take_over(&mut ctx(owner, 10_000, START), 2_000, 1, String::new());
        assert_eq!(result, Err(SlotError::AlreadySlotOwner));
    }

    #[test]
    fn test_take_over_after_exhaustion_claims() {
        let challenger = Pubkey::new_unique();
        let mut slot = claimed(Pubkey::new_unique(), 1_000 * ETH, 1);
        let cost = claim_cost(&slot.config, 10 * ETH, 1).unwrap();
        let mut ctx = ctx(challenger, cost, START + 50 * WEEK);
        // Far below the incumbent's valuation: no increment applies once vacated.
        slot.take_over(&mut ctx, 10 * ETH, 1, String::new()).unwrap();
        assert_eq!(slot.state.current_owner, Some(challenger));
        assert_eq!(ctx.total_for(TransferReason::Refund), 0);
    }

    #[test]
    fn test_renew_is_additive() {
        let owner = Pubkey::new_unique();
        let mut slot = claimed(owner, 1_000 * ETH, 2);
        let before = slot.state.clone();
        let tax = tax_for_periods(1_000 * ETH, 1, 8_000, 604_800).unwrap();

        slot.renew(&mut ctx(owner, tax, START), 1).unwrap();
        assert_eq!(slot.state.prepaid_tax_balance, before.prepaid_tax_balance + tax);
        assert_eq!(slot.state.tax_paid_until, before.tax_paid_until + WEEK);
        assert_eq!(slot.state.valuation, before.valuation);
        assert_eq!(slot.state.locked_valuation, before.locked_valuation);
        assert_eq!(slot.state.current_owner, Some(owner));
    }

    #[test]
    fn test_renew_requires_owner() {
        let mut slot = claimed(Pubkey::new_unique(), 1_000 * ETH, 2);
        let result = slot.renew(&mut ctx(Pubkey::new_unique(), 100 * ETH, START), 1);
        assert_eq!(result, Err(SlotError::NotSlotOwner));
    }

    #[test]
    fn test_forfeit_by_owner() {
        let owner = Pubkey::new_unique();
        let mut slot = claimed(owner, 1_000 * ETH, 2);
        let mut ctx = ctx(owner, 0, START);
        slot.forfeit(&mut ctx).unwrap();
        assert!(slot.state.is_vacant());
        assert_eq!(ctx.total_for(TransferReason::Sweep), 100 * ETH);
        assert_eq!(
            ctx.total_for(TransferReason::Refund),
            tax_for_periods(1_000 * ETH, 2, 8_000, 604_800).unwrap()
        );
    }

    #[test]
    fn test_forfeit_by_stranger_requires_overdue() {
        let mut slot = claimed(Pubkey::new_unique(), 1_000 * ETH, 1);
        let stranger = Pubkey::new_unique();
        assert_eq!(
            slot.forfeit(&mut ctx(stranger, 0, START + WEEK)),
            Err(SlotError::NotForfeitable)
        );
        let mut ctx = ctx(stranger, 0, START + WEEK + 1);
        slot.forfeit(&mut ctx).unwrap();
        assert!(slot.state.is_vacant());
        assert!(ctx.total_for(TransferReason::Sweep) > 0);
    }

    #[test]
    fn test_wide_valuation_stays_settleable() {
        let owner = Pubkey::new_unique();
        let valuation = 2_000_000_000 * ETH;
        let mut slot = claimed(owner, valuation, 1);

        let mut poke = ctx(Pubkey::new_unique(), 0, START + 2 * WEEK);
        let settlement = slot.poke(&mut poke).unwrap();
        assert_eq!(settlement.periods_charged, 1);
        assert!(!settlement.forfeited);
        assert!(slot.state.valuation < valuation);
        assert_eq!(slot.state.current_owner, Some(owner));

        let mut ctx = ctx(Pubkey::new_unique(), 0, START + 3 * WEEK);
        slot.forfeit(&mut ctx).unwrap();
        assert!(slot.state.is_vacant());
        assert!(ctx.total_for(TransferReason::Sweep) > 0);
    }

    #[test]
    fn test_forfeit_vacant_slot_fails() {
        assert_eq!(
            slot().forfeit(&mut ctx(Pubkey::new_unique(), 0, START)),
            Err(SlotError::SlotNotOccupied)
        );
    }

    #[test]
    fn test_unfunded_operations_reject_payment() {
        let owner = Pubkey::new_unique();
        let mut slot = claimed(owner, 1_000, 1);
        assert_eq!(slot.poke(&mut ctx(owner, 1, START)), Err(SlotError::UnexpectedPayment));
        assert_eq!(slot.forfeit(&mut ctx(owner, 1, START)), Err(SlotError::UnexpectedPayment));
        assert_eq!(
            slot.update_ad_uri(&mut ctx(owner, 1, START), String::new()),
            Err(SlotError::UnexpectedPayment)
        );
    }

    #[test]
    fn test_update_ad_uri_limit() {
        let owner = Pubkey::new_unique();
        let mut slot = claimed(owner, 1_000 * ETH, 2);
        for i in 0..3 {
            slot.update_ad_uri(&mut ctx(owner, 0, START), format!("ipfs://{i}"))
                .unwrap();
        }
        assert_eq!(slot.state.current_ad_uri, "ipfs://2");
        assert_eq!(
            slot.update_ad_uri(&mut ctx(owner, 0, START), "ipfs://3".into()),
            Err(SlotError::ContentUpdateLimitReached)
        );
        assert_eq!(
            slot.update_ad_uri(&mut ctx(Pubkey::new_unique(), 0, START), "x".into()),
            Err(SlotError::NotSlotOwner)
        );
    }

    #[test]
    fn test_preview_does_not_mutate() {
        let slot = claimed(Pubkey::new_unique(), 1_000 * ETH, 1);
        let before = slot.clone();
        let (projected, settlement) = slot.preview(START + 30 * WEEK).unwrap();
        assert_eq!(slot, before);
        assert!(settlement.forfeited);
        assert!(projected.state.is_vacant());
    }
}
