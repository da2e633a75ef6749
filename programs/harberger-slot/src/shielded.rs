//! Bond-forfeiture ("valuation tax shielded") slot lifecycle.
//!
//! The bond is posted beside the valuation and never erodes.  Prepaid tax
//! drains linearly as in the enabled variant, but once `now` passes
//! `tax_paid_until` the slot expires outright: the whole bond goes to the
//! treasury and every field is cleared in one step.

use {
    crate::{
        config::SlotConfig,
        constants::MAX_AD_URI_LEN,
        context::{InvokeContext, TransferReason},
        error::SlotError,
        ic_msg,
        slot::{price_term, HarbergerSlot, Settlement, SlotType},
        state::{ShieldedSlot, ShieldedSlotState},
        tax::{
            advance_by_periods, min_next_valuation, overdue_periods, prepaid_accrual,
            tax_for_periods,
        },
    },
    log::*,
    solana_clock::UnixTimestamp,
    solana_pubkey::Pubkey,
};

impl ShieldedSlot {
    pub fn new(
        address: Pubkey,
        factory: Pubkey,
        treasury: Pubkey,
        governance: Pubkey,
        config: SlotConfig,
    ) -> Result<Self, SlotError> {
        if treasury == Pubkey::default() || governance == Pubkey::default() {
            return Err(SlotError::ZeroAddress);
        }
        config.validate()?;
        Ok(Self {
            address,
            factory,
            treasury,
            governance,
            config,
            state: ShieldedSlotState::default(),
        })
    }

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

        self.state = ShieldedSlotState {
            current_owner: Some(ctx.signer),
            valuation,
            bonded_amount: bond,
            prepaid_tax_balance: tax,
            tax_paid_until,
            last_tax_settlement: now,
            current_ad_uri: ad_uri,
            content_update_count: 0,
        };
        Ok(())
    }

    fn require_owner(&self, ctx: &InvokeContext) -> Result<(), SlotError> {
        match self.state.current_owner {
            None => Err(SlotError::SlotNotOccupied),
            Some(owner) if owner != ctx.signer => Err(SlotError::NotSlotOwner),
            Some(_) => Ok(()),
        }
    }
}

impl HarbergerSlot for ShieldedSlot {
    fn slot_type(&self) -> SlotType {
        SlotType::ValuationTaxShielded
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
            .bonded_amount
            .checked_add(self.state.prepaid_tax_balance)
            .ok_or(SlotError::ArithmeticOverflow)
    }

    fn settle(&mut self, ctx: &mut InvokeContext) -> Result<Settlement, SlotError> {
        let Some(owner) = self.state.current_owner else {
            return Ok(Settlement::default());
        };
        let now = ctx.now();

        let accrued = prepaid_accrual(
            self.state.prepaid_tax_balance,
            self.state.last_tax_settlement,
            self.state.tax_paid_until,
            now,
        )?;
        self.state.prepaid_tax_balance -= accrued;
        if now > self.state.last_tax_settlement {
            self.state.last_tax_settlement = now.min(self.state.tax_paid_until);
        }
        let mut settlement = Settlement {
            tax_collected: accrued,
            ..Settlement::default()
        };

        if now > self.state.tax_paid_until {
            settlement.periods_charged = overdue_periods(
                self.state.tax_paid_until,
                now,
                self.config.tax_period_seconds,
            )?;
            settlement.swept = self.escrow_balance()?;
            settlement.forfeited = true;
            warn!(
                "shielded slot {}: coverage of {} lapsed at {}, bond forfeited",
                self.address, owner, self.state.tax_paid_until
            );
            ic_msg!(
                ctx,
                "Settle: slot {} expired, sweeping bond {} from {}",
                self.address,
                settlement.swept,
                owner
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
        if !self.state.is_vacant() {
            return Err(SlotError::SlotAlreadyOccupied);
        }
        self.occupy(ctx, valuation, periods, ad_uri)?;
        ic_msg!(
            ctx,
            "Claim: {} claimed slot {} at valuation {}, bond {}",
            ctx.signer,
            self.address,
            valuation,
            self.state.bonded_amount
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
            return self.occupy(ctx, valuation, periods, ad_uri);
        };
        if incumbent == ctx.signer {
            return Err(SlotError::AlreadySlotOwner);
        }
        if valuation < min_next_valuation(self.state.valuation, self.config.min_bid_increment_bps)? {
            return Err(SlotError::BidIncrementTooLow);
        }

        let refund = self.escrow_balance()?;
        self.occupy(ctx, valuation, periods, ad_uri)?;
        ctx.transfer_out(incumbent, refund, TransferReason::Refund);
        ic_msg!(
            ctx,
            "TakeOver: {} took slot {} from {}, refunded {}",
            ctx.signer,
            self.address,
            incumbent,
            refund
        );
        Ok(())
    }

    fn renew(&mut self, ctx: &mut InvokeContext, periods: u64) -> Result<(), SlotError> {
        self.settle(ctx)?;
        self.require_owner(ctx)?;
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
        ic_msg!(ctx, "Renew: slot {} paid until {}", self.address, tax_paid_until);
        Ok(())
    }

    fn forfeit(&mut self, ctx: &mut InvokeContext) -> Result<(), SlotError> {
        ctx.reject_payment()?;
        let owner = self.state.current_owner.ok_or(SlotError::SlotNotOccupied)?;
        if ctx.signer != owner && ctx.now() <= self.state.tax_paid_until {
            return Err(SlotError::NotForfeitable);
        }

        // A lapsed slot expires during settlement; nothing is left to release.
        self.settle(ctx)?;
        if self.state.is_vacant() {
            return Ok(());
        }

        let bond = self.state.bonded_amount;
        let prepaid = self.state.prepaid_tax_balance;
        ctx.transfer_out(self.treasury, bond, TransferReason::Sweep);
        ctx.transfer_out(owner, prepaid, TransferReason::Refund);
        self.state.vacate();
        ic_msg!(ctx, "Forfeit: slot {} released by {}", self.address, owner);
        Ok(())
    }

    fn update_ad_uri(
        &mut self,
        ctx: &mut InvokeContext,
        ad_uri: String,
    ) -> Result<(), SlotError> {
        ctx.reject_payment()?;
        self.settle(ctx)?;
        self.require_owner(ctx)?;
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
