//! Property-based tests for slot lifecycle invariants.
//!
//! Properties tested:
//! 1. Conservation: no call sequence creates or destroys funds
//! 2. Escrow backing: the slot account always holds exactly the collateral
//!    plus prepaid tax its state records
//! 3. Vacancy: no owner iff no collateral, for both variants
//! 4. Enabled lock never exceeds the live valuation
//! 5. Claim prices collateral and prepaid tax exactly

#[cfg(test)]
mod tests {
    use {
        pensieve_harberger_slot_program::{
            bank::{Bank, InMemoryBank},
            context::InvokeContext,
            instruction::SlotInstruction,
            processor::execute,
            tax::{bond_amount, claim_cost, tax_for_periods},
            EnabledSlot, HarbergerSlot, ShieldedSlot, Slot, SlotConfig,
        },
        proptest::prelude::*,
        solana_clock::Clock,
        solana_pubkey::Pubkey,
    };

    const ETH: u128 = 1_000_000_000_000_000_000;
    const START: i64 = 1_700_000_000;
    const WEEK: i64 = 604_800;

    // ── Helpers ──

    #[derive(Debug, Clone)]
    enum Op {
        Claim { user: usize, valuation: u128, periods: u64 },
        TakeOver { user: usize, bump_bps: u16, periods: u64 },
        Renew { user: usize, periods: u64 },
        Poke,
        Forfeit { user: usize },
        UpdateAdUri { user: usize },
        Wait { seconds: i64 },
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..3usize, 10..=10_000 * ETH, 1..=6u64)
                .prop_map(|(user, valuation, periods)| Op::Claim { user, valuation, periods }),
            (0..3usize, 1_000..=20_000u16, 1..=6u64)
                .prop_map(|(user, bump_bps, periods)| Op::TakeOver { user, bump_bps, periods }),
            (0..3usize, 1..=4u64).prop_map(|(user, periods)| Op::Renew { user, periods }),
            Just(Op::Poke),
            (0..3usize).prop_map(|user| Op::Forfeit { user }),
            (0..3usize).prop_map(|user| Op::UpdateAdUri { user }),
            (1..=(6 * WEEK)).prop_map(|seconds| Op::Wait { seconds }),
        ]
    }

    fn make_slot(shielded: bool, dust_rate_bps: u16) -> Slot {
        let (address, factory, treasury, governance) = (
            Pubkey::new_from_array([1; 32]),
            Pubkey::new_from_array([2; 32]),
            Pubkey::new_from_array([3; 32]),
            Pubkey::new_from_array([4; 32]),
        );
        if shielded {
            Slot::Shielded(
                ShieldedSlot::new(address, factory, treasury, governance, SlotConfig::default())
                    .unwrap(),
            )
        } else {
            Slot::Enabled(
                EnabledSlot::new(
                    address,
                    factory,
                    treasury,
                    governance,
                    SlotConfig::default(),
                    dust_rate_bps,
                )
                .unwrap(),
            )
        }
    }

    fn user(index: usize) -> Pubkey {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xAA;
        bytes[31] = index as u8;
        Pubkey::new_from_array(bytes)
    }

    /// Translate `op` into a call; returns `None` for pure clock moves.
    fn to_call(slot: &Slot, op: &Op) -> Option<(Pubkey, u128, SlotInstruction)> {
        let config = slot.config();
        match *op {
            Op::Claim { user: u, valuation, periods } => Some((
                user(u),
                claim_cost(config, valuation, periods).unwrap(),
                SlotInstruction::Claim { valuation, periods, ad_uri: "ipfs://a".into() },
            )),
            Op::TakeOver { user: u, bump_bps, periods } => {
                let current = slot.valuation().max(10);
                let valuation = current + current * u128::from(bump_bps) / 10_000;
                Some((
                    user(u),
                    claim_cost(config, valuation, periods).unwrap(),
                    SlotInstruction::TakeOver { valuation, periods, ad_uri: "ipfs://b".into() },
                ))
            }
            Op::Renew { user: u, periods } => Some((
                user(u),
                tax_for_periods(
                    slot.valuation(),
                    periods,
                    config.annual_tax_rate_bps,
                    config.tax_period_seconds,
                )
                .unwrap(),
                SlotInstruction::Renew { periods },
            )),
            Op::Poke => Some((user(9), 0, SlotInstruction::Poke)),
            Op::Forfeit { user: u } => Some((user(u), 0, SlotInstruction::Forfeit)),
            Op::UpdateAdUri { user: u } => Some((
                user(u),
                0,
                SlotInstruction::UpdateAdUri { ad_uri: "ipfs://c".into() },
            )),
            Op::Wait { .. } => None,
        }
    }

    fn assert_consistent(slot: &Slot, bank: &InMemoryBank) -> Result<(), TestCaseError> {
        prop_assert_eq!(bank.balance(&slot.address()), slot.escrow_balance().unwrap());
        match slot {
            Slot::Enabled(enabled) => {
                let state = &enabled.state;
                prop_assert_eq!(state.current_owner.is_none(), state.valuation == 0);
                prop_assert_eq!(state.current_owner.is_none(), state.locked_valuation == 0);
                prop_assert!(state.locked_valuation <= state.valuation);
                prop_assert!(state.valuation <= state.base_valuation);
            }
            Slot::Shielded(shielded) => {
                let state = &shielded.state;
                prop_assert_eq!(state.current_owner.is_none(), state.bonded_amount == 0);
            }
        }
        Ok(())
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 1-4. Arbitrary call sequences
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn call_sequences_conserve_funds(
            shielded in any::<bool>(),
            dust_rate_bps in 0..=500u16,
            ops in prop::collection::vec(op_strategy(), 1..40),
        ) {
            let mut slot = make_slot(shielded, dust_rate_bps);
            let mut bank = InMemoryBank::new();
            for index in 0..3 {
                bank.fund(&user(index), 1_000_000_000 * ETH);
            }
            let supply = bank.total_supply();
            let mut now = START;

            for op in &ops {
                if let Op::Wait { seconds } = op {
                    now += seconds;
                    continue;
                }
                let Some((signer, attached, instruction)) = to_call(&slot, op) else {
                    continue;
                };
                let before = slot.clone();
                let clock = Clock { unix_timestamp: now, ..Clock::default() };
                let ctx = InvokeContext::new(signer, attached, clock);
                if execute(&mut slot, &mut bank, ctx, instruction).is_err() {
                    prop_assert_eq!(&slot, &before);
                }

                prop_assert_eq!(bank.total_supply(), supply);
                assert_consistent(&slot, &bank)?;
            }
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 5. Claim pricing
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn claim_sets_exact_collateral(
            shielded in any::<bool>(),
            valuation in 10..=1_000_000 * ETH,
            periods in 1..=52u64,
        ) {
            let mut slot = make_slot(shielded, 100);
            let mut bank = InMemoryBank::new();
            let owner = user(0);
            let cost = claim_cost(slot.config(), valuation, periods).unwrap();
            bank.fund(&owner, cost);

            let clock = Clock { unix_timestamp: START, ..Clock::default() };
            execute(
                &mut slot,
                &mut bank,
                InvokeContext::new(owner, cost, clock),
                SlotInstruction::Claim { valuation, periods, ad_uri: String::new() },
            )
            .unwrap();

            let bond = bond_amount(valuation, 1_000).unwrap();
            let tax = tax_for_periods(valuation, periods, 8_000, 604_800).unwrap();
            prop_assert_eq!(slot.prepaid_tax_balance(), tax);
            prop_assert_eq!(slot.escrow_balance().unwrap(), bond + tax);
            prop_assert_eq!(slot.tax_paid_until(), START + WEEK * periods as i64);
            prop_assert_eq!(bank.balance(&owner), 0);
        }
    }
}
