//! Property-based tests for the tax primitives.
//!
//! Properties tested:
//! 1. Bond never exceeds valuation and scales with the bond rate
//! 2. Tax for n periods is additive up to truncation
//! 3. Period decay never exceeds the valuation it is charged on
//! 4. The minimum next bid always clears the current valuation
//! 5. Prepaid accrual is monotone in time and capped by the balance

#[cfg(test)]
mod tests {
    use {
        pensieve_harberger_slot_program::tax::{
            bond_amount, min_next_valuation, period_decay, prepaid_accrual, tax_for_periods,
        },
        proptest::prelude::*,
    };

    const MAX_VALUATION: u128 = 1_000_000 * 1_000_000_000_000_000_000;
    const WEEK: u64 = 604_800;

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 1. Bond
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn bond_bounded_by_valuation(
            valuation in 0..=MAX_VALUATION,
            bond_rate in 1..=10_000u16,
        ) {
            let bond = bond_amount(valuation, bond_rate).unwrap();
            prop_assert!(bond <= valuation);
            if bond_rate == 10_000 {
                prop_assert_eq!(bond, valuation);
            }
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 2. Period tax
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn tax_for_periods_is_additive(
            valuation in 0..=MAX_VALUATION,
            rate in 1..=10_000u16,
            a in 1..=52u64,
            b in 1..=52u64,
        ) {
            let whole = tax_for_periods(valuation, a + b, rate, WEEK).unwrap();
            let split = tax_for_periods(valuation, a, rate, WEEK).unwrap()
                + tax_for_periods(valuation, b, rate, WEEK).unwrap();
            // Truncation loses at most one unit per split term.
            prop_assert!(whole >= split);
            prop_assert!(whole - split <= 1);
        }

        #[test]
        fn tax_is_monotone_in_valuation(
            valuation in 0..MAX_VALUATION,
            rate in 1..=10_000u16,
            periods in 1..=52u64,
        ) {
            let lower = tax_for_periods(valuation, periods, rate, WEEK).unwrap();
            let higher = tax_for_periods(valuation + 1, periods, rate, WEEK).unwrap();
            prop_assert!(higher >= lower);
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 3. Decay & bids
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn decay_never_exceeds_valuation(
            valuation in 0..=MAX_VALUATION,
            rate in 1..=10_000u16,
        ) {
            let decay = period_decay(valuation, rate, WEEK).unwrap();
            prop_assert!(decay <= valuation);
            // Multiplicative decay charges no more than the linear period tax.
            prop_assert!(decay <= tax_for_periods(valuation, 1, rate, WEEK).unwrap() + 1);
        }

        #[test]
        fn min_next_bid_clears_current(
            current in 1..=MAX_VALUATION,
            increment in 1..=10_000u16,
        ) {
            let next = min_next_valuation(current, increment).unwrap();
            prop_assert!(next > current);
            // Ceil rounding: never more than one unit above the exact premium.
            let exact_floor = current + current * u128::from(increment) / 10_000;
            prop_assert!(next >= exact_floor && next <= exact_floor + 1);
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // 4. Prepaid accrual
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn accrual_monotone_and_capped(
            prepaid in 0..=MAX_VALUATION,
            window in 1..=(10 * WEEK as i64),
            t1 in 0..=(12 * WEEK as i64),
            dt in 0..=(2 * WEEK as i64),
        ) {
            let last = 1_700_000_000i64;
            let paid_until = last + window;
            let first = prepaid_accrual(prepaid, last, paid_until, last + t1).unwrap();
            let second = prepaid_accrual(prepaid, last, paid_until, last + t1 + dt).unwrap();
            prop_assert!(first <= second);
            prop_assert!(second <= prepaid);
            if t1 >= window {
                prop_assert_eq!(first, prepaid);
            }
        }
    }
}
