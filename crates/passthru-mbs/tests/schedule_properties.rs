//! Property-based tests for schedule and WAL invariants.
//!
//! - Balances chain from one period to the next and never increase
//! - Balances never go negative and a terminated schedule ends at zero
//! - Cash flow is interest plus both principal components
//! - WAL does not lengthen as prepayment speeds up

use passthru_core::Date;
use passthru_mbs::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Pool {
    coupon: f64,
    remaining: u32,
    balloon: u32,
    io: u32,
    balance: f64,
}

fn pools() -> impl Strategy<Value = Pool> {
    (12u32..=360)
        .prop_flat_map(|remaining| (Just(remaining), 2u32..=remaining))
        .prop_flat_map(|(remaining, balloon)| {
            (
                0.0f64..12.0,
                Just(remaining),
                Just(balloon),
                0u32..balloon.min(24),
                1_000.0f64..5_000_000.0,
            )
        })
        .prop_map(|(coupon, remaining, balloon, io, balance)| Pool {
            coupon,
            remaining,
            balloon,
            io,
            balance,
        })
}

fn terms(pool: &Pool, model: PrepaymentModel) -> PoolTerms {
    PoolTerms::builder()
        .settlement(Date::from_ymd(2024, 3, 1).unwrap())
        .coupon(pool.coupon)
        .remaining_term(pool.remaining)
        .balloon_term(pool.balloon)
        .interest_only_months(pool.io)
        .pay_delay(25)
        .prepayment(model)
        .original_balance(pool.balance)
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn schedule_balances_are_consistent(pool in pools(), cpr in 0.0f64..=100.0) {
        let schedule = generate(&terms(&pool, PrepaymentModel::Cpr(cpr)), &CashFlowConventions::default())
            .unwrap();
        let periods = schedule.periods();

        prop_assert!(!periods.is_empty());
        prop_assert!(periods.len() <= pool.balloon as usize);
        prop_assert!((periods[0].starting_balance - pool.balance).abs() < 1e-9);

        for pair in periods.windows(2) {
            prop_assert_eq!(pair[0].ending_balance, pair[1].starting_balance);
            prop_assert_eq!(pair[1].period, pair[0].period + 1);
            prop_assert!(pair[1].pay_date > pair[0].pay_date);
        }

        for p in periods {
            prop_assert!(p.ending_balance >= 0.0);
            prop_assert!(p.ending_balance <= p.starting_balance);
            let total = p.interest + p.scheduled_principal + p.unscheduled_principal;
            prop_assert!((p.cash_flow - total).abs() <= 1e-9 * total.max(1.0));
        }

        prop_assert_eq!(schedule.state(), ScheduleState::Terminated);
        prop_assert_eq!(schedule.last().unwrap().ending_balance, 0.0);
        if periods.len() < pool.balloon as usize {
            prop_assert!(periods.last().unwrap().period < pool.balloon);
        }
    }

    #[test]
    fn wal_shortens_with_speed(pool in pools(), slow in 0.0f64..50.0, extra in 0.0f64..50.0) {
        let wal = |cpr: f64| {
            generate(&terms(&pool, PrepaymentModel::Cpr(cpr)), &CashFlowConventions::default())
                .unwrap()
                .wal()
                .unwrap()
        };

        prop_assert!(wal(slow + extra) <= wal(slow) + 1e-9);
    }

    #[test]
    fn psa_speed_orders_wal(pool in pools(), slow in 0.0f64..300.0, extra in 0.0f64..300.0) {
        let wal = |psa: f64| {
            generate(&terms(&pool, PrepaymentModel::Psa(psa)), &CashFlowConventions::default())
                .unwrap()
                .wal()
                .unwrap()
        };

        prop_assert!(wal(slow + extra) <= wal(slow) + 1e-9);
    }
}
