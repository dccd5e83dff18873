//! Property-based tests for the spread solver.
//!
//! - Pricing at a spread and solving back recovers the spread
//! - Price falls as the spread widens

use passthru_analytics::prelude::*;
use passthru_core::types::{Date, Spread, SpreadType};
use passthru_curves::{SpotCurve, TenorGrid};
use passthru_mbs::generate_cpr;
use proptest::prelude::*;

fn settlement() -> Date {
    Date::from_ymd(2024, 3, 1).unwrap()
}

/// Monthly curve from a level and a linear slope over 30 years.
fn curve(level: f64, slope: f64) -> SpotCurve {
    let rates: Vec<f64> = (1..=360)
        .map(|m| level + slope * f64::from(m) / 360.0)
        .collect();
    SpotCurve::new(settlement(), TenorGrid::monthly(), &rates).unwrap()
}

fn spread_type() -> impl Strategy<Value = SpreadType> {
    prop_oneof![Just(SpreadType::ISpread), Just(SpreadType::ZSpread)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn solve_inverts_price(
        coupon in 3.0f64..8.0,
        remaining in 120u32..=360,
        cpr in 0.0f64..40.0,
        level in 2.0f64..6.0,
        slope in -1.5f64..1.5,
        bps in -100i32..400,
        spread_type in spread_type(),
    ) {
        let schedule = generate_cpr(settlement(), coupon, remaining, 0, 25, cpr, remaining, 1_000_000.0)
            .unwrap();
        let curve = curve(level, slope);
        let spread = Spread::from_bps_i32(bps, spread_type);
        let observed = price(&schedule, &curve, settlement(), &spread).unwrap();

        let solved = solve_spread(&schedule, &curve, settlement(), observed, spread_type).unwrap();

        prop_assert!((solved.as_bps_f64() - f64::from(bps)).abs() <= 1e-4);
    }

    #[test]
    fn price_decreases_in_spread(
        cpr in 0.0f64..40.0,
        bps in -100i32..400,
        widen in 1i32..200,
        spread_type in spread_type(),
    ) {
        let schedule = generate_cpr(settlement(), 6.0, 360, 0, 25, cpr, 360, 1_000_000.0).unwrap();
        let curve = curve(4.0, 0.5);

        let tight = price(&schedule, &curve, settlement(), &Spread::from_bps_i32(bps, spread_type)).unwrap();
        let wide = price(&schedule, &curve, settlement(), &Spread::from_bps_i32(bps + widen, spread_type))
            .unwrap();

        prop_assert!(wide < tight);
    }
}
