//! Level-pay amortization with prepayments.
//!
//! Each month the engine re-levels the mortgage payment off the current
//! balance and the months still remaining, splits it into interest and
//! scheduled principal, then prepays a fraction SMM of what is left:
//!
//! ```text
//! cm        = coupon / 100 * 30 / 360
//! payment   = bal * cm * (1 + cm)^n / ((1 + cm)^n - 1)
//! interest  = bal * cm
//! principal = payment - interest
//! prepay    = smm * (bal - principal)
//! ```
//!
//! Interest-only months pay no scheduled principal. The balloon month pays
//! off the whole balance. A month whose prepayment would overshoot the
//! balance is clamped and ends the schedule.

use passthru_core::Date;

use crate::conventions::CashFlowConventions;
use crate::error::MbsResult;
use crate::pool::PoolTerms;
use crate::prepayment::PrepaymentModel;
use crate::schedule::{AmortizationSchedule, Period, ScheduleState};

/// Ending balances below this are treated as fully paid down.
pub const BALANCE_EPSILON: f64 = 1e-9;

/// Generates the monthly schedule for a pool.
///
/// Periods run from 1 to the balloon term and stop early once the balance
/// reaches zero. Pay dates fall in successive months after settlement on
/// the day given by the pay delay convention.
///
/// # Errors
///
/// Returns `MbsError::InvalidScheduleParameters` if the terms fail
/// validation or the pay delay gives no valid day of month.
///
/// # Example
///
/// ```rust
/// use passthru_core::Date;
/// use passthru_mbs::{generate, CashFlowConventions, PoolTerms, PrepaymentModel};
///
/// let terms = PoolTerms::builder()
///     .settlement(Date::from_ymd(2024, 3, 1).unwrap())
///     .coupon(7.0)
///     .remaining_term(360)
///     .pay_delay(15)
///     .prepayment(PrepaymentModel::Cpr(0.0))
///     .original_balance(500_000.0)
///     .build()
///     .unwrap();
///
/// let schedule = generate(&terms, &CashFlowConventions::default()).unwrap();
/// assert_eq!(schedule.len(), 360);
/// assert_eq!(schedule.periods()[0].pay_date.to_string(), "2024-04-15");
/// ```
pub fn generate(
    terms: &PoolTerms,
    conventions: &CashFlowConventions,
) -> MbsResult<AmortizationSchedule> {
    terms.validate()?;
    let anchor = conventions.pay_delay.anchor_day(terms.pay_delay())?;

    let settlement = terms.settlement();
    let coupon = terms.coupon();
    let cm = monthly_rate(coupon);
    let balloon = terms.balloon_term();
    let io_months = terms.interest_only_months();
    let prepayment = terms.prepayment();

    let mut balance = terms.original_balance();
    let mut wam = terms.remaining_term();
    let mut state = ScheduleState::Accruing;
    let mut periods = Vec::with_capacity(balloon as usize);

    for i in 1..=balloon {
        let pay_date = settlement.add_months(i as i32)?.with_day_clamped(anchor)?;
        let smm = prepayment.smm(terms.age() + i);
        let interest = balance * cm;

        let (mut principal, mut prepay) = if i == balloon {
            (balance, 0.0)
        } else if i <= io_months {
            let prepay = if conventions.prepay_during_io {
                smm * balance
            } else {
                0.0
            };
            (0.0, prepay)
        } else {
            let n = conventions.payment_term.periods(wam);
            let principal = level_payment(balance, cm, n) - interest;
            (principal, smm * (balance - principal))
        };

        let mut ending = balance - principal - prepay;
        if i == balloon {
            ending = 0.0;
            state = ScheduleState::Terminated;
        } else if balance - interest - principal - prepay < 0.0 {
            if balance - interest - principal < 0.0 {
                principal = balance - interest;
                prepay = 0.0;
            } else {
                prepay = balance - interest - principal;
            }
            ending = 0.0;
            state = ScheduleState::Terminated;
            log::debug!("pool paid off early in period {i} of {balloon}");
        } else if ending < BALANCE_EPSILON {
            ending = 0.0;
            state = ScheduleState::Terminated;
            log::debug!("balance exhausted in period {i} of {balloon}");
        }

        log::trace!(
            "period {i}: balance {balance:.2}, interest {interest:.2}, principal {principal:.2}, prepay {prepay:.2}"
        );

        periods.push(Period {
            period: i,
            pay_date,
            starting_balance: balance,
            coupon,
            pay_delay: terms.pay_delay(),
            smm,
            interest,
            scheduled_principal: principal,
            unscheduled_principal: prepay,
            cash_flow: interest + principal + prepay,
            ending_balance: ending,
        });

        balance = ending;
        wam -= 1;

        if state == ScheduleState::Terminated {
            break;
        }
    }

    log::debug!(
        "generated {} periods for {:.2} at {coupon}% ({:?}), state {state:?}",
        periods.len(),
        terms.original_balance(),
        prepayment
    );

    Ok(AmortizationSchedule::new(settlement, periods, state))
}

/// Generates a constant-CPR schedule from flat arguments.
///
/// The pool is taken as unseasoned (original term equal to remaining term)
/// and default conventions apply.
///
/// # Errors
///
/// Same as [`generate`].
#[allow(clippy::too_many_arguments)]
pub fn generate_cpr(
    settlement: Date,
    coupon: f64,
    remaining_term: u32,
    interest_only_months: u32,
    pay_delay: u32,
    cpr: f64,
    balloon_term: u32,
    original_balance: f64,
) -> MbsResult<AmortizationSchedule> {
    let terms = PoolTerms::builder()
        .settlement(settlement)
        .coupon(coupon)
        .remaining_term(remaining_term)
        .interest_only_months(interest_only_months)
        .pay_delay(pay_delay)
        .prepayment(PrepaymentModel::Cpr(cpr))
        .balloon_term(balloon_term)
        .original_balance(original_balance)
        .build()?;

    generate(&terms, &CashFlowConventions::default())
}

/// Monthly rate from an annual coupon in percent on a 30/360 basis.
#[must_use]
pub fn monthly_rate(coupon: f64) -> f64 {
    coupon / 100.0 * 30.0 / 360.0
}

/// Level payment that amortizes `balance` over `n` months at rate `cm`.
#[must_use]
pub fn level_payment(balance: f64, cm: f64, n: u32) -> f64 {
    if n == 0 {
        return balance * (1.0 + cm);
    }
    if cm == 0.0 {
        return balance / f64::from(n);
    }
    let growth = (1.0 + cm).powi(n as i32);
    balance * cm * growth / (growth - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conventions::{PayDelayConvention, PaymentTermConvention};
    use approx::assert_relative_eq;

    fn settle() -> Date {
        Date::from_ymd(2024, 3, 1).unwrap()
    }

    fn terms(model: PrepaymentModel) -> PoolTerms {
        PoolTerms::builder()
            .settlement(settle())
            .coupon(7.0)
            .remaining_term(360)
            .pay_delay(15)
            .prepayment(model)
            .original_balance(500_000.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_level_payment() {
        let payment = level_payment(500_000.0, monthly_rate(7.0), 360);
        assert_relative_eq!(payment, 3326.5124, epsilon = 1e-3);
        assert_relative_eq!(level_payment(1200.0, 0.0, 12), 100.0);
    }

    #[test]
    fn test_zero_cpr_first_period() {
        let schedule = generate(&terms(PrepaymentModel::Cpr(0.0)), &CashFlowConventions::default())
            .unwrap();
        let first = schedule.first().unwrap();

        assert_relative_eq!(first.interest, 2916.6667, epsilon = 1e-3);
        assert_relative_eq!(first.scheduled_principal, 409.8458, epsilon = 1e-3);
        assert_relative_eq!(first.unscheduled_principal, 0.0);
        assert_relative_eq!(first.cash_flow, 3326.5124, epsilon = 1e-3);
        assert_eq!(first.period, 1);
        assert_eq!(first.pay_date, Date::from_ymd(2024, 4, 15).unwrap());
    }

    #[test]
    fn test_zero_cpr_full_term() {
        let schedule = generate(&terms(PrepaymentModel::Cpr(0.0)), &CashFlowConventions::default())
            .unwrap();

        assert_eq!(schedule.len(), 360);
        assert_eq!(schedule.state(), ScheduleState::Terminated);
        assert_relative_eq!(schedule.last().unwrap().ending_balance, 0.0);
        assert_relative_eq!(schedule.total_principal(), 500_000.0, epsilon = 1e-6);
        assert_eq!(
            schedule.last().unwrap().pay_date,
            Date::from_ymd(2054, 3, 15).unwrap()
        );
    }

    #[test]
    fn test_full_prepayment_terminates_immediately() {
        let schedule = generate(
            &terms(PrepaymentModel::Cpr(100.0)),
            &CashFlowConventions::default(),
        )
        .unwrap();

        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.state(), ScheduleState::Terminated);

        let only = schedule.first().unwrap();
        assert_relative_eq!(only.ending_balance, 0.0);
        assert_relative_eq!(only.smm, 1.0);
        assert_relative_eq!(
            only.scheduled_principal + only.unscheduled_principal,
            500_000.0 - only.interest,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_balances_chain() {
        let schedule = generate(
            &terms(PrepaymentModel::Cpr(12.0)),
            &CashFlowConventions::default(),
        )
        .unwrap();

        for pair in schedule.periods().windows(2) {
            assert_relative_eq!(pair[0].ending_balance, pair[1].starting_balance);
            assert!(pair[1].ending_balance <= pair[0].ending_balance);
        }
    }

    #[test]
    fn test_interest_only_months() {
        let terms = PoolTerms::builder()
            .settlement(settle())
            .coupon(6.0)
            .remaining_term(360)
            .interest_only_months(12)
            .pay_delay(25)
            .prepayment(PrepaymentModel::Cpr(6.0))
            .original_balance(100_000.0)
            .build()
            .unwrap();

        let with_prepay = generate(&terms, &CashFlowConventions::default()).unwrap();
        for period in &with_prepay.periods()[..12] {
            assert_relative_eq!(period.scheduled_principal, 0.0);
            assert!(period.unscheduled_principal > 0.0);
        }
        assert!(with_prepay.periods()[12].scheduled_principal > 0.0);

        let conventions = CashFlowConventions::default().with_prepay_during_io(false);
        let without = generate(&terms, &conventions).unwrap();
        for period in &without.periods()[..12] {
            assert_relative_eq!(period.total_principal(), 0.0);
            assert_relative_eq!(period.ending_balance, 100_000.0);
        }
    }

    #[test]
    fn test_balloon_pays_remaining_balance() {
        let terms = PoolTerms::builder()
            .settlement(settle())
            .coupon(5.5)
            .remaining_term(360)
            .balloon_term(84)
            .pay_delay(25)
            .prepayment(PrepaymentModel::Cpr(5.0))
            .original_balance(250_000.0)
            .build()
            .unwrap();

        let schedule = generate(&terms, &CashFlowConventions::default()).unwrap();
        let last = schedule.last().unwrap();

        assert_eq!(schedule.len(), 84);
        assert_relative_eq!(last.scheduled_principal, last.starting_balance);
        assert_relative_eq!(last.unscheduled_principal, 0.0);
        assert_relative_eq!(schedule.total_principal(), 250_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_origination_offset_pay_day() {
        let terms = PoolTerms::builder()
            .settlement(settle())
            .coupon(7.0)
            .remaining_term(360)
            .pay_delay(45)
            .original_balance(500_000.0)
            .build()
            .unwrap();
        let conventions =
            CashFlowConventions::default().with_pay_delay(PayDelayConvention::OriginationOffset);

        let schedule = generate(&terms, &conventions).unwrap();
        assert!(schedule.periods().iter().all(|p| p.pay_date.day() == 16));

        assert!(generate(&terms, &CashFlowConventions::default()).is_err());
    }

    #[test]
    fn test_month_end_anchor_does_not_drift() {
        let terms = PoolTerms::builder()
            .settlement(Date::from_ymd(2024, 1, 31).unwrap())
            .coupon(7.0)
            .remaining_term(12)
            .pay_delay(31)
            .original_balance(10_000.0)
            .build()
            .unwrap();

        let schedule = generate(&terms, &CashFlowConventions::default()).unwrap();
        let dates: Vec<String> = schedule
            .periods()
            .iter()
            .take(3)
            .map(|p| p.pay_date.to_string())
            .collect();

        assert_eq!(dates, ["2024-02-29", "2024-03-31", "2024-04-30"]);
    }

    #[test]
    fn test_payment_term_convention() {
        let base = terms(PrepaymentModel::Cpr(0.0));
        let standard = generate(&base, &CashFlowConventions::default()).unwrap();
        let shortened = generate(
            &base,
            &CashFlowConventions::default()
                .with_payment_term(PaymentTermConvention::RemainingTermLessOne),
        )
        .unwrap();

        assert!(
            shortened.first().unwrap().scheduled_principal
                > standard.first().unwrap().scheduled_principal
        );
    }

    #[test]
    fn test_zero_coupon_pool() {
        let schedule = generate_cpr(settle(), 0.0, 120, 0, 25, 0.0, 120, 12_000.0).unwrap();
        assert_eq!(schedule.len(), 120);
        assert_relative_eq!(schedule.first().unwrap().scheduled_principal, 100.0);
        assert_relative_eq!(schedule.total_interest(), 0.0);
    }

    #[test]
    fn test_flat_arguments_match_builder() {
        let flat = generate_cpr(settle(), 7.0, 360, 0, 15, 8.0, 360, 500_000.0).unwrap();
        let built = generate(
            &terms(PrepaymentModel::Cpr(8.0)),
            &CashFlowConventions::default(),
        )
        .unwrap();
        assert_eq!(flat, built);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(generate_cpr(settle(), 7.0, 360, 0, 15, 8.0, 360, 0.0).is_err());
        assert!(generate_cpr(settle(), -1.0, 360, 0, 15, 8.0, 360, 1.0).is_err());
        assert!(generate_cpr(settle(), 7.0, 120, 0, 15, 8.0, 360, 1.0).is_err());
        assert!(generate_cpr(settle(), 7.0, 360, 360, 15, 8.0, 360, 1.0).is_err());
        assert!(generate_cpr(settle(), 7.0, 360, 0, 0, 8.0, 360, 1.0).is_err());
    }
}
