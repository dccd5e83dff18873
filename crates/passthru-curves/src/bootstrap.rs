//! Spot rate bootstrap from a semi-annual par curve.
//!
//! Each semi-annual par yield is read as the coupon of a bond paying
//! `c/2` every six months on 100 face and priced at par. Walking the grid
//! in ascending order, the coupons before maturity are discounted on the
//! spot rates already solved:
//!
//! ```text
//! int_cf = Σ_{j=1}^{k-1} (c/2) / (1 + s_j/200)^j
//! zf     = (100 + c/2) / (100 - int_cf)
//! s_k    = (zf^(1/k) - 1) · 200
//! ```
//!
//! The 0, 6 and 12 month points pay nothing before maturity and are copied
//! from the par curve.

use crate::curves::{InterpolatedCurve, SpotCurve};
use crate::error::{CurveError, CurveResult};
use crate::repricing::{BootstrapResult, RepricingCheck, RepricingReport, REPRICING_TOLERANCE};
use crate::traits::RateCurve;
use crate::types::CurvePoint;

/// Face value of the notional par bonds.
const FACE: f64 = 100.0;

/// Grid points copied straight from the par curve.
const COPIED_POINTS: usize = 3;

/// Solves zero-coupon yields from a semi-annual par curve.
///
/// # Errors
///
/// * `CurveError::InvalidGrid` unless the grid is 6-monthly from 0.
/// * `CurveError::CurveInversion` if the intermediate coupons are worth at
///   least face at some tenor.
///
/// # Example
///
/// ```rust
/// use passthru_core::types::Date;
/// use passthru_curves::{bootstrap, InterpolatedCurve, RateCurve, TenorGrid};
///
/// let grid = TenorGrid::new(0, 60, 6).unwrap();
/// let flat = InterpolatedCurve::new(Date::from_ymd(2024, 3, 8).unwrap(), grid, &[4.0; 11]).unwrap();
///
/// // A flat par curve bootstraps to the same flat spot curve.
/// let spot = bootstrap(&flat).unwrap();
/// assert!((spot.rate_at(60).unwrap() - 4.0).abs() < 1e-10);
/// ```
pub fn bootstrap(par: &InterpolatedCurve) -> CurveResult<SpotCurve> {
    let grid = par.grid();
    if !grid.is_semi_annual_from_zero() {
        return Err(CurveError::invalid_grid(format!(
            "bootstrap needs a 6-month grid from 0, got {}M..{}M step {}",
            grid.start(),
            grid.end(),
            grid.step()
        )));
    }

    let par_points = par.points();
    let mut spots: Vec<f64> = Vec::with_capacity(par_points.len());

    for (k, point) in par_points.iter().enumerate() {
        if k < COPIED_POINTS {
            spots.push(point.rate);
            continue;
        }

        let coupon = point.rate / 2.0;
        let int_cf: f64 = spots[1..k]
            .iter()
            .zip(1..)
            .map(|(s, j)| coupon / (1.0 + s / 200.0).powi(j))
            .sum();

        let discount_base = FACE - int_cf;
        if discount_base <= 0.0 || !discount_base.is_finite() {
            return Err(CurveError::CurveInversion {
                tenor: point.tenor,
                discount_base,
            });
        }

        let zero_factor = (FACE + coupon) / discount_base;
        let spot = (zero_factor.powf(1.0 / k as f64) - 1.0) * 200.0;
        if !spot.is_finite() {
            return Err(CurveError::CurveInversion {
                tenor: point.tenor,
                discount_base,
            });
        }

        log::trace!("bootstrap {}M: par {:.6} -> spot {:.6}", point.tenor, point.rate, spot);
        spots.push(spot);
    }

    let points: Vec<CurvePoint> = par_points
        .iter()
        .zip(spots)
        .map(|(p, s)| CurvePoint::new(p.tenor, s))
        .collect();

    log::debug!(
        "bootstrapped spot curve {} with {} tenors ({} solved)",
        par.observation_date(),
        points.len(),
        points.len().saturating_sub(COPIED_POINTS)
    );

    Ok(SpotCurve::from_parts(par.observation_date(), grid, points))
}

/// Bootstraps and reprices every solved par bond on the result.
///
/// The report covers each tenor from 18 months out; the copied points
/// have no intermediate coupon to check.
pub fn bootstrap_with_report(par: &InterpolatedCurve) -> CurveResult<BootstrapResult> {
    let curve = bootstrap(par)?;

    let spots: Vec<f64> = curve.points().iter().map(|p| p.rate).collect();
    let checks: Vec<RepricingCheck> = par
        .points()
        .iter()
        .enumerate()
        .skip(COPIED_POINTS)
        .map(|(k, p)| {
            RepricingCheck::new(
                p.tenor,
                p.rate,
                par_bond_price(p.rate, &spots[1..=k]),
                REPRICING_TOLERANCE,
            )
        })
        .collect();

    let report = RepricingReport::new(checks);
    if report.is_valid() {
        log::debug!("bootstrap repricing max error {:.2e}", report.max_error());
    } else {
        log::warn!(
            "bootstrap of {} left {} par bonds outside tolerance",
            par.observation_date(),
            report.failed_checks().len()
        );
    }

    Ok(BootstrapResult { curve, report })
}

/// Prices a semi-annual par bond whose `i`-th cash flow is discounted on
/// `spots[i]`, the last entry being maturity.
fn par_bond_price(par_rate: f64, spots: &[f64]) -> f64 {
    let coupon = par_rate / 2.0;
    let n = spots.len();
    spots
        .iter()
        .zip(1..)
        .map(|(s, j)| {
            let cash = if j as usize == n { FACE + coupon } else { coupon };
            cash / (1.0 + s / 200.0).powi(j)
        })
        .sum()
}
