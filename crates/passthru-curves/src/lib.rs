//! # Passthru Curves
//!
//! Benchmark curve construction for the Passthru analytics library.
//!
//! This crate provides:
//!
//! - **Par curves**: [`ParCurve`] validated against the anchor tenor set
//! - **Interpolation**: cubic-spline densification onto a [`TenorGrid`]
//! - **Bootstrap**: closed-form spot rates from a semi-annual par curve,
//!   with an optional repricing report
//! - **Curve trait**: [`RateCurve`], the read interface pricing uses
//!
//! ## Quick Start
//!
//! ```rust
//! use passthru_core::types::Date;
//! use passthru_curves::prelude::*;
//!
//! let quotes = [
//!     (1, 5.54), (2, 5.50), (3, 5.47), (5, 5.42), (6, 5.37), (12, 5.03),
//!     (24, 4.48), (36, 4.30), (60, 4.09), (84, 4.08), (120, 4.09),
//!     (240, 4.35), (360, 4.26),
//! ];
//! let par = ParCurve::from_quotes(Date::from_ymd(2024, 3, 8).unwrap(), &quotes).unwrap();
//!
//! // Par curve on the semi-annual grid (I-spread benchmark)
//! let semi = par.interpolate(&TenorGrid::semi_annual()).unwrap();
//!
//! // Spot curve, re-gridded monthly (Z-spread benchmark)
//! let spot = bootstrap(&semi).unwrap().regrid(&TenorGrid::monthly()).unwrap();
//! assert_eq!(spot.points().len(), 360);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]

pub mod bootstrap;
pub mod curves;
pub mod error;
pub mod interpolate;
pub mod par;
pub mod repricing;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{bootstrap, bootstrap_with_report};
    pub use crate::curves::{InterpolatedCurve, SpotCurve};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::interpolate::{interpolate, interpolate_with};
    pub use crate::par::{ParCurve, ANCHOR_TENORS, PUBLISHED_TENORS};
    pub use crate::repricing::{BootstrapResult, RepricingCheck, RepricingReport};
    pub use crate::traits::RateCurve;
    pub use crate::types::{CurvePoint, TenorGrid};
    pub use passthru_math::interpolation::SplineBoundary;
}

pub use bootstrap::{bootstrap, bootstrap_with_report};
pub use curves::{InterpolatedCurve, SpotCurve};
pub use error::{CurveError, CurveResult};
pub use interpolate::{interpolate, interpolate_with};
pub use par::ParCurve;
pub use traits::RateCurve;
pub use types::{CurvePoint, TenorGrid};
