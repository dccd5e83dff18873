//! # Passthru Analytics
//!
//! Spread pricing and spread solving for mortgage pass-through cash flows.
//!
//! This crate provides:
//!
//! - **Pricing**: price per 100 at an I-spread or Z-spread ([`PricingEngine`])
//! - **Spread solving**: the spread implied by an observed price
//!   ([`SpreadSolver`])
//! - **Risk**: spread DV01 and spread duration
//! - **Batch**: order-preserving batch pricing, parallel with the
//!   `parallel` feature
//!
//! ## Quick Start
//!
//! ```rust
//! use passthru_core::types::{Date, Spread, SpreadType};
//! use passthru_curves::prelude::*;
//! use passthru_mbs::generate_cpr;
//! use passthru_analytics::prelude::*;
//!
//! let settle = Date::from_ymd(2024, 3, 8).unwrap();
//! let quotes = [
//!     (1, 5.54), (2, 5.50), (3, 5.47), (5, 5.42), (6, 5.37), (12, 5.03),
//!     (24, 4.48), (36, 4.30), (60, 4.09), (84, 4.08), (120, 4.09),
//!     (240, 4.35), (360, 4.26),
//! ];
//! let par = ParCurve::from_quotes(settle, &quotes).unwrap();
//! let spot = bootstrap(&par.interpolate(&TenorGrid::semi_annual()).unwrap())
//!     .unwrap()
//!     .regrid(&TenorGrid::monthly())
//!     .unwrap();
//!
//! let schedule = generate_cpr(settle, 7.0, 360, 0, 25, 8.0, 360, 500_000.0).unwrap();
//! let spread = Spread::from_bps_i32(120, SpreadType::ZSpread);
//! let px = price(&schedule, &spot, settle, &spread).unwrap();
//!
//! let z = solve_spread(&schedule, &spot, settle, px, SpreadType::ZSpread).unwrap();
//! assert!((z.as_bps_f64() - 120.0).abs() < 1e-4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]

pub mod batch;
pub mod error;
pub mod pricing;
pub mod risk;
pub mod solver;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::batch::{price_batch, solve_spread_batch, PricingRequest, SpreadRequest};
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::pricing::{
        bey_to_mey, price, PriceResult, PricingConventions, PricingEngine, StubDiscount,
    };
    pub use crate::risk::{spread_duration, spread_dv01, SpreadRisk};
    pub use crate::solver::{solve_spread, SpreadSolution, SpreadSolver, SpreadSolverConfig};
}

pub use batch::{price_batch, solve_spread_batch, PricingRequest, SpreadRequest};
pub use error::{AnalyticsError, AnalyticsResult};
pub use pricing::{price, PriceResult, PricingConventions, PricingEngine, StubDiscount};
pub use risk::{spread_duration, spread_dv01, SpreadRisk};
pub use solver::{solve_spread, SpreadSolution, SpreadSolver, SpreadSolverConfig};
