//! # Passthru MBS
//!
//! Mortgage pool cash flows for the Passthru analytics library.
//!
//! This crate provides:
//!
//! - **Pool terms**: [`PoolTerms`] with a validating builder
//! - **Prepayment**: constant CPR and the PSA ramp ([`PrepaymentModel`])
//! - **Amortization**: level-pay schedules with interest-only months,
//!   balloons and early payoff ([`generate`])
//! - **WAL**: principal-weighted average life ([`weighted_average_life`])
//!
//! ## Quick Start
//!
//! ```rust
//! use passthru_core::Date;
//! use passthru_mbs::prelude::*;
//!
//! let terms = PoolTerms::builder()
//!     .settlement(Date::from_ymd(2024, 3, 1).unwrap())
//!     .coupon(7.0)
//!     .remaining_term(360)
//!     .pay_delay(15)
//!     .prepayment(PrepaymentModel::Psa(150.0))
//!     .original_balance(500_000.0)
//!     .build()
//!     .unwrap();
//!
//! let schedule = generate(&terms, &CashFlowConventions::default()).unwrap();
//! let wal = schedule.wal().unwrap();
//! assert!(wal > 5.0 && wal < 15.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::float_cmp)]

pub mod conventions;
pub mod engine;
pub mod error;
pub mod pool;
pub mod prepayment;
pub mod schedule;
pub mod wal;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::conventions::{CashFlowConventions, PayDelayConvention, PaymentTermConvention};
    pub use crate::engine::{generate, generate_cpr};
    pub use crate::error::{MbsError, MbsResult};
    pub use crate::pool::{PoolTerms, PoolTermsBuilder};
    pub use crate::prepayment::{cpr_to_smm, PrepaymentModel};
    pub use crate::schedule::{AmortizationSchedule, Period, ScheduleState};
    pub use crate::wal::weighted_average_life;
}

pub use conventions::{CashFlowConventions, PayDelayConvention, PaymentTermConvention};
pub use engine::{generate, generate_cpr};
pub use error::{MbsError, MbsResult};
pub use pool::{PoolTerms, PoolTermsBuilder};
pub use prepayment::PrepaymentModel;
pub use schedule::{AmortizationSchedule, Period, ScheduleState};
pub use wal::weighted_average_life;
