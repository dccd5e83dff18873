//! # Passthru Core
//!
//! Core types for the Passthru mortgage pass-through analytics library.
//!
//! This crate provides the foundational building blocks used throughout Passthru:
//!
//! - **Types**: [`Date`] for calendar arithmetic and [`Spread`] for basis-point spreads
//! - **Errors**: [`CoreError`] for date and spread validation failures
//!
//! ## Example
//!
//! ```rust
//! use passthru_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let settle = Date::from_ymd(2024, 3, 1).unwrap();
//! let first_pay = settle.add_months(1).unwrap().with_day_clamped(25).unwrap();
//! assert_eq!(first_pay.to_string(), "2024-04-25");
//!
//! let spread = Spread::new(dec!(125), SpreadType::ZSpread);
//! assert_eq!(spread.as_percentage(), dec!(1.25));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Date, Spread, SpreadType};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Date, Spread, SpreadType};
