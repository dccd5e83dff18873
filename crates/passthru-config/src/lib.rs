//! # Passthru Config
//!
//! Configuration for the Passthru mortgage pass-through library.
//!
//! A [`PassthruConfig`] gathers the conventions that the engines take as
//! plain values:
//!
//! - [`CashFlowConfig`]: pay-delay anchor, payment term, interest-only prepay
//! - [`PricingConfig`]: default spread type, stub discount
//! - [`SolverSettings`]: Newton/secant search parameters
//!
//! Configurations load from TOML or JSON and are validated on load.
//!
//! ## Example
//!
//! ```rust
//! use passthru_config::PassthruConfig;
//!
//! let config = PassthruConfig::from_toml_str(
//!     r#"
//!     [cash_flow]
//!     pay_delay = "origination_offset"
//!
//!     [solver]
//!     tolerance = 1e-8
//!     "#,
//! )
//! .unwrap();
//!
//! let conventions = config.cash_flow.conventions();
//! let solver = config.spread_solver();
//! # let _ = (conventions, solver);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]

pub mod cash_flow;
pub mod config;
pub mod error;
pub mod pricing;
pub mod solver;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cash_flow::CashFlowConfig;
    pub use crate::config::{ConfigFormat, PassthruConfig};
    pub use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
    pub use crate::pricing::PricingConfig;
    pub use crate::solver::SolverSettings;
}

pub use cash_flow::CashFlowConfig;
pub use config::{ConfigFormat, PassthruConfig};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use pricing::PricingConfig;
pub use solver::SolverSettings;
