//! # Passthru Math
//!
//! Numerical building blocks for the Passthru analytics library.
//!
//! This crate provides:
//!
//! - **Interpolation**: Cubic splines with not-a-knot or natural end conditions,
//!   plus two-point linear interpolation
//! - **Solvers**: Root-finding (Newton-Raphson, secant, Newton with secant fallback)
//!   with bounded iteration
//!
//! Every routine is a pure function of its inputs; failures come back as
//! [`MathError`] values rather than NaN.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]

pub mod error;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{linear, CubicSpline, Interpolator, SplineBoundary};
    pub use crate::solvers::{
        newton_raphson, newton_raphson_numerical, newton_secant, secant, SolverConfig,
        SolverMethod, SolverResult,
    };
}

pub use error::{MathError, MathResult};
