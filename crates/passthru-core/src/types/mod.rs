//! Domain types for pass-through analytics.
//!
//! - [`Date`]: Calendar date with month arithmetic for pay schedules
//! - [`Spread`]: Spread in basis points, tagged with how it is applied

mod date;
mod spread;

pub use date::Date;
pub use spread::{Spread, SpreadType};
