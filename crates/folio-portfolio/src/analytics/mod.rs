//! Portfolio-level analytics.
//!
//! This module provides:
//! - Returns statistics and annualized metrics
//! - Holdings performance and top movers
//! - Maximum drawdown of a growth path
//!
//! All functions are pure - they take data as input and return computed
//! results. No caching, no I/O, no side effects.

mod drawdown;
mod performance;
mod stats;

pub use drawdown::*;
pub use performance::*;
pub use stats::*;
