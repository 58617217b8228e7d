//! # Folio Math
//!
//! Numerical building blocks for the Folio portfolio analytics library.
//!
//! This crate provides:
//!
//! - **Statistics**: Column means, sample covariance and quadratic forms
//!   over period-by-asset return rows
//! - **Optimization**: Minimization of an arbitrary scalar objective under
//!   box bounds and a sum-equality constraint, behind the
//!   [`ConstrainedMinimizer`](optimization::ConstrainedMinimizer) trait
//!
//! ## Design Philosophy
//!
//! - **Swappable backends**: objectives never depend on the solver
//! - **Best effort**: solvers always return their best feasible point and
//!   report convergence separately

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::needless_range_loop)]

pub mod error;
pub mod optimization;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::optimization::{
        ConstrainedMinimizer, ConstrainedProblem, OptimizationConfig, OptimizationResult,
        ProjectedGradient, SimplexNelderMead,
    };
    pub use crate::statistics::{covariance_matrix, dot, mean_vector, quadratic_form};
}

pub use error::{MathError, MathResult};
