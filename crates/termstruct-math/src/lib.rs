//! # Termstruct Math
//!
//! Numerical building blocks for term-structure construction.
//!
//! This crate provides:
//!
//! - **Solvers**: Root-finding behind the [`Solver`](solvers::Solver) trait
//!   (Newton-Raphson, Brent, and a hybrid of the two)
//! - **Interpolation**: Piecewise-linear interpolation and the
//!   log-discount-factor rule used to map rates onto pillar tenors
//! - **Linear Algebra**: Sample covariance and ordered symmetric
//!   eigen-decomposition for principal component analysis

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
#![allow(clippy::needless_pass_by_value)]

pub mod error;
pub mod interpolation;
pub mod linear_algebra;
pub mod solvers;

pub use error::{MathError, MathResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{interpolate_log_discount, Interpolator, LinearInterpolator};
    pub use crate::linear_algebra::{sample_covariance, sorted_symmetric_eigen};
    pub use crate::solvers::{
        BrentSolver, HybridSolver, NewtonSolver, Solver, SolverConfig, SolverKind, SolverResult,
    };
}
