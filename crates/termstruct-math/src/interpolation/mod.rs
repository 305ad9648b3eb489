//! Interpolation methods for mapping rates onto pillar tenors.
//!
//! # Available Methods
//!
//! - [`LinearInterpolator`]: Piecewise-linear interpolation with optional
//!   flat extrapolation
//! - [`interpolate_log_discount`]: Linear interpolation of log discount
//!   factors, converted back to continuously-compounded rates
//!
//! Interpolating `ln P(t) = -r(t) t` linearly gives piecewise-constant
//! instantaneous forwards between base tenors, which is why curves are
//! mapped onto pillars through log discount factors rather than rates.

mod linear;
mod log_discount;

pub use linear::{Extrapolation, LinearInterpolator};
pub use log_discount::interpolate_log_discount;

use crate::error::MathResult;

/// Trait for one-dimensional interpolation methods.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}
