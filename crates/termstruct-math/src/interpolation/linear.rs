//! Linear interpolation.

use std::cmp::Ordering;

use crate::error::{MathError, MathResult};
use crate::interpolation::Interpolator;

/// Behaviour outside the range of the data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Extrapolation {
    /// Queries outside `[min_x, max_x]` are an error.
    #[default]
    Disallowed,
    /// Queries outside the range return the nearest boundary value.
    Flat,
}

/// Linear interpolation between data points.
///
/// # Example
///
/// ```rust
/// use termstruct_math::interpolation::{Interpolator, LinearInterpolator};
///
/// let xs = vec![1.0, 2.0, 3.0];
/// let ys = vec![-0.02, -0.05, -0.09];
///
/// let interp = LinearInterpolator::new(xs, ys).unwrap().with_flat_extrapolation();
/// assert!((interp.interpolate(1.5).unwrap() + 0.035).abs() < 1e-12);
/// assert_eq!(interp.interpolate(10.0).unwrap(), -0.09);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator {
    xs: Vec<f64>,
    ys: Vec<f64>,
    extrapolation: Extrapolation,
}

impl LinearInterpolator {
    /// Creates a new linear interpolator.
    ///
    /// # Arguments
    ///
    /// * `xs` - X coordinates (strictly increasing)
    /// * `ys` - Y coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, the lengths differ,
    /// or the x values are not strictly increasing and finite.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        if xs.len() < 2 {
            return Err(MathError::insufficient_data(2, xs.len()));
        }
        if xs.len() != ys.len() {
            return Err(MathError::invalid_input(format!(
                "xs and ys must have same length: {} vs {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
            return Err(MathError::invalid_input("data points must be finite"));
        }
        if xs.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MathError::invalid_input(
                "x values must be strictly increasing",
            ));
        }

        Ok(Self {
            xs,
            ys,
            extrapolation: Extrapolation::Disallowed,
        })
    }

    /// Holds the boundary values constant outside the data range.
    #[must_use]
    pub fn with_flat_extrapolation(mut self) -> Self {
        self.extrapolation = Extrapolation::Flat;
        self
    }

    /// Returns the extrapolation mode.
    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }

    /// Finds the index i such that xs[i] <= x < xs[i+1].
    fn find_segment(&self, x: f64) -> usize {
        let last_segment = self.xs.len() - 2;
        match self
            .xs
            .binary_search_by(|probe| probe.partial_cmp(&x).unwrap_or(Ordering::Equal))
        {
            Ok(i) => i.min(last_segment),
            Err(i) => i.saturating_sub(1).min(last_segment),
        }
    }
}

impl Interpolator for LinearInterpolator {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        let n = self.xs.len();
        if x.is_nan() {
            return Err(MathError::invalid_input("cannot interpolate at NaN"));
        }

        if x < self.xs[0] || x > self.xs[n - 1] {
            return match self.extrapolation {
                Extrapolation::Disallowed => Err(MathError::ExtrapolationNotAllowed {
                    x,
                    min: self.xs[0],
                    max: self.xs[n - 1],
                }),
                Extrapolation::Flat if x < self.xs[0] => Ok(self.ys[0]),
                Extrapolation::Flat => Ok(self.ys[n - 1]),
            };
        }

        let i = self.find_segment(x);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);

        let t = (x - x0) / (x1 - x0);
        Ok(y0 + t * (y1 - y0))
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}
