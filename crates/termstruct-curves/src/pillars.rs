//! Pillar tenors that curves are reported on.

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// Default pillar tenors in years.
pub const DEFAULT_PILLARS: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];

/// Strictly increasing, positive tenors (in years) onto which yield and spot
/// curves are interpolated.
///
/// Forward rates are reported on every pillar after the first, anchored at
/// the first.
///
/// # Example
///
/// ```
/// use termstruct_curves::PillarSet;
///
/// let pillars = PillarSet::default();
/// assert_eq!(pillars.tenors(), &[1.0, 2.0, 3.0, 4.0, 5.0]);
/// assert_eq!(pillars.forward_tenors(), &[2.0, 3.0, 4.0, 5.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct PillarSet(Vec<f64>);

impl PillarSet {
    /// Creates a validated pillar set.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidPillars`] unless there are at least two
    /// finite, positive, strictly increasing tenors.
    pub fn new(tenors: Vec<f64>) -> CurveResult<Self> {
        if tenors.len() < 2 {
            return Err(CurveError::invalid_pillars(format!(
                "need at least 2 pillars, got {}",
                tenors.len()
            )));
        }
        if let Some(t) = tenors.iter().find(|t| !t.is_finite() || **t <= 0.0) {
            return Err(CurveError::invalid_pillars(format!(
                "pillar {t} is not a positive finite tenor"
            )));
        }
        if tenors.windows(2).any(|w| w[1] <= w[0]) {
            return Err(CurveError::invalid_pillars(
                "pillars must be strictly increasing",
            ));
        }
        Ok(Self(tenors))
    }

    /// All pillar tenors.
    pub fn tenors(&self) -> &[f64] {
        &self.0
    }

    /// The first pillar, which anchors forward rates.
    pub fn anchor(&self) -> f64 {
        self.0[0]
    }

    /// Pillars that carry a forward rate (all but the first).
    pub fn forward_tenors(&self) -> &[f64] {
        &self.0[1..]
    }

    /// Number of pillars.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a pillar set has at least two tenors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Short labels such as `"1Y"` or `"0.5Y"`.
    pub fn labels(&self) -> Vec<String> {
        self.0.iter().map(|t| tenor_label(*t)).collect()
    }

    /// Labels for the forward pillars.
    pub fn forward_labels(&self) -> Vec<String> {
        self.forward_tenors().iter().map(|t| tenor_label(*t)).collect()
    }
}

impl Default for PillarSet {
    fn default() -> Self {
        Self(DEFAULT_PILLARS.to_vec())
    }
}

impl TryFrom<Vec<f64>> for PillarSet {
    type Error = CurveError;

    fn try_from(tenors: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(tenors)
    }
}

impl From<PillarSet> for Vec<f64> {
    fn from(pillars: PillarSet) -> Self {
        pillars.0
    }
}

fn tenor_label(tenor: f64) -> String {
    format!("{tenor}Y")
}
