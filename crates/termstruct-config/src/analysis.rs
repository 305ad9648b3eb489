//! Analysis configuration.
//!
//! Everything a term-structure run needs beyond the price file itself:
//! pillars, solver settings, basket and date error policies, and which
//! columns of the price file to use.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use termstruct_bonds::BondIdentifier;
use termstruct_curves::pillars::DEFAULT_PILLARS;
use termstruct_curves::{BasketOrdering, BootstrapConfig, DateErrorPolicy, PillarSet};
use termstruct_math::solvers::{SolverConfig, SolverKind, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Largest accepted solver tolerance.
pub const MAX_TOLERANCE: f64 = 1e-4;

/// Largest accepted iteration budget.
pub const MAX_ITERATIONS: u32 = 10_000;

// =============================================================================
// SOLVER SETTINGS
// =============================================================================

/// Root-finding settings for yields and spot rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolverSettings {
    /// Algorithm.
    #[serde(default)]
    pub kind: SolverKind,

    /// Convergence tolerance.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Iteration budget per root-find.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            kind: SolverKind::default(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
        }
    }
}

impl SolverSettings {
    /// The tolerance and budget as a [`SolverConfig`].
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig::new(self.tolerance, self.max_iterations)
    }
}

impl Validate for SolverSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(self.tolerance > 0.0 && self.tolerance <= MAX_TOLERANCE) {
            errors.push(ValidationError::with_rule(
                "tolerance",
                format!("Tolerance must be in (0, {MAX_TOLERANCE:e}]"),
                "valid_tolerance",
            ));
        }

        if self.max_iterations == 0 || self.max_iterations > MAX_ITERATIONS {
            errors.push(ValidationError::with_rule(
                "max_iterations",
                format!("Max iterations must be between 1 and {MAX_ITERATIONS}"),
                "valid_iterations",
            ));
        }

        errors
    }
}

// =============================================================================
// ANALYSIS CONFIGURATION
// =============================================================================

/// Configuration for curve construction and risk analysis.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Pillar tenors in years.
    #[serde(default = "default_pillars")]
    pub pillars: Vec<f64>,

    /// How unsorted baskets are handled.
    #[serde(default)]
    pub basket_ordering: BasketOrdering,

    /// What happens when one date's curve cannot be built.
    #[serde(default)]
    pub on_date_error: DateErrorPolicy,

    /// Name of the date column in price files.
    #[serde(default = "default_date_column")]
    pub date_column: String,

    /// Price columns to use, in order. Empty means every column.
    #[serde(default)]
    pub instruments: Vec<String>,

    /// Root-finding settings.
    #[serde(default)]
    pub solver: SolverSettings,
}

fn default_pillars() -> Vec<f64> {
    DEFAULT_PILLARS.to_vec()
}

fn default_date_column() -> String {
    "Dates".to_string()
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pillars: default_pillars(),
            basket_ordering: BasketOrdering::default(),
            on_date_error: DateErrorPolicy::default(),
            date_column: default_date_column(),
            instruments: Vec::new(),
            solver: SolverSettings::default(),
        }
    }
}

impl AnalysisConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pillar tenors.
    #[must_use]
    pub fn with_pillars(mut self, pillars: Vec<f64>) -> Self {
        self.pillars = pillars;
        self
    }

    /// Sets the solver algorithm.
    #[must_use]
    pub fn with_solver(mut self, kind: SolverKind) -> Self {
        self.solver.kind = kind;
        self
    }

    /// Sets the instrument columns.
    #[must_use]
    pub fn with_instruments<I, S>(mut self, instruments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instruments = instruments.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the date error policy.
    #[must_use]
    pub fn with_date_error_policy(mut self, policy: DateErrorPolicy) -> Self {
        self.on_date_error = policy;
        self
    }

    /// The validated pillar set.
    pub fn pillar_set(&self) -> ConfigResult<PillarSet> {
        PillarSet::new(self.pillars.clone()).map_err(|e| ConfigError::Validation {
            field: "pillars".to_string(),
            message: e.to_string(),
        })
    }

    /// Parsed instrument identifiers, in configured order.
    pub fn instrument_identifiers(&self) -> ConfigResult<Vec<BondIdentifier>> {
        self.instruments
            .iter()
            .enumerate()
            .map(|(i, s)| {
                BondIdentifier::parse(s).map_err(|e| ConfigError::Validation {
                    field: format!("instruments[{i}]"),
                    message: e.to_string(),
                })
            })
            .collect()
    }

    /// Validates the configuration and converts it for the curve builder.
    pub fn to_bootstrap_config(&self) -> ConfigResult<BootstrapConfig> {
        self.validate_or_error()?;
        Ok(BootstrapConfig::new()
            .with_pillars(self.pillar_set()?)
            .with_solver(self.solver.kind)
            .with_solver_config(self.solver.solver_config())
            .with_ordering(self.basket_ordering))
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if let Err(e) = PillarSet::new(self.pillars.clone()) {
            errors.push(ValidationError::with_rule(
                "pillars",
                e.to_string(),
                "valid_pillars",
            ));
        }

        for error in self.solver.validate() {
            errors.push(ValidationError {
                field: format!("solver.{}", error.field),
                ..error
            });
        }

        if self.date_column.trim().is_empty() {
            errors.push(ValidationError::new(
                "date_column",
                "Date column name cannot be empty",
            ));
        }

        let mut seen = HashSet::new();
        for (i, instrument) in self.instruments.iter().enumerate() {
            match BondIdentifier::parse(instrument) {
                Ok(id) => {
                    if !seen.insert(id) {
                        errors.push(ValidationError::with_rule(
                            format!("instruments[{i}]"),
                            format!("Duplicate instrument '{instrument}'"),
                            "unique_instruments",
                        ));
                    }
                }
                Err(e) => errors.push(ValidationError::new(
                    format!("instruments[{i}]"),
                    e.to_string(),
                )),
            }
        }

        errors
    }
}
