//! Bootstrap configuration.

use serde::{Deserialize, Serialize};

use termstruct_math::solvers::{SolverConfig, SolverKind};

use crate::pillars::PillarSet;

/// How the bootstrapper treats a basket that is not in maturity order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasketOrdering {
    /// Stable-sort the basket by maturity before bootstrapping.
    #[default]
    Sort,
    /// Reject a basket whose maturities are not strictly ascending.
    Strict,
}

/// What a multi-date build does when one date fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateErrorPolicy {
    /// Stop at the first failing date.
    #[default]
    Fail,
    /// Log a warning and leave the date out.
    Skip,
}

/// Settings shared by every curve built for a history.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BootstrapConfig {
    /// Tenors the curves are reported on.
    pub pillars: PillarSet,
    /// Root-finding algorithm for yields and spot rates.
    pub solver: SolverKind,
    /// Tolerance and iteration budget for every root-find.
    pub solver_config: SolverConfig,
    /// Basket ordering policy.
    pub ordering: BasketOrdering,
}

impl BootstrapConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pillar tenors.
    #[must_use]
    pub fn with_pillars(mut self, pillars: PillarSet) -> Self {
        self.pillars = pillars;
        self
    }

    /// Sets the solver.
    #[must_use]
    pub fn with_solver(mut self, solver: SolverKind) -> Self {
        self.solver = solver;
        self
    }

    /// Sets the solver tolerance and iteration budget.
    #[must_use]
    pub fn with_solver_config(mut self, solver_config: SolverConfig) -> Self {
        self.solver_config = solver_config;
        self
    }

    /// Sets the basket ordering policy.
    #[must_use]
    pub fn with_ordering(mut self, ordering: BasketOrdering) -> Self {
        self.ordering = ordering;
        self
    }
}
