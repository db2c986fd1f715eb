// ─────────────────────────────────────────────────────────────────────
// SCPN Cyclic Tridiag — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PIVOT_FLOOR, DEFAULT_SINGULAR_TOLERANCE};
use crate::error::{CyclicError, CyclicResult};

/// Solver settings for the cyclic (Sherman-Morrison) tridiagonal solve.
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Explicit decomposition pivot. When absent, gamma is taken from
    /// the first nonzero main-diagonal entry (negated).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pivot: Option<f64>,
    /// Relative tolerance on |1 + vᵀq| (default: 1e-12)
    #[serde(default = "default_singular_tolerance")]
    pub singular_tolerance: f64,
    /// Absolute floor below which a Thomas pivot is singular (default: 0.0)
    #[serde(default = "default_pivot_floor")]
    pub pivot_floor: f64,
}

fn default_singular_tolerance() -> f64 {
    DEFAULT_SINGULAR_TOLERANCE
}
fn default_pivot_floor() -> f64 {
    DEFAULT_PIVOT_FLOOR
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            pivot: None,
            singular_tolerance: default_singular_tolerance(),
            pivot_floor: default_pivot_floor(),
        }
    }
}

impl SolverConfig {
    /// Load from a JSON file and validate.
    pub fn from_file(path: &str) -> CyclicResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Same config with an explicit pivot.
    pub fn with_pivot(mut self, gamma: f64) -> Self {
        self.pivot = Some(gamma);
        self
    }

    /// Full check: tolerances plus the explicit pivot, if any.
    pub fn validate(&self) -> CyclicResult<()> {
        self.validate_tolerances()?;
        if let Some(gamma) = self.pivot {
            if gamma == 0.0 || !gamma.is_finite() {
                return Err(CyclicError::ConfigError(format!(
                    "pivot must be finite and nonzero, got {gamma}"
                )));
            }
        }
        Ok(())
    }

    /// Check only the numeric tolerances. The solver reports a bad
    /// pivot itself, as `InvalidPivot`.
    pub fn validate_tolerances(&self) -> CyclicResult<()> {
        if !self.singular_tolerance.is_finite() || self.singular_tolerance < 0.0 {
            return Err(CyclicError::ConfigError(format!(
                "singular_tolerance must be finite and >= 0, got {}",
                self.singular_tolerance
            )));
        }
        if !self.pivot_floor.is_finite() || self.pivot_floor < 0.0 {
            return Err(CyclicError::ConfigError(format!(
                "pivot_floor must be finite and >= 0, got {}",
                self.pivot_floor
            )));
        }
        Ok(())
    }
}
