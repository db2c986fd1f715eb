// ─────────────────────────────────────────────────────────────────────
// SCPN Cyclic Tridiag — Error
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CyclicError {
    /// Input shape or sparsity pattern is unusable; the caller must fix the input.
    #[error("Structural error: {0}")]
    Structural(String),

    /// The decomposition pivot is unusable; another gamma may succeed.
    #[error("Invalid pivot gamma={gamma}: {reason}")]
    InvalidPivot { gamma: f64, reason: String },

    #[error("Singular pivot in forward elimination at row {row} (pivot = {value})")]
    SingularPivot { row: usize, value: f64 },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CyclicError {
    /// True when the input matrix or vector itself is malformed.
    pub fn is_structural(&self) -> bool {
        matches!(self, CyclicError::Structural(_))
    }

    /// True when the failure stems from the numerical pivot, i.e. a retry
    /// with a different gamma is meaningful.
    pub fn is_pivot_failure(&self) -> bool {
        matches!(
            self,
            CyclicError::InvalidPivot { .. } | CyclicError::SingularPivot { .. }
        )
    }
}

pub type CyclicResult<T> = Result<T, CyclicError>;
