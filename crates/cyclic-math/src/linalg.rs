// ─────────────────────────────────────────────────────────────────────
// SCPN Cyclic Tridiag — Linalg
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Vector utilities.
//!
//! Dot product, rank-1 outer product, elementwise products and the
//! scaled update used by the Sherman-Morrison combination step.

use cyclic_types::error::{CyclicError, CyclicResult};
use ndarray::Array2;

fn check_same_len(op: &str, a: &[f64], b: &[f64]) -> CyclicResult<()> {
    if a.len() != b.len() {
        return Err(CyclicError::Structural(format!(
            "{op}: length mismatch ({} vs {})",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

/// Inner product aᵀb.
pub fn dot(a: &[f64], b: &[f64]) -> CyclicResult<f64> {
    check_same_len("dot", a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Rank-1 matrix a·bᵀ with shape [a.len(), b.len()].
pub fn outer_product(a: &[f64], b: &[f64]) -> Array2<f64> {
    Array2::from_shape_fn((a.len(), b.len()), |(i, j)| a[i] * b[j])
}

/// Elementwise product.
pub fn hadamard(a: &[f64], b: &[f64]) -> CyclicResult<Vec<f64>> {
    check_same_len("hadamard", a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).collect())
}

pub fn scale(a: &[f64], s: f64) -> Vec<f64> {
    a.iter().map(|x| x * s).collect()
}

/// y + alpha·x, returned as a new vector.
pub fn axpy(alpha: f64, x: &[f64], y: &[f64]) -> CyclicResult<Vec<f64>> {
    check_same_len("axpy", x, y)?;
    Ok(x.iter().zip(y).map(|(xi, yi)| yi + alpha * xi).collect())
}

/// max_i |a_i - b_i|; zero for empty inputs.
pub fn max_abs_diff(a: &[f64], b: &[f64]) -> CyclicResult<f64> {
    check_same_len("max_abs_diff", a, b)?;
    Ok(a
        .iter()
        .zip(b)
        .fold(0.0_f64, |acc, (x, y)| acc.max((x - y).abs())))
}
