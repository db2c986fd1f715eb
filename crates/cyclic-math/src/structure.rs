// ─────────────────────────────────────────────────────────────────────
// SCPN Cyclic Tridiag — Structure
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Sparsity-pattern checks for dense square matrices.
//!
//! A periodic tridiagonal matrix may hold nonzeros only on the three
//! central diagonals and in the two wrap-around corners (0, n-1) and
//! (n-1, 0). A strictly tridiagonal matrix has no corners.

use cyclic_types::constants::MIN_SYSTEM_SIZE;
use cyclic_types::error::{CyclicError, CyclicResult};
use ndarray::Array2;

#[inline]
fn is_corner(i: usize, j: usize, n: usize) -> bool {
    (i == 0 && j == n - 1) || (i == n - 1 && j == 0)
}

/// First nonzero entry outside the allowed pattern, scanning row-major.
/// Assumes a square, non-empty matrix.
fn first_violation(m: &Array2<f64>, allow_corners: bool) -> Option<(usize, usize)> {
    let n = m.nrows();
    for ((i, j), &value) in m.indexed_iter() {
        if i.abs_diff(j) <= 1 || (allow_corners && is_corner(i, j, n)) {
            continue;
        }
        // NaN compares unequal to zero and is reported as a violation.
        if value != 0.0 {
            return Some((i, j));
        }
    }
    None
}

/// True iff `m` is square, at least 3x3, and has no nonzero entry outside
/// the tridiagonal band and the two periodic corners.
pub fn is_periodic_tridiagonal(m: &Array2<f64>) -> bool {
    let (rows, cols) = m.dim();
    rows == cols && rows >= MIN_SYSTEM_SIZE && first_violation(m, true).is_none()
}

/// True iff `m` is square, non-empty, and has no nonzero entry outside the
/// tridiagonal band (corners included).
pub fn is_strictly_tridiagonal(m: &Array2<f64>) -> bool {
    let (rows, cols) = m.dim();
    rows == cols && rows > 0 && first_violation(m, false).is_none()
}

/// Like [`is_periodic_tridiagonal`], but reports why the matrix is rejected.
pub fn check_periodic_tridiagonal(m: &Array2<f64>) -> CyclicResult<()> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(CyclicError::Structural(format!(
            "matrix must be square, got {rows}x{cols}"
        )));
    }
    if rows < MIN_SYSTEM_SIZE {
        return Err(CyclicError::Structural(format!(
            "periodic system needs n >= {MIN_SYSTEM_SIZE}, got n = {rows}"
        )));
    }
    match first_violation(m, true) {
        None => Ok(()),
        Some((i, j)) => Err(CyclicError::Structural(format!(
            "nonzero entry {} at ({i}, {j}) lies outside the tridiagonal band and periodic corners",
            m[[i, j]]
        ))),
    }
}

/// Like [`is_strictly_tridiagonal`], but reports why the matrix is rejected.
pub fn check_strictly_tridiagonal(m: &Array2<f64>) -> CyclicResult<()> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(CyclicError::Structural(format!(
            "matrix must be square, got {rows}x{cols}"
        )));
    }
    if rows == 0 {
        return Err(CyclicError::Structural("empty matrix".to_string()));
    }
    match first_violation(m, false) {
        None => Ok(()),
        Some((i, j)) => Err(CyclicError::Structural(format!(
            "nonzero entry {} at ({i}, {j}) lies outside the tridiagonal band",
            m[[i, j]]
        ))),
    }
}
