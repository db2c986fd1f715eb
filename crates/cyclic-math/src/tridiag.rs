// ─────────────────────────────────────────────────────────────────────
// SCPN Cyclic Tridiag — Tridiag
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Thomas algorithm for strictly tridiagonal systems.
//!
//! Knows nothing about periodic structure; the cyclic solver calls it
//! twice per solve on the auxiliary matrix T.

use cyclic_types::constants::DEFAULT_PIVOT_FLOOR;
use cyclic_types::error::{CyclicError, CyclicResult};
use ndarray::Array2;

use crate::bands::TridiagonalBands;

#[inline]
fn check_pivot(row: usize, value: f64, floor: f64) -> CyclicResult<()> {
    if !value.is_finite() || value.abs() <= floor {
        return Err(CyclicError::SingularPivot { row, value });
    }
    Ok(())
}

/// Solve tridiagonal system Tx = d using the Thomas algorithm.
///
/// - `a`: sub-diagonal \[n\] (a\[0\] unused)
/// - `b`: main diagonal \[n\]
/// - `c`: super-diagonal \[n\] (c\[n-1\] unused)
/// - `d`: right-hand side \[n\]
///
/// Returns: solution vector x \[n\]. Inputs are never modified.
///
/// Fails with `SingularPivot` if b\[0\] or any eliminated pivot is zero,
/// and with `Structural` on empty or mismatched inputs.
pub fn thomas_solve(a: &[f64], b: &[f64], c: &[f64], d: &[f64]) -> CyclicResult<Vec<f64>> {
    thomas_solve_with_floor(a, b, c, d, DEFAULT_PIVOT_FLOOR)
}

/// [`thomas_solve`] treating any pivot with |pivot| <= `pivot_floor` as zero.
pub fn thomas_solve_with_floor(
    a: &[f64],
    b: &[f64],
    c: &[f64],
    d: &[f64],
    pivot_floor: f64,
) -> CyclicResult<Vec<f64>> {
    let n = d.len();
    if n == 0 {
        return Err(CyclicError::Structural("System size must be > 0".to_string()));
    }
    if a.len() != n || b.len() != n || c.len() != n {
        return Err(CyclicError::Structural(format!(
            "band lengths ({}, {}, {}) do not match rhs length {n}",
            a.len(),
            b.len(),
            c.len()
        )));
    }

    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    // Forward sweep
    check_pivot(0, b[0], pivot_floor)?;
    c_prime[0] = c[0] / b[0];
    d_prime[0] = d[0] / b[0];

    for i in 1..n {
        let den = b[i] - a[i] * c_prime[i - 1];
        check_pivot(i, den, pivot_floor)?;
        if i < n - 1 {
            c_prime[i] = c[i] / den;
        }
        d_prime[i] = (d[i] - a[i] * d_prime[i - 1]) / den;
    }

    // Back substitution
    let mut x = vec![0.0; n];
    x[n - 1] = d_prime[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d_prime[i] - c_prime[i] * x[i + 1];
    }

    Ok(x)
}

/// Solve T·z = d for a dense, strictly tridiagonal T.
///
/// The band is validated and extracted first; a nonzero entry outside it
/// is a structural error, not silently dropped.
pub fn solve_dense(t: &Array2<f64>, d: &[f64]) -> CyclicResult<Vec<f64>> {
    TridiagonalBands::from_dense(t)?.solve(d, DEFAULT_PIVOT_FLOOR)
}
