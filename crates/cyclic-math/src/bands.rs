// ─────────────────────────────────────────────────────────────────────
// SCPN Cyclic Tridiag — Bands
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Compact band storage for tridiagonal and periodic tridiagonal matrices.
//!
//! Layout follows [`crate::tridiag::thomas_solve`]: all three diagonals
//! have length n; `sub[0]` and `sup[n-1]` are ignored.

use cyclic_types::constants::MIN_SYSTEM_SIZE;
use cyclic_types::error::{CyclicError, CyclicResult};
use ndarray::Array2;

use crate::structure::{check_periodic_tridiagonal, check_strictly_tridiagonal};
use crate::tridiag::thomas_solve_with_floor;

/// The three diagonals of a strictly tridiagonal matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalBands {
    /// sub\[i\] = T\[i\]\[i-1\]
    pub sub: Vec<f64>,
    /// diag\[i\] = T\[i\]\[i\]
    pub diag: Vec<f64>,
    /// sup\[i\] = T\[i\]\[i+1\]
    pub sup: Vec<f64>,
}

impl TridiagonalBands {
    pub fn new(sub: Vec<f64>, diag: Vec<f64>, sup: Vec<f64>) -> CyclicResult<Self> {
        let bands = TridiagonalBands { sub, diag, sup };
        bands.validate()?;
        Ok(bands)
    }

    /// Non-empty, with all three diagonals of equal length.
    pub fn validate(&self) -> CyclicResult<()> {
        let n = self.diag.len();
        if n == 0 {
            return Err(CyclicError::Structural("empty tridiagonal system".to_string()));
        }
        if self.sub.len() != n || self.sup.len() != n {
            return Err(CyclicError::Structural(format!(
                "band lengths differ: sub={}, diag={n}, sup={}",
                self.sub.len(),
                self.sup.len()
            )));
        }
        Ok(())
    }

    /// Extract the band of a dense matrix; anything outside it is an error.
    pub fn from_dense(t: &Array2<f64>) -> CyclicResult<Self> {
        check_strictly_tridiagonal(t)?;
        Ok(Self::band_of(t))
    }

    /// Band copy with no structural check. Caller guarantees `m` is square.
    pub(crate) fn band_of(m: &Array2<f64>) -> Self {
        let n = m.nrows();
        let sub = (0..n)
            .map(|i| if i > 0 { m[[i, i - 1]] } else { 0.0 })
            .collect();
        let diag = (0..n).map(|i| m[[i, i]]).collect();
        let sup = (0..n)
            .map(|i| if i + 1 < n { m[[i, i + 1]] } else { 0.0 })
            .collect();
        TridiagonalBands { sub, diag, sup }
    }

    pub fn len(&self) -> usize {
        self.diag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diag.is_empty()
    }

    pub fn to_dense(&self) -> Array2<f64> {
        let n = self.len();
        let mut m = Array2::zeros((n, n));
        for i in 0..n {
            m[[i, i]] = self.diag[i];
            if i > 0 {
                m[[i, i - 1]] = self.sub[i];
            }
            if i + 1 < n {
                m[[i, i + 1]] = self.sup[i];
            }
        }
        m
    }

    /// T·x in O(n).
    pub fn matvec(&self, x: &[f64]) -> CyclicResult<Vec<f64>> {
        self.validate()?;
        let n = self.len();
        if x.len() != n {
            return Err(CyclicError::Structural(format!(
                "matvec: expected vector of length {n}, got {}",
                x.len()
            )));
        }
        Ok((0..n)
            .map(|i| {
                let mut s = self.diag[i] * x[i];
                if i > 0 {
                    s += self.sub[i] * x[i - 1];
                }
                if i + 1 < n {
                    s += self.sup[i] * x[i + 1];
                }
                s
            })
            .collect())
    }

    /// Thomas solve of T·z = d with an absolute pivot floor.
    pub fn solve(&self, d: &[f64], pivot_floor: f64) -> CyclicResult<Vec<f64>> {
        thomas_solve_with_floor(&self.sub, &self.diag, &self.sup, d, pivot_floor)
    }
}

/// Periodic tridiagonal matrix: a tridiagonal band plus the corners
/// `alpha = A[0][n-1]` and `beta = A[n-1][0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicBands {
    pub band: TridiagonalBands,
    pub alpha: f64,
    pub beta: f64,
}

impl PeriodicBands {
    pub fn new(
        sub: Vec<f64>,
        diag: Vec<f64>,
        sup: Vec<f64>,
        alpha: f64,
        beta: f64,
    ) -> CyclicResult<Self> {
        let bands = PeriodicBands {
            band: TridiagonalBands { sub, diag, sup },
            alpha,
            beta,
        };
        bands.validate()?;
        Ok(bands)
    }

    /// Consistent band lengths and n >= 3.
    pub fn validate(&self) -> CyclicResult<()> {
        self.band.validate()?;
        if self.len() < MIN_SYSTEM_SIZE {
            return Err(CyclicError::Structural(format!(
                "periodic system needs n >= {MIN_SYSTEM_SIZE}, got n = {}",
                self.len()
            )));
        }
        Ok(())
    }

    /// Validate the periodic pattern and extract bands and corners.
    pub fn from_dense(a: &Array2<f64>) -> CyclicResult<Self> {
        check_periodic_tridiagonal(a)?;
        let n = a.nrows();
        Ok(PeriodicBands {
            band: TridiagonalBands::band_of(a),
            alpha: a[[0, n - 1]],
            beta: a[[n - 1, 0]],
        })
    }

    pub fn len(&self) -> usize {
        self.band.len()
    }

    pub fn is_empty(&self) -> bool {
        self.band.is_empty()
    }

    pub fn diag(&self) -> &[f64] {
        &self.band.diag
    }

    pub fn to_dense(&self) -> Array2<f64> {
        let n = self.len();
        let mut m = self.band.to_dense();
        m[[0, n - 1]] = self.alpha;
        m[[n - 1, 0]] = self.beta;
        m
    }

    /// A·x in O(n), corners included.
    pub fn matvec(&self, x: &[f64]) -> CyclicResult<Vec<f64>> {
        let mut ax = self.band.matvec(x)?;
        let n = self.len();
        ax[0] += self.alpha * x[n - 1];
        ax[n - 1] += self.beta * x[0];
        Ok(ax)
    }
}
