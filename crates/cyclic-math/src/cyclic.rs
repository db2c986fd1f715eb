// ─────────────────────────────────────────────────────────────────────
// SCPN Cyclic Tridiag — Cyclic
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Periodic (cyclic) tridiagonal solver via Sherman-Morrison.
//!
//! The periodic matrix A is split as A = T + u·vᵀ (Batista-Karawia):
//!   T\[0\]\[0\]     = A\[0\]\[0\] - γ
//!   T\[n-1\]\[n-1\] = A\[n-1\]\[n-1\] - A\[n-1\]\[0\]·A\[0\]\[n-1\] / γ
//!   u = (γ, 0, …, 0, A\[n-1\]\[0\])
//!   v = (1, 0, …, 0, A\[0\]\[n-1\] / γ)
//! with T strictly tridiagonal. Two Thomas solves, T·q = u and T·y = b,
//! then give
//!   x = y - q·(vᵀy) / (1 + vᵀq).
//!
//! Every stage is a pure function: `select_pivot`, `Decomposition::new`,
//! the two Thomas solves and `sherman_morrison_combine`. The solver caches
//! only the immutable decomposition, so one instance can be shared across
//! threads and reused for many right-hand sides.

use cyclic_types::config::SolverConfig;
use cyclic_types::error::{CyclicError, CyclicResult};
use ndarray::Array2;

use crate::bands::{PeriodicBands, TridiagonalBands};
use crate::linalg::{axpy, dot, max_abs_diff, outer_product};

// ───────────────────────────── pivot policy ──────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PivotSource {
    /// Supplied by the caller.
    Explicit,
    /// γ = -A\[row\]\[row\], the first nonzero main-diagonal entry.
    Diagonal { row: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotChoice {
    pub gamma: f64,
    pub source: PivotSource,
}

fn check_gamma(gamma: f64) -> CyclicResult<()> {
    if gamma == 0.0 {
        return Err(CyclicError::InvalidPivot {
            gamma,
            reason: "pivot must be nonzero".to_string(),
        });
    }
    if !gamma.is_finite() {
        return Err(CyclicError::InvalidPivot {
            gamma,
            reason: "pivot must be finite".to_string(),
        });
    }
    Ok(())
}

/// All diagonal-derived pivots `-A[i][i]` with a nonzero entry, top to
/// bottom. The solver uses only the first; callers that want to retry
/// after a pivot failure can walk the rest.
pub fn diagonal_pivot_candidates(bands: &PeriodicBands) -> Vec<PivotChoice> {
    bands
        .diag()
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d != 0.0)
        .map(|(row, &d)| PivotChoice {
            gamma: -d,
            source: PivotSource::Diagonal { row },
        })
        .collect()
}

/// Pick γ: the explicit value if given, otherwise the first nonzero
/// `-A[i][i]`. Fails with `InvalidPivot` if the result is zero or
/// non-finite, including when the whole diagonal is zero.
pub fn select_pivot(bands: &PeriodicBands, explicit: Option<f64>) -> CyclicResult<PivotChoice> {
    let choice = match explicit {
        Some(gamma) => PivotChoice {
            gamma,
            source: PivotSource::Explicit,
        },
        None => diagonal_pivot_candidates(bands)
            .into_iter()
            .next()
            .ok_or_else(|| CyclicError::InvalidPivot {
                gamma: 0.0,
                reason: "every main-diagonal entry is zero".to_string(),
            })?,
    };
    check_gamma(choice.gamma)?;
    log::debug!(
        "[cyclic] pivot gamma={:.6e} source={:?} (n={})",
        choice.gamma,
        choice.source,
        bands.len()
    );
    Ok(choice)
}

// ───────────────────────────── decomposition ─────────────────────────

/// Immutable split A = T + u·vᵀ for a fixed γ.
#[derive(Debug, Clone, PartialEq)]
pub struct Decomposition {
    gamma: f64,
    t: TridiagonalBands,
    u: Vec<f64>,
    v: Vec<f64>,
}

impl Decomposition {
    pub fn new(bands: &PeriodicBands, gamma: f64) -> CyclicResult<Self> {
        bands.validate()?;
        check_gamma(gamma)?;
        let n = bands.len();
        let alpha = bands.alpha;
        let beta = bands.beta;

        let mut t = bands.band.clone();
        t.sub[0] = 0.0;
        t.sup[n - 1] = 0.0;
        t.diag[0] -= gamma;
        t.diag[n - 1] -= beta * alpha / gamma;

        let mut u = vec![0.0; n];
        u[0] = gamma;
        u[n - 1] = beta;

        let mut v = vec![0.0; n];
        v[0] = 1.0;
        v[n - 1] = alpha / gamma;

        log::debug!(
            "[cyclic] decomposition n={n} T[0][0]={:.6e} T[n-1][n-1]={:.6e}",
            t.diag[0],
            t.diag[n - 1]
        );

        Ok(Decomposition { gamma, t, u, v })
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn t(&self) -> &TridiagonalBands {
        &self.t
    }

    pub fn u(&self) -> &[f64] {
        &self.u
    }

    pub fn v(&self) -> &[f64] {
        &self.v
    }

    pub fn len(&self) -> usize {
        self.u.len()
    }

    pub fn is_empty(&self) -> bool {
        self.u.is_empty()
    }

    /// T as a dense matrix.
    pub fn t_dense(&self) -> Array2<f64> {
        self.t.to_dense()
    }

    /// T + u·vᵀ, which equals A up to rounding in the corrected entries.
    pub fn reconstruct(&self) -> Array2<f64> {
        self.t_dense() + outer_product(&self.u, &self.v)
    }
}

// ───────────────────────────── combination ───────────────────────────

/// x = y - q·(vᵀy) / (1 + vᵀq).
///
/// `|1 + vᵀq| <= tol·max(1, |vᵀq|)` (or a non-finite denominator) means
/// A is singular for this split and is reported as `InvalidPivot`.
pub fn sherman_morrison_combine(
    q: &[f64],
    y: &[f64],
    v: &[f64],
    gamma: f64,
    tol: f64,
) -> CyclicResult<Vec<f64>> {
    let vq = dot(v, q)?;
    let denom = 1.0 + vq;
    if !denom.is_finite() || denom.abs() <= tol * vq.abs().max(1.0) {
        log::warn!("[cyclic] degenerate Sherman-Morrison denominator 1+vq={denom:.3e} (gamma={gamma:.6e})");
        return Err(CyclicError::InvalidPivot {
            gamma,
            reason: format!("1 + vᵀq = {denom:e} is numerically zero"),
        });
    }
    let vy = dot(v, y)?;
    log::trace!("[cyclic] vq={vq:.6e} vy={vy:.6e}");
    axpy(-vy / denom, q, y)
}

// ───────────────────────────── solver ────────────────────────────────

/// Sherman-Morrison solver for one periodic tridiagonal matrix A and a
/// default right-hand side b.
#[derive(Debug, Clone)]
pub struct CyclicTridiagonalSolver {
    bands: PeriodicBands,
    rhs: Vec<f64>,
    pivot: PivotChoice,
    decomposition: Decomposition,
    config: SolverConfig,
}

impl CyclicTridiagonalSolver {
    /// Default pivot heuristic and tolerances.
    pub fn new(a: &Array2<f64>, b: &[f64]) -> CyclicResult<Self> {
        Self::with_config(a, b, SolverConfig::default())
    }

    pub fn with_pivot(a: &Array2<f64>, b: &[f64], gamma: f64) -> CyclicResult<Self> {
        Self::with_config(a, b, SolverConfig::default().with_pivot(gamma))
    }

    /// Validates structure, then the rhs length, then the pivot.
    pub fn with_config(a: &Array2<f64>, b: &[f64], config: SolverConfig) -> CyclicResult<Self> {
        let bands = PeriodicBands::from_dense(a)?;
        Self::from_bands(bands, b, config)
    }

    /// Build from band storage, skipping the dense matrix entirely.
    pub fn from_bands(bands: PeriodicBands, b: &[f64], config: SolverConfig) -> CyclicResult<Self> {
        bands.validate()?;
        if b.len() != bands.len() {
            return Err(CyclicError::Structural(format!(
                "rhs has length {}, matrix is {n}x{n}",
                b.len(),
                n = bands.len()
            )));
        }
        let pivot = select_pivot(&bands, config.pivot)?;
        config.validate_tolerances()?;
        let decomposition = Decomposition::new(&bands, pivot.gamma)?;
        Ok(CyclicTridiagonalSolver {
            bands,
            rhs: b.to_vec(),
            pivot,
            decomposition,
            config,
        })
    }

    /// Solve A·x = b for the right-hand side given at construction.
    pub fn solve(&self) -> CyclicResult<Vec<f64>> {
        self.solve_rhs(&self.rhs)
    }

    /// Solve A·x = rhs against the cached decomposition.
    pub fn solve_rhs(&self, rhs: &[f64]) -> CyclicResult<Vec<f64>> {
        let n = self.dim();
        if rhs.len() != n {
            return Err(CyclicError::Structural(format!(
                "rhs has length {}, matrix is {n}x{n}",
                rhs.len()
            )));
        }
        let dec = &self.decomposition;
        let floor = self.config.pivot_floor;
        let q = dec.t().solve(dec.u(), floor)?;
        let y = dec.t().solve(rhs, floor)?;
        sherman_morrison_combine(&q, &y, dec.v(), dec.gamma(), self.config.singular_tolerance)
    }

    /// max_i |(A·x - b)_i| against the construction-time b.
    pub fn residual(&self, x: &[f64]) -> CyclicResult<f64> {
        let ax = self.bands.matvec(x)?;
        max_abs_diff(&ax, &self.rhs)
    }

    pub fn dim(&self) -> usize {
        self.bands.len()
    }

    pub fn gamma(&self) -> f64 {
        self.pivot.gamma
    }

    pub fn pivot(&self) -> PivotChoice {
        self.pivot
    }

    pub fn decomposition(&self) -> &Decomposition {
        &self.decomposition
    }

    pub fn bands(&self) -> &PeriodicBands {
        &self.bands
    }

    pub fn rhs(&self) -> &[f64] {
        &self.rhs
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn scenario_matrix() -> Array2<f64> {
        array![
            [2.0, 7.0, 0.0, 0.0, 3.0],
            [7.0, 6.0, 4.0, 0.0, 0.0],
            [0.0, 4.0, 1.0, 5.0, 0.0],
            [0.0, 0.0, 5.0, 9.0, 2.0],
            [8.0, 0.0, 0.0, 2.0, 6.0],
        ]
    }

    const SCENARIO_RHS: [f64; 5] = [31.0, 31.0, 31.0, 61.0, 46.0];

    /// Periodic 1D Laplacian: circulant, singular (constant null space).
    fn periodic_laplacian(n: usize) -> Array2<f64> {
        let mut a = Array2::zeros((n, n));
        for i in 0..n {
            a[[i, i]] = 2.0;
            a[[i, (i + 1) % n]] = -1.0;
            a[[i, (i + n - 1) % n]] = -1.0;
        }
        a
    }

    fn dense_matvec(a: &Array2<f64>, x: &[f64]) -> Vec<f64> {
        (0..a.nrows())
            .map(|i| (0..a.ncols()).map(|j| a[[i, j]] * x[j]).sum())
            .collect()
    }

    #[test]
    fn test_scenario_solution() {
        let a = scenario_matrix();
        let solver = CyclicTridiagonalSolver::new(&a, &SCENARIO_RHS).unwrap();
        let x = solver.solve().unwrap();

        let expected = [1.0, 2.0, 3.0, 4.0, 5.0];
        for i in 0..5 {
            assert!(
                (x[i] - expected[i]).abs() < 1e-10,
                "x[{i}] = {}, expected {}",
                x[i],
                expected[i]
            );
        }
        // Direct substitution.
        let ax = dense_matvec(&a, &x);
        for i in 0..5 {
            assert!((ax[i] - SCENARIO_RHS[i]).abs() < 1e-9, "Ax[{i}] = {}", ax[i]);
        }
        assert!(solver.residual(&x).unwrap() < 1e-9);
    }

    #[test]
    fn test_default_pivot_is_negated_first_diagonal() {
        let solver = CyclicTridiagonalSolver::new(&scenario_matrix(), &SCENARIO_RHS).unwrap();
        assert_eq!(solver.gamma(), -2.0);
        assert_eq!(solver.pivot().source, PivotSource::Diagonal { row: 0 });
    }

    #[test]
    fn test_pivot_falls_back_down_the_diagonal() {
        let mut a = scenario_matrix();
        a[[0, 0]] = 0.0;
        a[[1, 1]] = 0.0;
        let bands = PeriodicBands::from_dense(&a).unwrap();
        let choice = select_pivot(&bands, None).unwrap();
        assert_eq!(choice.gamma, -1.0);
        assert_eq!(choice.source, PivotSource::Diagonal { row: 2 });

        let candidates = diagonal_pivot_candidates(&bands);
        let gammas: Vec<f64> = candidates.iter().map(|c| c.gamma).collect();
        assert_eq!(gammas, vec![-1.0, -9.0, -6.0]);
    }

    #[test]
    fn test_all_zero_diagonal_fails_construction() {
        let mut a = scenario_matrix();
        for i in 0..5 {
            a[[i, i]] = 0.0;
        }
        let err = CyclicTridiagonalSolver::new(&a, &SCENARIO_RHS).unwrap_err();
        assert!(matches!(err, CyclicError::InvalidPivot { .. }), "{err}");
    }

    #[test]
    fn test_explicit_pivot_validation() {
        let a = scenario_matrix();
        for bad in [0.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = CyclicTridiagonalSolver::with_pivot(&a, &SCENARIO_RHS, bad).unwrap_err();
            assert!(err.is_pivot_failure(), "gamma={bad}: {err}");
        }
    }

    #[test]
    fn test_structural_errors_take_precedence() {
        let mut a = scenario_matrix();
        a[[0, 2]] = 1.0;
        let err = CyclicTridiagonalSolver::with_pivot(&a, &SCENARIO_RHS, 0.0).unwrap_err();
        assert!(err.is_structural());

        let short = [1.0, 2.0, 3.0];
        let err = CyclicTridiagonalSolver::new(&scenario_matrix(), &short).unwrap_err();
        assert!(err.is_structural());

        let err = CyclicTridiagonalSolver::new(&Array2::eye(2), &[1.0, 1.0]).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_decomposition_identity() {
        let a = scenario_matrix();
        let bands = PeriodicBands::from_dense(&a).unwrap();
        for gamma in [-2.0, 5.0, 0.25] {
            let dec = Decomposition::new(&bands, gamma).unwrap();
            let t = dec.t_dense();
            assert_eq!(t[[0, 4]], 0.0);
            assert_eq!(t[[4, 0]], 0.0);
            assert_eq!(t[[0, 0]], 2.0 - gamma);
            assert!((t[[4, 4]] - (6.0 - 24.0 / gamma)).abs() < 1e-12);
            assert_eq!(dec.u(), &[gamma, 0.0, 0.0, 0.0, 8.0]);
            assert_eq!(dec.v()[0], 1.0);
            assert!((dec.v()[4] - 3.0 / gamma).abs() < 1e-15);

            let r = dec.reconstruct();
            for ((i, j), &value) in r.indexed_iter() {
                assert!(
                    (value - a[[i, j]]).abs() < 1e-12,
                    "gamma={gamma}: ({i},{j}) = {value}, expected {}",
                    a[[i, j]]
                );
            }
        }
    }

    #[test]
    fn test_pivot_invariance() {
        let a = scenario_matrix();
        let x1 = CyclicTridiagonalSolver::with_pivot(&a, &SCENARIO_RHS, -2.0)
            .unwrap()
            .solve()
            .unwrap();
        let x2 = CyclicTridiagonalSolver::with_pivot(&a, &SCENARIO_RHS, 5.0)
            .unwrap()
            .solve()
            .unwrap();
        assert!(max_abs_diff(&x1, &x2).unwrap() < 1e-9);
    }

    #[test]
    fn test_singular_denominator_is_reported() {
        // Periodic Laplacian is singular while T stays regular, so 1 + vᵀq = 0.
        let a = periodic_laplacian(3);
        let solver = CyclicTridiagonalSolver::new(&a, &[1.0, 0.0, -1.0]).unwrap();
        assert_eq!(solver.gamma(), -2.0);
        let err = solver.solve().unwrap_err();
        assert!(matches!(err, CyclicError::InvalidPivot { .. }), "{err}");
        assert!(err.is_pivot_failure());
    }

    #[test]
    fn test_singular_denominator_larger_system() {
        let a = periodic_laplacian(8);
        let b = vec![1.0; 8];
        let err = CyclicTridiagonalSolver::new(&a, &b).unwrap().solve().unwrap_err();
        assert!(matches!(err, CyclicError::InvalidPivot { .. }), "{err}");
    }

    #[test]
    fn test_singular_t_propagates_from_thomas() {
        // gamma = A[0][0] makes T[0][0] = 0.
        let a = scenario_matrix();
        let solver = CyclicTridiagonalSolver::with_pivot(&a, &SCENARIO_RHS, 2.0).unwrap();
        let err = solver.solve().unwrap_err();
        assert!(matches!(err, CyclicError::SingularPivot { row: 0, .. }), "{err}");
    }

    #[test]
    fn test_solve_is_idempotent() {
        let solver = CyclicTridiagonalSolver::new(&scenario_matrix(), &SCENARIO_RHS).unwrap();
        let x1 = solver.solve().unwrap();
        let x2 = solver.solve().unwrap();
        let bits1: Vec<u64> = x1.iter().map(|v| v.to_bits()).collect();
        let bits2: Vec<u64> = x2.iter().map(|v| v.to_bits()).collect();
        assert_eq!(bits1, bits2);
    }

    #[test]
    fn test_solve_rhs_reuses_decomposition() {
        let a = scenario_matrix();
        let solver = CyclicTridiagonalSolver::new(&a, &SCENARIO_RHS).unwrap();
        let x_true = [0.5, -1.0, 2.0, 0.0, 3.0];
        let b2 = dense_matvec(&a, &x_true);
        let x = solver.solve_rhs(&b2).unwrap();
        assert!(max_abs_diff(&x, &x_true).unwrap() < 1e-10);
        assert!(solver.solve_rhs(&[1.0; 4]).unwrap_err().is_structural());
        // The stored rhs is untouched.
        assert_eq!(solver.rhs(), &SCENARIO_RHS);
    }

    #[test]
    fn test_from_bands_matches_dense() {
        let a = scenario_matrix();
        let bands = PeriodicBands::from_dense(&a).unwrap();
        let from_bands =
            CyclicTridiagonalSolver::from_bands(bands, &SCENARIO_RHS, SolverConfig::default())
                .unwrap();
        let from_dense = CyclicTridiagonalSolver::new(&a, &SCENARIO_RHS).unwrap();
        assert_eq!(from_bands.solve().unwrap(), from_dense.solve().unwrap());
    }

    #[test]
    fn test_caller_retry_over_candidates() {
        // gamma = A[0][0] zeroes T[0][0]; recover by walking the diagonal
        // candidates until one solves.
        let a = scenario_matrix();
        let first = CyclicTridiagonalSolver::with_pivot(&a, &SCENARIO_RHS, 2.0)
            .unwrap()
            .solve();
        assert!(first.unwrap_err().is_pivot_failure());

        let bands = PeriodicBands::from_dense(&a).unwrap();
        let x = diagonal_pivot_candidates(&bands)
            .into_iter()
            .find_map(|c| {
                CyclicTridiagonalSolver::with_pivot(&a, &SCENARIO_RHS, c.gamma)
                    .and_then(|s| s.solve())
                    .ok()
            })
            .unwrap();
        assert!((x[4] - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_config_tolerance_validation() {
        let cfg = SolverConfig {
            singular_tolerance: f64::NAN,
            ..SolverConfig::default()
        };
        let err =
            CyclicTridiagonalSolver::with_config(&scenario_matrix(), &SCENARIO_RHS, cfg).unwrap_err();
        assert!(matches!(err, CyclicError::ConfigError(_)));
    }

    #[test]
    fn test_combine_rejects_exact_zero_denominator() {
        // vᵀq = -1 exactly.
        let q = [-1.0, 0.0, 0.0];
        let y = [1.0, 1.0, 1.0];
        let v = [1.0, 0.0, 0.0];
        let err = sherman_morrison_combine(&q, &y, &v, -1.0, 0.0).unwrap_err();
        assert!(matches!(err, CyclicError::InvalidPivot { .. }));
    }

    #[test]
    fn test_caller_inputs_not_mutated() {
        let a = scenario_matrix();
        let b = SCENARIO_RHS.to_vec();
        let solver = CyclicTridiagonalSolver::new(&a, &b).unwrap();
        let _ = solver.solve().unwrap();
        assert_eq!(a, scenario_matrix());
        assert_eq!(b, SCENARIO_RHS.to_vec());
    }
}
