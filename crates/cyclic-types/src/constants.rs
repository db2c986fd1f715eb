// ─────────────────────────────────────────────────────────────────────
// SCPN Cyclic Tridiag — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Smallest system the cyclic solver accepts.
/// At n = 2 the corner entries coincide with the off-diagonals.
pub const MIN_SYSTEM_SIZE: usize = 3;

/// Relative tolerance on the Sherman-Morrison denominator `1 + vᵀq`.
pub const DEFAULT_SINGULAR_TOLERANCE: f64 = 1e-12;

/// Thomas pivots with magnitude at or below this are treated as zero.
/// Zero means only an exact 0.0 (or a non-finite value) is rejected.
pub const DEFAULT_PIVOT_FLOOR: f64 = 0.0;
