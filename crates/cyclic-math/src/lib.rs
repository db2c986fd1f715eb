// ─────────────────────────────────────────────────────────────────────
// SCPN Cyclic Tridiag — Cyclic Math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Solvers for tridiagonal and periodic tridiagonal linear systems.

pub mod bands;
pub mod cyclic;
pub mod linalg;
pub mod structure;
pub mod tridiag;
