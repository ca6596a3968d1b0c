// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::{Array1, Array2};

/// Shot number used when a profile file never declares one.
pub const SHOT_UNDECLARED: i32 = -1;

/// Upper bound on `nexp * nion` accepted from a profile file (2^24 cells,
/// 128 MiB per species-profile matrix).
pub const MAX_PROFILE_CELLS: usize = 1 << 24;

/// Kinetic plasma profiles read from an experimental profile file.
///
/// All arrays are sized once from `nexp` (radial grid points) and `nion`
/// (ion species) and never resized afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Plasma {
    pub shot: i32,
    pub nexp: usize,
    pub nion: usize,
    pub masse: Option<f64>,   // Electron mass [m_D]
    pub ze: Option<f64>,      // Electron charge [e]
    pub mass: Array1<f64>,    // Ion masses [nion]
    pub z: Array1<f64>,       // Ion charges [nion]
    pub polflux: Array1<f64>, // Poloidal flux [nexp]
    pub ne: Array1<f64>,      // Electron density [nexp]
    pub te: Array1<f64>,      // Electron temperature [nexp]
    pub ni: Array2<f64>,      // Ion densities [nion, nexp]
    pub ti: Array2<f64>,      // Ion temperatures [nion, nexp]
}

impl Plasma {
    /// Zero-filled container for `nexp` grid points and `nion` species.
    ///
    /// Callers sizing from untrusted input should bound `nexp * nion` by
    /// [`MAX_PROFILE_CELLS`] first; allocation failure panics.
    pub fn new(shot: i32, nexp: usize, nion: usize) -> Self {
        Plasma {
            shot,
            nexp,
            nion,
            masse: None,
            ze: None,
            mass: Array1::zeros(nion),
            z: Array1::zeros(nion),
            polflux: Array1::zeros(nexp),
            ne: Array1::zeros(nexp),
            te: Array1::zeros(nexp),
            ni: Array2::zeros((nion, nexp)),
            ti: Array2::zeros((nion, nexp)),
        }
    }

    /// "No data" marker: shot=-1, nexp=0, nion=0.
    pub fn sentinel() -> Self {
        Plasma::new(SHOT_UNDECLARED, 0, 0)
    }

    pub fn is_sentinel(&self) -> bool {
        self.shot == SHOT_UNDECLARED && self.nexp == 0 && self.nion == 0
    }
}
