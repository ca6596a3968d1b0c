// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

/// Options for reading `input.gacode` profile files.
///
/// Every field has a default, so an empty JSON object `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GacodeReadConfig {
    /// Negate `polflux` on read.
    /// input.gacode stores poloidal flux with the opposite sign to the
    /// companion G-EQDSK file, so this defaults to true.
    #[serde(default = "default_negative_psi")]
    pub negative_psi: bool,
}

fn default_negative_psi() -> bool {
    true
}

impl Default for GacodeReadConfig {
    fn default() -> Self {
        GacodeReadConfig {
            negative_psi: default_negative_psi(),
        }
    }
}

impl GacodeReadConfig {
    /// Load from JSON file.
    pub fn from_file(path: &str) -> crate::error::FusionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Multiplier applied to every `polflux` value.
    pub fn polflux_sign(&self) -> f64 {
        if self.negative_psi {
            -1.0
        } else {
            1.0
        }
    }
}
