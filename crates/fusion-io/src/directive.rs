// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — input.gacode Directives
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Directive classification for input.gacode comment lines.
//!
//! Several keywords are prefixes of one another (`z`/`ze`, `mass`/`masse`,
//! `ne`/`nexp`, `ni`/`nion`). All rules live in one [`RegexSet`] ordered from
//! most to least specific, and the lowest matching index wins, so every line
//! maps to at most one directive.

use regex::RegexSet;
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directive {
    Shot,
    Nion,
    Nexp,
    Name,
    Masse,
    Ze,
    Mass,
    Z,
    Polflux,
    Ne,
    Ni,
    Te,
    Ti,
}

impl Directive {
    /// All directives in matching priority order.
    pub const ALL: [Directive; 13] = [
        Directive::Shot,
        Directive::Nion,
        Directive::Nexp,
        Directive::Name,
        Directive::Masse,
        Directive::Ze,
        Directive::Mass,
        Directive::Z,
        Directive::Polflux,
        Directive::Ne,
        Directive::Ni,
        Directive::Te,
        Directive::Ti,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Directive::Shot => "shot",
            Directive::Nion => "nion",
            Directive::Nexp => "nexp",
            Directive::Name => "name",
            Directive::Masse => "masse",
            Directive::Ze => "ze",
            Directive::Mass => "mass",
            Directive::Z => "z",
            Directive::Polflux => "polflux",
            Directive::Ne => "ne",
            Directive::Ni => "ni",
            Directive::Te => "te",
            Directive::Ti => "ti",
        }
    }

    /// Directives that size the profile arrays.
    pub fn is_sizing(self) -> bool {
        matches!(self, Directive::Nion | Directive::Nexp)
    }

    /// Directives acted on before the arrays exist.
    pub fn is_header(self) -> bool {
        matches!(self, Directive::Shot | Directive::Nion | Directive::Nexp)
    }

    fn pattern(self) -> &'static str {
        match self {
            Directive::Shot => r"^#.*shot",
            Directive::Nion => r"^#.*nion",
            Directive::Nexp => r"^#.*nexp",
            Directive::Name => r"^#.*name",
            Directive::Masse => r"^#.*masse",
            Directive::Ze => r"^#.*\sze\s*$",
            Directive::Mass => r"^#.*\smass",
            Directive::Z => r"^#.*\sz(?:\s|$)",
            Directive::Polflux => r"^#.*\spolflux",
            Directive::Ne => r"^#.*\sne",
            Directive::Ni => r"^#.*\sni",
            Directive::Te => r"^#.*\ste",
            Directive::Ti => r"^#.*\sti",
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

static DIRECTIVE_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(Directive::ALL.iter().map(|d| d.pattern()))
        .expect("directive patterns are valid")
});

/// Classify one physical line (without its terminator).
///
/// Returns `None` for commentary and data lines.
pub fn classify(line: &str) -> Option<Directive> {
    DIRECTIVE_SET
        .matches(line)
        .iter()
        .next()
        .map(|idx| Directive::ALL[idx])
}
