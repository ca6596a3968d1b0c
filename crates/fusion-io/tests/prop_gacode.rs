// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Property-Based Tests (proptest) for fusion-io
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for the input.gacode reader using proptest.
//!
//! Covers: array sizing, repeatability, polflux sign convention,
//! index-label independence, short-body failures.

use fusion_io::gacode::parse_input_gacode_str;
use fusion_types::config::GacodeReadConfig;
use fusion_types::error::FusionError;
use fusion_types::state::SHOT_UNDECLARED;
use proptest::prelude::*;

/// Values for one synthetic profile file.
#[derive(Debug, Clone)]
struct Profile {
    nexp: usize,
    nion: usize,
    shot: Option<i32>,
    mass: Vec<f64>,
    z: Vec<f64>,
    polflux: Vec<f64>,
    ne: Vec<f64>,
    te: Vec<f64>,
    ni: Vec<f64>, // grid-major: [i * nion + ion]
    ti: Vec<f64>,
}

impl Profile {
    fn render(&self, labels: &[u32]) -> String {
        let mut out = String::new();
        out.push_str("# header written by proptest\n");
        out.push_str(&format!("# nexp\n{}\n# nion\n{}\n", self.nexp, self.nion));
        if let Some(shot) = self.shot {
            out.push_str(&format!("# shot\n{shot}\n"));
        }
        let names: Vec<String> = (0..self.nion).map(|i| format!("S{i}")).collect();
        out.push_str(&format!("# name\n{}\n", names.join(" ")));
        out.push_str("# masse\n5.4488e-4\n# ze\n-1.0\n");
        out.push_str(&format!("# mass\n{}\n", join(&self.mass)));
        out.push_str(&format!("# z\n{}\n", join(&self.z)));
        for (title, values) in [
            ("polflux | Wb/radian", &self.polflux),
            ("ne | 10^19/m^3", &self.ne),
            ("te | keV", &self.te),
        ] {
            out.push_str(&format!("# {title}\n"));
            for (label, v) in labels.iter().zip(values) {
                out.push_str(&format!(" {label} {v:e}\n"));
            }
        }
        for (title, values) in [("ni | 10^19/m^3", &self.ni), ("ti | keV", &self.ti)] {
            out.push_str(&format!("# {title}\n"));
            for (label, row) in labels.iter().zip(values.chunks(self.nion)) {
                out.push_str(&format!(" {label} {}\n", join(row)));
            }
        }
        out
    }

    fn sequential_labels(&self) -> Vec<u32> {
        (1..=self.nexp as u32).collect()
    }
}

fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{v:e}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn profile_strategy() -> impl Strategy<Value = Profile> {
    (1usize..24, 1usize..5, proptest::option::of(0i32..1_000_000)).prop_flat_map(
        |(nexp, nion, shot)| {
            let v = |n: usize| prop::collection::vec(-1.0e3f64..1.0e3, n);
            (
                v(nion),
                v(nion),
                v(nexp),
                v(nexp),
                v(nexp),
                v(nexp * nion),
                v(nexp * nion),
            )
                .prop_map(move |(mass, z, polflux, ne, te, ni, ti)| Profile {
                    nexp,
                    nion,
                    shot,
                    mass,
                    z,
                    polflux,
                    ne,
                    te,
                    ni,
                    ti,
                })
        },
    )
}

fn default_cfg() -> GacodeReadConfig {
    GacodeReadConfig::default()
}

// ── Sizing and Values ────────────────────────────────────────────────

proptest! {
    /// Every array is sized from the declared nexp/nion and holds the file's values.
    #[test]
    fn arrays_match_declared_sizes(profile in profile_strategy()) {
        let text = profile.render(&profile.sequential_labels());
        let mut names = Vec::new();
        let plasma = parse_input_gacode_str(&text, &mut names, &default_cfg()).unwrap();

        prop_assert_eq!(plasma.nexp, profile.nexp);
        prop_assert_eq!(plasma.nion, profile.nion);
        prop_assert_eq!(plasma.shot, profile.shot.unwrap_or(SHOT_UNDECLARED));
        prop_assert_eq!(names.len(), profile.nion);
        prop_assert_eq!(plasma.mass.to_vec(), profile.mass.clone());
        prop_assert_eq!(plasma.z.to_vec(), profile.z.clone());
        prop_assert_eq!(plasma.ne.to_vec(), profile.ne.clone());
        prop_assert_eq!(plasma.te.to_vec(), profile.te.clone());
        prop_assert_eq!(plasma.ni.shape(), &[profile.nion, profile.nexp]);
        prop_assert_eq!(plasma.ti.shape(), &[profile.nion, profile.nexp]);
        for i in 0..profile.nexp {
            for ion in 0..profile.nion {
                prop_assert_eq!(plasma.ni[[ion, i]], profile.ni[i * profile.nion + ion]);
                prop_assert_eq!(plasma.ti[[ion, i]], profile.ti[i * profile.nion + ion]);
            }
        }
    }

    /// Parsing the same text twice gives identical results.
    #[test]
    fn parse_is_repeatable(profile in profile_strategy()) {
        let text = profile.render(&profile.sequential_labels());
        let mut names_a = Vec::new();
        let mut names_b = Vec::new();
        let a = parse_input_gacode_str(&text, &mut names_a, &default_cfg()).unwrap();
        let b = parse_input_gacode_str(&text, &mut names_b, &default_cfg()).unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(names_a, names_b);
    }

    /// Disabling the sign convention negates polflux and nothing else.
    #[test]
    fn polflux_sign_toggle(profile in profile_strategy()) {
        let text = profile.render(&profile.sequential_labels());
        let mut names = Vec::new();
        let negated = parse_input_gacode_str(&text, &mut names, &default_cfg()).unwrap();
        let cfg = GacodeReadConfig { negative_psi: false };
        let plain = parse_input_gacode_str(&text, &mut names, &cfg).unwrap();

        for (n, p) in negated.polflux.iter().zip(plain.polflux.iter()) {
            prop_assert_eq!(*n, -*p);
        }
        prop_assert_eq!(plain.polflux.to_vec(), profile.polflux.clone());

        let mut restored = negated.clone();
        restored.polflux = plain.polflux.clone();
        prop_assert_eq!(restored, plain);
    }

    /// Index labels are discarded; values land by arrival order.
    #[test]
    fn index_labels_are_ignored(
        profile in profile_strategy(),
        seed in prop::collection::vec(0u32..10_000, 24),
    ) {
        let labels: Vec<u32> = seed[..profile.nexp].to_vec();
        let mut names = Vec::new();
        let reference = parse_input_gacode_str(
            &profile.render(&profile.sequential_labels()),
            &mut names,
            &default_cfg(),
        )
        .unwrap();
        let relabelled =
            parse_input_gacode_str(&profile.render(&labels), &mut names, &default_cfg()).unwrap();
        prop_assert_eq!(reference, relabelled);
    }
}

// ── Failure Modes ────────────────────────────────────────────────────

proptest! {
    /// A z body with fewer than nion values before end of input names z.
    #[test]
    fn short_z_body_names_z(nion in 2usize..8, provided in 0usize..8) {
        prop_assume!(provided < nion);
        let values: Vec<String> = (0..provided).map(|i| format!("{}", i + 1)).collect();
        let text = format!("# nion\n{nion}\n# nexp\n4\n# z\n{}\n", values.join(" "));
        let mut names = Vec::new();
        let err = parse_input_gacode_str(&text, &mut names, &default_cfg()).unwrap_err();
        prop_assert_eq!(err.directive(), Some("z"));
        prop_assert!(err.to_string().contains("z"));
    }

    /// Without a nion directive the error mentions nion (and only nion).
    #[test]
    fn missing_nion_reported(nexp in 1usize..100) {
        let text = format!("# nexp\n{nexp}\n# ne\n1 1.0\n");
        let mut names = Vec::new();
        let err = parse_input_gacode_str(&text, &mut names, &default_cfg()).unwrap_err();
        match err {
            FusionError::MissingHeader { missing } => prop_assert_eq!(missing, vec!["nion"]),
            other => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }
}
