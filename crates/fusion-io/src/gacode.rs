// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — input.gacode Reader
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Reader for the GACODE `input.gacode` kinetic profile format.
//!
//! The file is a sequence of `#`-prefixed directive lines, each followed by
//! its values. Parsing runs in two phases over one stream:
//!
//! 1. **Header** — only `shot`, `nion` and `nexp` are acted on, until both
//!    sizes are known. The [`Plasma`] arrays are allocated at that point.
//! 2. **Body** — every other directive fills its array in file order.
//!
//! Index columns in profile bodies are discarded; values are stored by
//! arrival order, not by the index label.

use crate::directive::{classify, Directive};
use crate::tokenizer::ProfileStream;
use fusion_types::config::GacodeReadConfig;
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::state::{Plasma, MAX_PROFILE_CELLS, SHOT_UNDECLARED};
use log::{debug, error, info, warn};
use ndarray::{Array1, Array2};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

/// Sizing discovered during the header phase.
#[derive(Debug, Default)]
struct Header {
    shot: Option<i32>,
    nion: Option<usize>,
    nexp: Option<usize>,
}

impl Header {
    fn sizes(&self) -> Option<(usize, usize)> {
        Some((self.nexp?, self.nion?))
    }

    fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.nexp.is_none() {
            missing.push(Directive::Nexp.keyword());
        }
        if self.nion.is_none() {
            missing.push(Directive::Nion.keyword());
        }
        missing
    }
}

struct GacodeParser<R> {
    stream: ProfileStream<R>,
    polflux_sign: f64,
}

impl<R: BufRead> GacodeParser<R> {
    fn token<T: FromStr>(&mut self, directive: Directive) -> FusionResult<T> {
        let keyword = directive.keyword();
        let token = self
            .stream
            .next_token()?
            .ok_or(FusionError::ShortDirective { directive: keyword })?;
        token.parse::<T>().map_err(|_| FusionError::InvalidToken {
            directive: keyword,
            token: token.to_string(),
        })
    }

    fn skip_index(&mut self, directive: Directive) -> FusionResult<()> {
        self.stream
            .next_token()?
            .map(|_| ())
            .ok_or(FusionError::ShortDirective {
                directive: directive.keyword(),
            })
    }

    fn read_header(&mut self) -> FusionResult<(i32, usize, usize)> {
        let mut header = Header::default();
        let (nexp, nion) = loop {
            if let Some(sizes) = header.sizes() {
                break sizes;
            }
            let Some(line) = self.stream.next_line()? else {
                return Err(FusionError::MissingHeader {
                    missing: header.missing(),
                });
            };
            let Some(directive) = classify(&line).filter(|d| d.is_header()) else {
                continue;
            };
            debug!(
                "input.gacode line {}: header directive '{directive}'",
                self.stream.line_number()
            );
            match directive {
                Directive::Shot => header.shot = Some(self.token(directive)?),
                Directive::Nion => header.nion = Some(self.token(directive)?),
                Directive::Nexp => header.nexp = Some(self.token(directive)?),
                _ => {}
            }
        };
        for (keyword, size) in [("nexp", nexp), ("nion", nion)] {
            if size == 0 {
                return Err(FusionError::PhysicsViolation(format!(
                    "input.gacode requires {keyword} > 0"
                )));
            }
        }
        match nexp.checked_mul(nion) {
            Some(cells) if cells <= MAX_PROFILE_CELLS => {}
            _ => {
                return Err(FusionError::PhysicsViolation(format!(
                    "input.gacode nexp={nexp} x nion={nion} exceeds \
                     {MAX_PROFILE_CELLS} profile cells"
                )));
            }
        }
        Ok((header.shot.unwrap_or(SHOT_UNDECLARED), nexp, nion))
    }

    fn read_body(&mut self, plasma: &mut Plasma, names: &mut Vec<String>) -> FusionResult<()> {
        while let Some(line) = self.stream.next_line()? {
            let Some(directive) = classify(&line) else {
                continue;
            };
            // Sizes are fixed once allocated; a repeated nexp/nion line is
            // inert here and never falls through to the ne/ni handlers.
            if directive.is_sizing() {
                continue;
            }
            debug!(
                "input.gacode line {}: directive '{directive}'",
                self.stream.line_number()
            );
            self.apply(directive, plasma, names)?;
        }
        Ok(())
    }

    fn apply(
        &mut self,
        directive: Directive,
        plasma: &mut Plasma,
        names: &mut Vec<String>,
    ) -> FusionResult<()> {
        match directive {
            Directive::Shot => plasma.shot = self.token(directive)?,
            Directive::Name => self.read_names(plasma.nion, names)?,
            Directive::Masse => plasma.masse = Some(self.token(directive)?),
            Directive::Ze => plasma.ze = Some(self.token(directive)?),
            Directive::Mass => self.read_species(directive, &mut plasma.mass)?,
            Directive::Z => self.read_species(directive, &mut plasma.z)?,
            Directive::Polflux => {
                self.read_profile(directive, &mut plasma.polflux)?;
                plasma.polflux *= self.polflux_sign;
            }
            Directive::Ne => self.read_profile(directive, &mut plasma.ne)?,
            Directive::Te => self.read_profile(directive, &mut plasma.te)?,
            Directive::Ni => self.read_species_profile(directive, &mut plasma.ni)?,
            Directive::Ti => self.read_species_profile(directive, &mut plasma.ti)?,
            Directive::Nion | Directive::Nexp => {}
        }
        Ok(())
    }

    /// `name`: the next whole line holds one word per species.
    fn read_names(&mut self, nion: usize, names: &mut Vec<String>) -> FusionResult<()> {
        let short = || FusionError::ShortDirective {
            directive: Directive::Name.keyword(),
        };
        let line = self.stream.next_line()?.ok_or_else(short)?;
        let words: Vec<&str> = line.split_whitespace().take(nion).collect();
        if words.len() < nion {
            return Err(short());
        }
        names.extend(words.into_iter().map(str::to_string));
        Ok(())
    }

    /// One value per species.
    fn read_species(&mut self, directive: Directive, out: &mut Array1<f64>) -> FusionResult<()> {
        for value in out.iter_mut() {
            *value = self.token(directive)?;
        }
        Ok(())
    }

    /// One (index, value) pair per grid point.
    fn read_profile(&mut self, directive: Directive, out: &mut Array1<f64>) -> FusionResult<()> {
        for value in out.iter_mut() {
            self.skip_index(directive)?;
            *value = self.token(directive)?;
        }
        Ok(())
    }

    /// One index followed by `nion` values per grid point; fills `out[[ion, i]]`.
    fn read_species_profile(
        &mut self,
        directive: Directive,
        out: &mut Array2<f64>,
    ) -> FusionResult<()> {
        for mut column in out.columns_mut() {
            self.skip_index(directive)?;
            for value in column.iter_mut() {
                *value = self.token(directive)?;
            }
        }
        Ok(())
    }
}

/// Parse `input.gacode` content from any buffered stream.
///
/// Species names are appended to `species_identifiers` only when the whole
/// parse succeeds.
pub fn parse_input_gacode<R: BufRead>(
    reader: R,
    species_identifiers: &mut Vec<String>,
    config: &GacodeReadConfig,
) -> FusionResult<Plasma> {
    let mut parser = GacodeParser {
        stream: ProfileStream::new(reader),
        polflux_sign: config.polflux_sign(),
    };
    let (shot, nexp, nion) = parser.read_header()?;
    info!("input.gacode header: shot={shot}, nexp={nexp}, nion={nion}");

    let mut plasma = Plasma::new(shot, nexp, nion);
    let mut names = Vec::with_capacity(nion);
    parser.read_body(&mut plasma, &mut names)?;

    species_identifiers.append(&mut names);
    Ok(plasma)
}

pub fn parse_input_gacode_str(
    text: &str,
    species_identifiers: &mut Vec<String>,
    config: &GacodeReadConfig,
) -> FusionResult<Plasma> {
    parse_input_gacode(text.as_bytes(), species_identifiers, config)
}

/// Read an `input.gacode` file.
///
/// Open failure is returned as [`FusionError::Open`]; every other failure
/// means the file cannot be used and no partial result is kept.
pub fn read_input_gacode<P: AsRef<Path>>(
    path: P,
    species_identifiers: &mut Vec<String>,
    config: &GacodeReadConfig,
) -> FusionResult<Plasma> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FusionError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let result = parse_input_gacode(BufReader::new(file), species_identifiers, config);
    match &result {
        Ok(plasma) => info!(
            "Read {}: {} grid points, {} species",
            path.display(),
            plasma.nexp,
            plasma.nion
        ),
        Err(err) => error!("Failed to read {}: {err}", path.display()),
    }
    result
}

/// Like [`read_input_gacode`], but an unopenable file yields
/// [`Plasma::sentinel`] instead of an error.
pub fn read_input_gacode_or_sentinel<P: AsRef<Path>>(
    path: P,
    species_identifiers: &mut Vec<String>,
    config: &GacodeReadConfig,
) -> FusionResult<Plasma> {
    match read_input_gacode(path, species_identifiers, config) {
        Err(err @ FusionError::Open { .. }) => {
            warn!("{err}");
            Ok(Plasma::sentinel())
        }
        other => other,
    }
}
