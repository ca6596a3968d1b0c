// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Numeric Tokenizer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Line-independent numeric tokenizer over a buffered text stream.
//!
//! [`ProfileStream`] carries two cursors over one reader:
//!
//! * the **line cursor** ([`ProfileStream::next_line`]) hands out whole
//!   physical lines for directive detection;
//! * the **token cursor** ([`ProfileStream::next_token`]) pulls numeric
//!   tokens, refilling itself line by line as needed.
//!
//! Both cursors pull from the same reader, so the line cursor always resumes
//! after the last line the token cursor loaded. Anything left unscanned on
//! the token cursor's current line stays pending and is served by the next
//! token request, even if the line cursor has moved on. Index/value pairs
//! that span several lines, and bodies whose values share a line with
//! their index, both rely on this interleaving.
//!
//! Lines are read as raw bytes. Bytes that are not valid UTF-8 (e.g. a
//! Latin-1 name in a comment) never abort a read.

use fusion_types::error::FusionResult;
use regex::bytes::Regex;
use std::io::{self, BufRead};
use std::sync::LazyLock;

/// Optional sign, digits, optional fraction, optional exponent. ASCII only.
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[+-]?[0-9]*\.?[0-9]+(?:[Ee][+-]?[0-9]+)?")
        .expect("numeric token pattern is valid")
});

/// Pulls numeric tokens from a reader one at a time.
///
/// Non-numeric text between tokens is skipped, including whole lines with no
/// candidates. Returns `None` only when the reader is exhausted.
#[derive(Debug, Default)]
pub struct NumericTokenizer {
    buffer: Vec<u8>,
    cursor: usize,
}

impl NumericTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next<R: BufRead>(&mut self, reader: &mut R) -> FusionResult<Option<&str>> {
        loop {
            let found = NUMBER_RE
                .find_at(&self.buffer, self.cursor)
                .map(|m| m.range());
            if let Some(range) = found {
                self.cursor = range.end;
                let token = std::str::from_utf8(&self.buffer[range])
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                return Ok(Some(token));
            }
            self.buffer.clear();
            self.cursor = 0;
            if reader.read_until(b'\n', &mut self.buffer)? == 0 {
                return Ok(None);
            }
        }
    }
}

/// A reader paired with an independent line cursor and token cursor.
#[derive(Debug)]
pub struct ProfileStream<R> {
    reader: R,
    tokens: NumericTokenizer,
    line_number: usize,
}

impl<R: BufRead> ProfileStream<R> {
    pub fn new(reader: R) -> Self {
        ProfileStream {
            reader,
            tokens: NumericTokenizer::new(),
            line_number: 0,
        }
    }

    /// Next physical line with its line terminator stripped.
    /// Invalid UTF-8 is replaced with U+FFFD.
    pub fn next_line(&mut self) -> FusionResult<Option<String>> {
        let mut raw = Vec::new();
        if self.reader.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Next numeric token, crossing line boundaries as needed.
    pub fn next_token(&mut self) -> FusionResult<Option<&str>> {
        self.tokens.next(&mut self.reader)
    }

    /// Number of lines handed out by the line cursor so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}
