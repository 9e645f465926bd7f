//! Inline markup tokenizers.
//!
//! Two independent micro-syntaxes:
//!
//! - Energy tokens (variant A): `:KEY:` where `KEY` is one or more ASCII
//!   uppercase letters. Only keys in the energy table become icons; any
//!   other `:WORD:` stays literal text, colons included.
//! - Keywords (variant B): `[anything]` up to the first closing bracket.
//!   Every bracketed run is highlighted; an unclosed `[` is literal.
//!
//! Text outside tokens is never altered: joining the segments back with
//! [`source_text`] reproduces the input.

use serde::{Deserialize, Serialize};

use crate::core::EnergyType;

/// One piece of tokenized text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Plain text, verbatim.
    Text(&'a str),
    /// A recognized `:KEY:` token.
    Icon(EnergyType),
    /// Contents of a `[keyword]`, brackets removed.
    Keyword(&'a str),
}

/// Owned form of [`Segment`] used in the render tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Icon(EnergyType),
    Keyword(String),
}

impl From<Segment<'_>> for Span {
    fn from(segment: Segment<'_>) -> Self {
        match segment {
            Segment::Text(s) => Span::Text(s.to_string()),
            Segment::Icon(e) => Span::Icon(e),
            Segment::Keyword(s) => Span::Keyword(s.to_string()),
        }
    }
}

/// Length in bytes of a `:KEY:` token starting at `start`, if any.
fn energy_token_len(bytes: &[u8], start: usize) -> Option<usize> {
    if bytes.get(start) != Some(&b':') {
        return None;
    }
    let letters = bytes[start + 1..]
        .iter()
        .take_while(|b| b.is_ascii_uppercase())
        .count();
    if letters == 0 || bytes.get(start + 1 + letters) != Some(&b':') {
        return None;
    }
    Some(letters + 2)
}

/// Split text on `:KEY:` tokens.
///
/// Adjacent literal text (including unrecognized tokens) is merged into a
/// single `Text` segment. Empty input yields no segments.
#[must_use]
pub fn tokenize_energy(text: &str) -> Vec<Segment<'_>> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let Some(len) = energy_token_len(bytes, i) else {
            i += 1;
            continue;
        };
        // tokens are pure ASCII, so these are char boundaries
        let token = &text[i..i + len];
        match EnergyType::from_token(token) {
            Some(energy) => {
                if literal_start < i {
                    segments.push(Segment::Text(&text[literal_start..i]));
                }
                segments.push(Segment::Icon(energy));
                literal_start = i + len;
            }
            None => log::trace!("literal token {token:?}"),
        }
        i += len;
    }

    if literal_start < text.len() {
        segments.push(Segment::Text(&text[literal_start..]));
    }
    segments
}

/// Split one line on `[keyword]` runs.
///
/// Empty input yields no segments.
#[must_use]
pub fn tokenize_keywords(line: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = line;

    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open + 1..].find(']') else {
            break;
        };
        let close = open + 1 + close;
        if open > 0 {
            segments.push(Segment::Text(&rest[..open]));
        }
        segments.push(Segment::Keyword(&rest[open + 1..close]));
        rest = &rest[close + 1..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }
    segments
}

/// Stand-in for a blank description line.
pub const BLANK_LINE: &str = "\u{a0}";

/// Split a description into rows of keyword spans, one per `\n` line.
///
/// A blank or whitespace-only line becomes a single non-breaking space so
/// it still occupies one line of height.
#[must_use]
pub fn description_lines(text: &str) -> Vec<Vec<Span>> {
    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                vec![Span::Text(BLANK_LINE.to_string())]
            } else {
                tokenize_keywords(line).into_iter().map(Span::from).collect()
            }
        })
        .collect()
}

/// Rebuild the source text a segment list came from.
#[must_use]
pub fn source_text(segments: &[Segment<'_>]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(s) => out.push_str(s),
            Segment::Icon(e) => out.push_str(e.token()),
            Segment::Keyword(k) => {
                out.push('[');
                out.push_str(k);
                out.push(']');
            }
        }
    }
    out
}
