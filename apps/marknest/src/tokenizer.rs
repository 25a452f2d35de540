//! Marker tokenizer.
//!
//! A marker is a fixed prefix immediately followed by a tag made of
//! uppercase letters, digits, and underscores (`ALIB_WARNINGS_IGNORE_DOCS`).
//! The tag `RESTORE` closes; every other tag opens and becomes the payload.
//! Host-language syntax is not considered: markers inside strings or
//! comments count the same as anywhere else.

use crate::error::{Result, SetupError};
use crate::models::marker::{MarkerKind, MarkerToken};
use regex::Regex;

/// Prefix used when neither CLI nor config file names one.
pub const DEFAULT_PREFIX: &str = "ALIB_WARNINGS_";

#[derive(Debug, Clone)]
/// Compiled marker pattern for one prefix.
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    /// Build a tokenizer recognizing `<prefix><TAG>` occurrences.
    pub fn new(prefix: &str) -> Result<Self> {
        if prefix.is_empty() {
            return Err(SetupError::InvalidPrefix(
                "marker prefix must not be empty".into(),
            ));
        }
        let source = format!("{}([A-Z0-9_]+)", regex::escape(prefix));
        let pattern =
            Regex::new(&source).map_err(|e| SetupError::InvalidPrefix(e.to_string()))?;
        Ok(Tokenizer { pattern })
    }

    /// Lazily yield the markers of one line, left to right.
    ///
    /// `line_no` is the 1-based line number stamped on each token. Columns
    /// are 1-based character offsets of the prefix within `line`. Calling
    /// again with the same input yields the same sequence.
    pub fn tokens<'a>(
        &'a self,
        line: &'a str,
        line_no: usize,
    ) -> impl Iterator<Item = MarkerToken> + 'a {
        self.pattern.captures_iter(line).filter_map(move |caps| {
            let whole = caps.get(0)?;
            let tag = caps.get(1)?.as_str();
            Some(MarkerToken {
                kind: MarkerKind::from_tag(tag),
                line: line_no,
                column: line[..whole.start()].chars().count() + 1,
            })
        })
    }
}
