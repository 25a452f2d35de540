//! Marker token types produced by the tokenizer and held by the validator.

/// Tag that closes the most recently opened marker.
pub const RESTORE_TAG: &str = "RESTORE";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Binary classification of a marker occurrence.
pub enum MarkerKind {
    Push { payload: String },
    Restore,
}

impl MarkerKind {
    /// Classify a tag: `RESTORE` closes, anything else opens.
    pub fn from_tag(tag: &str) -> Self {
        if tag == RESTORE_TAG {
            MarkerKind::Restore
        } else {
            MarkerKind::Push {
                payload: tag.to_string(),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One marker occurrence with its 1-based position.
pub struct MarkerToken {
    pub kind: MarkerKind,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A push waiting on the per-file stack for its RESTORE.
pub struct PendingPush {
    pub payload: String,
    pub line: usize,
    pub column: usize,
}
