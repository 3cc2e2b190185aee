//! Statement model tying trimmed SQL text to its source span.
//!
//! A `Statement` is what the splitter and the locator hand to the query
//! execution layer: one `;`-delimited unit, trimmed, never empty. The byte
//! offsets let an editor highlight the statement that is about to run.

/// One trimmed, non-empty statement and the byte span of that trimmed text.
///
/// Invariants:
/// - `text` is non-empty and has no leading or trailing whitespace
/// - `[start, end)` is a valid slice range of the original buffer and
///   `&buffer[start..end] == text`
/// - `text` holds no `;` outside comments and quoted strings
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{text}")]
pub struct Statement {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl Statement {
    /// Build a statement from the raw segment `buffer[start..end]`.
    ///
    /// Returns `None` when the segment trims to nothing.
    pub(crate) fn from_segment(buffer: &str, start: usize, end: usize) -> Option<Self> {
        let segment = &buffer[start..end];
        let trimmed = segment.trim();
        if trimmed.is_empty() {
            return None;
        }
        let lead = segment.len() - segment.trim_start().len();
        Some(Self {
            text: trimmed.to_string(),
            start: start + lead,
            end: start + lead + trimmed.len(),
        })
    }

    /// Byte length of the statement text.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Always false for statements produced by this crate.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `offset` lies within the trimmed text (end exclusive).
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    pub const fn span(&self) -> (usize, usize) {
        (self.start, self.end)
    }

    pub fn into_text(self) -> String {
        self.text
    }
}
