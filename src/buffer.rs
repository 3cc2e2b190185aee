use crate::sql::{
    SqlContext, Statement, analyze, context::clamp_offset, locate_statement, split_statements,
};

/// An editor buffer and its cursor, as handed over on each edit event.
///
/// The cursor is a byte offset, clamped into the text and floored to a
/// character boundary on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceBuffer<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> SourceBuffer<'a> {
    pub fn new(text: &'a str, cursor: usize) -> Self {
        Self {
            text,
            cursor: clamp_offset(text, cursor),
        }
    }

    /// Buffer with the cursor at the end of the text.
    pub fn at_end(text: &'a str) -> Self {
        Self::new(text, text.len())
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn before_cursor(&self) -> &'a str {
        &self.text[..self.cursor]
    }

    /// Completion context at the cursor.
    pub fn analyze(&self) -> SqlContext {
        analyze(self.text, self.cursor)
    }

    /// Statement to run for "run current statement".
    pub fn current_statement(&self) -> Option<Statement> {
        locate_statement(self.text, self.cursor)
    }

    /// Statements to run for "run all".
    pub fn statements(&self) -> Vec<Statement> {
        split_statements(self.text)
    }
}
