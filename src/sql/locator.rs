use crate::sql::{scanner::Scanner, statement::Statement};
use crate::*;

/// Find the statement enclosing `cursor` (a byte offset into `text`).
///
/// Walks the buffer with the same escape-aware scan as [`split_statements`]
/// and stops at the first terminator at or after the cursor. The terminator
/// itself belongs to the statement it closes, so a cursor sitting on `;`
/// selects the statement to its left.
///
/// Returns `None` when the cursor's segment is blank (between `;;`, after a
/// trailing `;`, in an empty buffer).
///
/// [`split_statements`]: crate::sql::splitter::split_statements
pub fn locate_statement(text: &str, cursor: usize) -> Option<Statement> {
    locate_statement_with(text, cursor, config())
}

pub(crate) fn locate_statement_with(
    text: &str,
    cursor: usize,
    config: &Config,
) -> Option<Statement> {
    let mut start = 0;

    for lexeme in Scanner::new(text) {
        if !lexeme.is_code(';') {
            continue;
        }
        if (start..=lexeme.start).contains(&cursor) {
            let found = Statement::from_segment(text, start, lexeme.start);
            trace_located(config, cursor, found.as_ref());
            return found;
        }
        start = lexeme.end;
    }

    // Offsets past the end still belong to the trailing segment.
    let found = (cursor >= start)
        .then(|| Statement::from_segment(text, start, text.len()))
        .flatten();
    trace_located(config, cursor, found.as_ref());
    found
}

/// Text-only form of [`locate_statement`], what "run current statement"
/// hands to the executor.
pub fn locate(text: &str, cursor: usize) -> Option<String> {
    locate_statement(text, cursor).map(Statement::into_text)
}

fn trace_located(config: &Config, cursor: usize, found: Option<&Statement>) {
    if config.trace_scans {
        trace!(
            "Cursor {cursor} located in statement span {:?}",
            found.map(Statement::span)
        );
    }
}
