use crate::sql::{scanner::Scanner, statement::Statement};
use crate::*;

/// Split an editor buffer into its top-level statements.
///
/// Behavior:
/// - A `;` in plain code ends the current statement; `;` inside comments or
///   quoted strings is ordinary text.
/// - Each statement is trimmed; blank segments (`;;`, trailing `;`, a buffer
///   of whitespace) produce nothing.
/// - Comments and unterminated strings stay part of the statement they
///   appear in.
///
/// Complexity: O(n).
pub fn split_statements(text: &str) -> Vec<Statement> {
    split_statements_with(text, config())
}

pub(crate) fn split_statements_with(text: &str, config: &Config) -> Vec<Statement> {
    let mut out = Vec::new();
    let mut start = 0;

    for lexeme in Scanner::new(text) {
        if lexeme.is_code(';') {
            out.extend(Statement::from_segment(text, start, lexeme.start));
            start = lexeme.end;
        }
    }
    out.extend(Statement::from_segment(text, start, text.len()));

    if config.trace_scans {
        trace!(
            "Split {} bytes into {} statement(s)",
            text.len(),
            out.len()
        );
    }
    out
}

/// Text-only form of [`split_statements`], what "run all" hands to the
/// executor.
pub fn split(text: &str) -> Vec<String> {
    split_statements(text)
        .into_iter()
        .map(Statement::into_text)
        .collect()
}
