//! Lenient, text-only SQL analysis for an interactive editor.
//!
//! This module groups the pieces the editor calls on every keystroke or run
//! action. None of them parse SQL; they classify text just well enough to
//! split statements and to drive autocompletion.
//!
//! Modules:
//! - `scanner`   : Escape-aware walk telling code apart from comments and strings.
//! - `statement` : Trimmed statement text paired with its byte span.
//! - `splitter`  : Cuts a buffer into statements on top-level `;`.
//! - `locator`   : Finds the single statement enclosing a cursor.
//! - `alias`     : `FROM` / `JOIN` table references and the alias map.
//! - `clause`    : Fixed-priority clause keyword detection.
//! - `context`   : Combines the above into an [`SqlContext`] for completion.
//!
//! Design Principles:
//! 1. Accept incomplete / syntactically invalid SQL; nothing here fails.
//! 2. Single forward (or backward) passes with explicit indices, no recursion.
//! 3. Results are owned values, independent of the input buffer.
//!
//! Example:
//! ```rust
//! use sqlsense::sql::prelude::*;
//!
//! assert_eq!(split("SELECT 1; SELECT 2"), vec!["SELECT 1", "SELECT 2"]);
//! assert_eq!(locate("SELECT 1; SELECT 2", 10).as_deref(), Some("SELECT 2"));
//!
//! let context = analyze("SELECT u. FROM users u", 9);
//! assert_eq!(context.kind, SqlContextType::AfterDot);
//! assert_eq!(context.qualified_table(), Some("users"));
//! ```

pub mod alias;
pub mod clause;
pub mod context;
pub mod locator;
pub mod scanner;
pub mod splitter;
pub mod statement;

#[cfg(test)]
mod properties_tests;

pub use alias::{AliasMap, TableReference, resolve_aliases, table_references};
pub use clause::Clause;
pub use context::{FunctionCall, SqlContext, SqlContextType, analyze, function_call};
pub use locator::{locate, locate_statement};
pub use scanner::{Lexeme, LexemeKind, Scanner, strip_comments};
pub use splitter::{split, split_statements};
pub use statement::Statement;

/// Convenience prelude re‑exporting the most commonly used items.
///
/// Import with:
/// `use sqlsense::sql::prelude::*;`
pub mod prelude {
    pub use super::{
        AliasMap, Clause, SqlContext, SqlContextType, Statement, TableReference, analyze, locate,
        locate_statement, resolve_aliases, split, split_statements,
    };
}
