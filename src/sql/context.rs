use crate::sql::{
    alias::{AliasMap, TableReference, resolve_aliases_with},
    clause::Clause,
};
use crate::*;

/// What the autocomplete layer should offer at the cursor.
///
/// Exactly one variant holds per call. `preceding_word` on [`SqlContext`] is
/// only meaningful for `AfterDot`, `function_name` only for `InFunction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
pub enum SqlContextType {
    #[default]
    Default,
    AfterSelect,
    AfterFrom,
    AfterJoin,
    AfterWhere,
    AfterGroupBy,
    AfterOrderBy,
    AfterDot,
    InFunction,
    AfterDatabaseKeyword,
}

impl From<Clause> for SqlContextType {
    fn from(clause: Clause) -> Self {
        match clause {
            Clause::Select => Self::AfterSelect,
            Clause::From | Clause::Into => Self::AfterFrom,
            c if c.is_join() => Self::AfterJoin,
            Clause::Where | Clause::Prewhere | Clause::On | Clause::Having => Self::AfterWhere,
            Clause::GroupBy => Self::AfterGroupBy,
            Clause::OrderBy => Self::AfterOrderBy,
            _ => Self::Default,
        }
    }
}

/// Structural context of a cursor position, consumed by the suggestion
/// builder together with schema metadata fetched elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlContext {
    pub kind: SqlContextType,
    /// Tables bound anywhere in the buffer, one per alias binding.
    pub tables: Vec<TableReference>,
    pub aliases: AliasMap,
    pub current_clause: Clause,
    /// Identifier before the trailing dot (`AfterDot`).
    pub preceding_word: Option<String>,
    /// Lower-cased name of the enclosing call (`InFunction`).
    pub function_name: Option<String>,
}

impl SqlContext {
    /// Resolve a qualifier (alias or table name) to its fully-qualified table.
    pub fn resolve(&self, word: &str) -> Option<&str> {
        self.aliases.resolve(word)
    }

    /// For `AfterDot`, the table the dotted qualifier refers to, if bound.
    pub fn qualified_table(&self) -> Option<&str> {
        self.preceding_word
            .as_deref()
            .and_then(|word| self.resolve(word))
    }
}

/// An unclosed function call enclosing the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    /// Lower-cased function name.
    pub name: String,
    /// Zero-based argument position: commas seen at the call's own depth.
    pub parameter_index: usize,
}

/// Words after which a table name is expected.
const TABLE_KEYWORDS: [&str; 5] = ["from", "join", "into", "table", "update"];
/// Words after which a database name is expected.
const DATABASE_KEYWORDS: [&str; 2] = ["use", "database"];

/// Classify the cursor position `cursor` (a byte offset) within `text`.
///
/// Steps, first match wins:
/// 1. `identifier.` right before the cursor gives `AfterDot`.
/// 2. An unclosed `name(` gives `InFunction`.
/// 3. A word before the last one in `{from, join, into, table, update}`
///    gives `AfterFrom`; in `{use, database}` gives `AfterDatabaseKeyword`.
/// 4. Otherwise the kind follows the detected [`Clause`].
///
/// Aliases come from the whole buffer, not just the text before the cursor.
/// Never fails; unrecognised input yields `Default` or `AfterSelect`.
pub fn analyze(text: &str, cursor: usize) -> SqlContext {
    analyze_with(text, cursor, config())
}

pub(crate) fn analyze_with(text: &str, cursor: usize, config: &Config) -> SqlContext {
    let before = &text[..clamp_offset(text, cursor)];
    let aliases = resolve_aliases_with(text, config);
    let mut context = SqlContext {
        tables: aliases.tables(),
        aliases,
        current_clause: Clause::detect(before),
        ..SqlContext::default()
    };

    if let Some(word) = dot_qualifier(before) {
        context.kind = SqlContextType::AfterDot;
        context.preceding_word = Some(word.to_string());
    } else if let Some(call) = function_call(before) {
        context.kind = SqlContextType::InFunction;
        context.function_name = Some(call.name);
    } else {
        context.kind = keyword_before_last_word(before)
            .unwrap_or_else(|| SqlContextType::from(context.current_clause));
    }

    if config.trace_scans {
        trace!(
            "Cursor {cursor}: {} in clause {} with {} alias binding(s)",
            context.kind,
            context.current_clause,
            context.aliases.len()
        );
    }
    context
}

/// Find the innermost unclosed call in `before`.
///
/// Scans backward counting parentheses; the first `(` reached at depth zero
/// is the open call. Its name is the identifier right before it, ignoring
/// whitespace. A bare `(` with no identifier in front is not a call.
pub fn function_call(before: &str) -> Option<FunctionCall> {
    let bytes = before.as_bytes();
    let mut depth = 0usize;
    let mut commas = 0;

    for i in (0..bytes.len()).rev() {
        match bytes[i] {
            b')' => depth += 1,
            b'(' if depth == 0 => {
                let name = trailing_identifier(&before[..i]);
                return (!name.is_empty()).then(|| FunctionCall {
                    name: name.to_lowercase(),
                    parameter_index: commas,
                });
            }
            b'(' => depth -= 1,
            b',' if depth == 0 => commas += 1,
            _ => {}
        }
    }
    None
}

/// The identifier before a trailing `.` in `before`, if any.
fn dot_qualifier(before: &str) -> Option<&str> {
    let qualifier = before.trim_end().strip_suffix('.')?;
    let word = trailing_identifier(qualifier);
    (!word.is_empty()).then_some(word)
}

fn keyword_before_last_word(before: &str) -> Option<SqlContextType> {
    let words: Vec<&str> = before.split_whitespace().collect();
    let prev = words.len().checked_sub(2).map(|i| words[i].to_lowercase())?;
    if TABLE_KEYWORDS.contains(&prev.as_str()) {
        Some(SqlContextType::AfterFrom)
    } else if DATABASE_KEYWORDS.contains(&prev.as_str()) {
        Some(SqlContextType::AfterDatabaseKeyword)
    } else {
        None
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// The `[A-Za-z0-9_]+` run ending `text`, after trailing whitespace.
fn trailing_identifier(text: &str) -> &str {
    let trimmed = text.trim_end();
    let start = trimmed
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_identifier_char(c))
        .last()
        .map_or(trimmed.len(), |(i, _)| i);
    &trimmed[start..]
}

/// Clamp `offset` into `text` and floor it to a character boundary.
pub(crate) fn clamp_offset(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at_end(text: &str) -> SqlContext {
        analyze(text, text.len())
    }

    #[rstest]
    #[case("", SqlContextType::AfterSelect)]
    #[case("SELECT ", SqlContextType::AfterSelect)]
    #[case("SELECT id, ", SqlContextType::AfterSelect)]
    #[case("SELECT * FROM ", SqlContextType::AfterFrom)]
    #[case("SELECT * FROM us", SqlContextType::AfterFrom)]
    #[case("SELECT * FROM users WHERE ", SqlContextType::AfterWhere)]
    #[case("SELECT * FROM users u JOIN ", SqlContextType::AfterJoin)]
    #[case("SELECT * FROM a JOIN b ON ", SqlContextType::AfterWhere)]
    #[case("SELECT * FROM t GROUP BY ", SqlContextType::AfterGroupBy)]
    #[case("SELECT * FROM t ORDER BY ", SqlContextType::AfterOrderBy)]
    #[case("SELECT * FROM t GROUP BY a HAVING ", SqlContextType::AfterWhere)]
    #[case("SELECT * FROM t LIMIT ", SqlContextType::Default)]
    #[case("INSERT INTO ", SqlContextType::AfterFrom)]
    #[case("UPDATE ", SqlContextType::AfterSelect)]
    #[case("UPDATE acc", SqlContextType::AfterFrom)]
    #[case("TRUNCATE TABLE lo", SqlContextType::AfterFrom)]
    #[case("USE mydb", SqlContextType::AfterDatabaseKeyword)]
    #[case("SHOW TABLES FROM DATABASE x", SqlContextType::AfterDatabaseKeyword)]
    fn kinds(#[case] text: &str, #[case] expected: SqlContextType) {
        crate::testing::common_init();
        assert_eq!(at_end(text).kind, expected, "for {text:?}");
    }

    #[rstest]
    #[case("SELECT users.", "users")]
    #[case("SELECT u . ", "u")]
    #[case("SELECT a, db.", "db")]
    #[case("SELECT * FROM t WHERE t.", "t")]
    #[case("SELECT count(u.", "u")]
    fn dot_access(#[case] text: &str, #[case] word: &str) {
        let context = at_end(text);
        assert_eq!(context.kind, SqlContextType::AfterDot);
        assert_eq!(context.preceding_word.as_deref(), Some(word));
        assert_eq!(context.function_name, None);
    }

    #[test]
    fn dot_without_identifier_falls_through() {
        assert_eq!(at_end("SELECT 'x' .").kind, SqlContextType::AfterSelect);
        assert_eq!(at_end(".").kind, SqlContextType::AfterSelect);
    }

    #[rstest]
    #[case("SELECT count(", "count")]
    #[case("SELECT COUNT (", "count")]
    #[case("SELECT sum(a + max(b), ", "sum")]
    #[case("SELECT f(g(x), h(", "h")]
    #[case("SELECT * FROM t WHERE lower(name", "lower")]
    fn in_function(#[case] text: &str, #[case] name: &str) {
        let context = at_end(text);
        assert_eq!(context.kind, SqlContextType::InFunction);
        assert_eq!(context.function_name.as_deref(), Some(name));
        assert_eq!(context.preceding_word, None);
    }

    #[test]
    fn closed_calls_are_not_function_context() {
        assert_eq!(at_end("SELECT count(*) ").kind, SqlContextType::AfterSelect);
        assert_eq!(
            at_end("SELECT * FROM t WHERE (a = 1) AND ").kind,
            SqlContextType::AfterWhere
        );
    }

    #[rstest]
    #[case("count(", Some(("count", 0)))]
    #[case("substr(name, 1, ", Some(("substr", 2)))]
    #[case("if(a, f(b, c), ", Some(("if", 2)))]
    #[case("x IN (", Some(("in", 0)))]
    #[case("(", None)]
    #[case("f(x)", None)]
    #[case("", None)]
    fn function_calls(#[case] before: &str, #[case] expected: Option<(&str, usize)>) {
        let found = function_call(before);
        assert_eq!(
            found.as_ref().map(|c| (c.name.as_str(), c.parameter_index)),
            expected
        );
    }

    #[test]
    fn aliases_use_the_whole_buffer() {
        let text = "SELECT o. FROM orders o JOIN db.items AS i ON o.id = i.order_id";
        let context = analyze(text, 9);
        assert_eq!(context.kind, SqlContextType::AfterDot);
        assert_eq!(context.preceding_word.as_deref(), Some("o"));
        assert_eq!(context.qualified_table(), Some("orders"));
        assert_eq!(context.resolve("I"), Some("db.items"));
        assert_eq!(context.current_clause, Clause::Select);
        assert!(context.tables.iter().any(|t| {
            t.database.as_deref() == Some("db") && t.table == "items" && t.alias.as_deref() == Some("i")
        }));
    }

    #[test]
    fn current_clause_is_reported_alongside_kind() {
        let context = at_end("SELECT a FROM t WHERE b = 1 UNION SELECT ");
        assert_eq!(context.current_clause, Clause::Where);
        assert_eq!(context.kind, SqlContextType::AfterWhere);
    }

    #[rstest]
    #[case("SELECT 1", 500)]
    #[case("SELECT 'é'", 9)]
    #[case("", 3)]
    fn out_of_range_cursor_is_clamped(#[case] text: &str, #[case] cursor: usize) {
        let context = analyze(text, cursor);
        assert_eq!(context.kind, SqlContextType::AfterSelect);
    }

    #[test]
    fn clamp_offset_floors_to_boundary() {
        assert_eq!(clamp_offset("é", 1), 0);
        assert_eq!(clamp_offset("aé", 10), 3);
        assert_eq!(clamp_offset("abc", 2), 2);
    }

    #[test]
    fn context_type_from_clause() {
        assert_eq!(SqlContextType::from(Clause::CrossJoin), SqlContextType::AfterJoin);
        assert_eq!(SqlContextType::from(Clause::Prewhere), SqlContextType::AfterWhere);
        assert_eq!(SqlContextType::from(Clause::Offset), SqlContextType::Default);
        assert_eq!(SqlContextType::from(Clause::Into), SqlContextType::AfterFrom);
    }
}
