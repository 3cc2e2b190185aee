//! Table reference and alias extraction from `FROM` / `JOIN` clauses.
//!
//! This is a pattern scan over the raw buffer, not a parse: comments and
//! string literals are not skipped, and the whole buffer is scanned in one
//! pass regardless of how many statements it holds. A reference in one
//! statement is therefore visible while editing another.

use crate::*;
use itertools::Itertools;
use regex::Regex;
use std::{collections::HashMap, sync::LazyLock};

/// `FROM` or `JOIN` as a whole word followed by whitespace.
static CLAUSE_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:FROM|JOIN)\s+").expect("valid clause regex"));

/// `[db.]table [[AS] alias]`, anchored at the text right after the keyword.
/// Every identifier may be wrapped in backticks or double quotes.
static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)^(?:[`"]?(\w+)[`"]?\.)?[`"]?(\w+)[`"]?(?:\s+(?:AS\s+)?[`"]?(\w+)[`"]?)?"#,
    )
    .expect("valid reference regex")
});

/// Words that can follow a table name without being its alias.
pub const RESERVED_ALIASES: [&str; 22] = [
    "where", "and", "or", "on", "using", "group", "order", "having", "limit", "offset", "union",
    "left", "right", "inner", "outer", "cross", "full", "natural", "join", "select", "from",
    "as",
];

fn is_reserved(word: &str) -> bool {
    RESERVED_ALIASES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(word))
}

/// A `[database.]table [alias]` reference found after `FROM` or `JOIN`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableReference {
    pub database: Option<String>,
    pub table: String,
    pub alias: Option<String>,
}

impl TableReference {
    /// `db.table` when a database was given, else `table`.
    pub fn full_name(&self) -> String {
        match &self.database {
            Some(db) => format!("{db}.{}", self.table),
            None => self.table.clone(),
        }
    }

    /// Split a fully-qualified name back into its parts.
    fn from_full_name(full_name: &str, alias: Option<String>) -> Self {
        match full_name.split_once('.') {
            Some((db, table)) => Self {
                database: Some(db.to_string()),
                table: table.to_string(),
                alias,
            },
            None => Self {
                database: None,
                table: full_name.to_string(),
                alias,
            },
        }
    }
}

/// Lower-cased alias or table name mapped to its fully-qualified table name.
///
/// Keys are unique; when the same key is bound twice (self-joins, reused
/// aliases) the later binding wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_more::Deref)]
pub struct AliasMap(HashMap<String, String>);

impl AliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` (case-insensitively) to `full_name`.
    pub fn insert(&mut self, key: &str, full_name: impl Into<String>) {
        self.0.insert(key.to_lowercase(), full_name.into());
    }

    /// Look a qualifier up case-insensitively.
    pub fn resolve(&self, word: &str) -> Option<&str> {
        self.0.get(&word.to_lowercase()).map(String::as_str)
    }

    /// One reference per binding, ordered by table then alias.
    ///
    /// A binding whose key is just the table's own name carries no alias.
    pub fn tables(&self) -> Vec<TableReference> {
        self.0
            .iter()
            .map(|(key, full_name)| {
                let table = full_name.rsplit('.').next().unwrap_or(full_name);
                let alias = (!key.eq_ignore_ascii_case(table)).then(|| key.clone());
                TableReference::from_full_name(full_name, alias)
            })
            .sorted()
            .collect()
    }
}

impl From<HashMap<String, String>> for AliasMap {
    fn from(value: HashMap<String, String>) -> Self {
        value
            .into_iter()
            .fold(Self::new(), |mut map, (key, full_name)| {
                map.insert(&key, full_name);
                map
            })
    }
}

/// Every `FROM` / `JOIN` reference in `text`, in source order.
///
/// A trailing word that is a reserved keyword (`WHERE`, `ON`, `LEFT`...) is
/// not taken as an alias. The reference pattern is matched right after each
/// keyword without consuming the next keyword, so `FROM a JOIN b` yields both
/// tables.
pub fn table_references(text: &str) -> Vec<TableReference> {
    CLAUSE_KEYWORD
        .find_iter(text)
        .filter_map(|keyword| REFERENCE.captures(&text[keyword.end()..]))
        .filter_map(|caps| {
            let table = caps.get(2)?.as_str().to_string();
            Some(TableReference {
                database: caps.get(1).map(|m| m.as_str().to_string()),
                alias: caps
                    .get(3)
                    .map(|m| m.as_str())
                    .filter(|alias| !is_reserved(alias))
                    .map(str::to_string),
                table,
            })
        })
        .collect()
}

/// Build the alias map for `text`.
///
/// For each reference both the alias (if any) and the bare table name are
/// bound to the fully-qualified name, so `users.id` resolves without an alias.
pub fn resolve_aliases(text: &str) -> AliasMap {
    resolve_aliases_with(text, config())
}

pub(crate) fn resolve_aliases_with(text: &str, config: &Config) -> AliasMap {
    let mut aliases = AliasMap::new();
    for reference in table_references(text) {
        let full_name = reference.full_name();
        if let Some(alias) = &reference.alias {
            aliases.insert(alias, full_name.clone());
        }
        aliases.insert(&reference.table, full_name);
    }

    if config.trace_scans {
        trace!("Resolved {} alias binding(s)", aliases.len());
    }
    aliases
}
