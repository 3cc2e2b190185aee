//! Clause keywords used to classify where the cursor sits.
//!
//! Detection is a fixed-priority substring search, not a positional one: the
//! first clause in [`Clause::PRIORITY`] whose keyword appears anywhere before
//! the cursor wins, even if a lower-priority keyword occurs closer to it.
//! `SELECT a FROM t WHERE x IN (SELECT ` therefore still reports `WHERE`.
//!
//! The search is case-insensitive and blind to comments and string literals,
//! and it matches substrings (`ON` is found inside `JSON`). Call sites rely on
//! this ordering, so it is kept as is.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
pub enum Clause {
    #[display("LIMIT")]
    Limit,
    #[display("OFFSET")]
    Offset,
    #[display("HAVING")]
    Having,
    #[display("ORDER BY")]
    OrderBy,
    #[display("GROUP BY")]
    GroupBy,
    #[display("WHERE")]
    Where,
    #[display("PREWHERE")]
    Prewhere,
    #[display("ON")]
    On,
    #[display("JOIN")]
    Join,
    #[display("LEFT JOIN")]
    LeftJoin,
    #[display("RIGHT JOIN")]
    RightJoin,
    #[display("INNER JOIN")]
    InnerJoin,
    #[display("CROSS JOIN")]
    CrossJoin,
    #[display("ARRAY JOIN")]
    ArrayJoin,
    #[display("FROM")]
    From,
    #[display("INTO")]
    Into,
    #[default]
    #[display("SELECT")]
    Select,
}

impl Clause {
    /// Detection order, highest priority first.
    pub const PRIORITY: [Self; 17] = [
        Clause::Limit,
        Clause::Offset,
        Clause::Having,
        Clause::OrderBy,
        Clause::GroupBy,
        Clause::Where,
        Clause::Prewhere,
        Clause::On,
        Clause::Join,
        Clause::LeftJoin,
        Clause::RightJoin,
        Clause::InnerJoin,
        Clause::CrossJoin,
        Clause::ArrayJoin,
        Clause::From,
        Clause::Into,
        Clause::Select,
    ];

    /// Upper-case keyword text, as searched for in the buffer.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::Having => "HAVING",
            Self::OrderBy => "ORDER BY",
            Self::GroupBy => "GROUP BY",
            Self::Where => "WHERE",
            Self::Prewhere => "PREWHERE",
            Self::On => "ON",
            Self::Join => "JOIN",
            Self::LeftJoin => "LEFT JOIN",
            Self::RightJoin => "RIGHT JOIN",
            Self::InnerJoin => "INNER JOIN",
            Self::CrossJoin => "CROSS JOIN",
            Self::ArrayJoin => "ARRAY JOIN",
            Self::From => "FROM",
            Self::Into => "INTO",
            Self::Select => "SELECT",
        }
    }

    pub const fn is_join(self) -> bool {
        matches!(
            self,
            Clause::Join
                | Clause::LeftJoin
                | Clause::RightJoin
                | Clause::InnerJoin
                | Clause::CrossJoin
                | Clause::ArrayJoin
        )
    }

    /// The clause governing the end of `before`, `Select` when none appears.
    pub fn detect(before: &str) -> Self {
        let upper = before.to_uppercase();
        Self::PRIORITY
            .into_iter()
            .find(|clause| upper.contains(clause.as_str()))
            .unwrap_or_default()
    }
}
