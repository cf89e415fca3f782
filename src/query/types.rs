use compact_str::CompactString;
use serde::Serialize;
use smallvec::SmallVec;
use sqlparser::ast::Statement;

use crate::parser::secondary::SecondaryStatement;

/// Small column-name vector (queries rarely touch more than a handful).
pub type ColumnVec = SmallVec<[CompactString; 8]>;

/// The statement family a query belongs to, independent of the parser that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub enum QueryKind {
    Select,
    Insert,
    Update,
    Delete,
    Truncate,
    Ddl,
    Other
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Truncate => "TRUNCATE",
            Self::Ddl => "DDL",
            Self::Other => "OTHER"
        };
        write!(f, "{s}")
    }
}

/// One table/column alias occurrence: the underlying name and the alias
/// text assigned to it.
#[derive(Debug, Clone, Serialize)]
pub struct AliasBinding {
    pub underlying: CompactString,
    pub alias:      CompactString
}

impl AliasBinding {
    pub fn is_same_name(&self) -> bool {
        self.underlying.eq_ignore_ascii_case(&self.alias)
    }
}

/// A window function call (`OVER (...)`) found in the projection list.
#[derive(Debug, Clone, Serialize)]
pub struct WindowFunction {
    pub name:           CompactString,
    pub partition_cols: Vec<CompactString>,
    pub order_cols:     Vec<CompactString>
}

/// A `LIKE`/`NOT LIKE` predicate and the literal pattern it was compared
/// against (when the pattern is a string literal rather than a bind
/// parameter or expression).
#[derive(Debug, Clone, Serialize)]
pub struct LikePredicate {
    pub pattern: String,
    pub negated: bool
}

impl LikePredicate {
    pub fn starts_with_wildcard(&self) -> bool {
        matches!(self.pattern.chars().next(), Some('%') | Some('_'))
    }

    pub fn has_wildcard(&self) -> bool {
        self.pattern.contains('%') || self.pattern.contains('_')
    }
}

/// An `IN (...)`/`NOT IN (...)` list and what kinds of items it contains.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InListShape {
    pub has_null:       bool,
    pub has_identifier: bool,
    pub item_count:     usize
}

/// A statically-evaluable literal comparison found in a WHERE/ON/HAVING
/// predicate, e.g. `1 = 1` or `1 = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LiteralComparison {
    AlwaysTrue,
    AlwaysFalse
}

/// The argument shape of a `COUNT(...)` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CountArgument {
    Star,
    Column,
    Constant
}

/// Structured facts extracted from a parsed statement, consulted by rule
/// bodies instead of re-walking the AST. Building one is the generalized
/// form of the AST-traversal helpers the teacher used directly in its
/// parser: here they populate a shape shared across every rule.
#[derive(Debug, Clone, Serialize, Default)]
pub struct QueryShape {
    pub kind: QueryKindOpt,

    pub tables:         Vec<CompactString>,
    pub table_aliases:  Vec<AliasBinding>,
    pub column_aliases: Vec<AliasBinding>,
    pub wildcard_alias: bool,
    pub cte_names:      Vec<CompactString>,

    pub where_present: bool,
    pub where_cols:    ColumnVec,
    pub join_cols:     ColumnVec,

    pub order_cols:       ColumnVec,
    pub order_by_literal: bool,
    pub group_cols:       ColumnVec,
    pub group_by_literal: bool,
    pub having_cols:      ColumnVec,

    pub window_funcs: Vec<WindowFunction>,
    pub limit:        Option<u64>,
    pub offset:       Option<u64>,
    pub has_union:     bool,
    pub has_distinct:  bool,
    pub has_subquery:  bool,
    pub select_star:   bool,

    pub like_predicates: Vec<LikePredicate>,
    pub in_lists:        Vec<InListShape>,

    pub function_on_where_column: bool,
    pub count_calls:              Vec<CountArgument>,
    pub cross_table_group_or_order: bool,

    pub has_group_by:                  bool,
    pub has_aggregate:                 bool,
    pub non_aggregated_unselected_col: bool,

    pub set_list_uses_and_separator: bool,
    pub literal_comparisons:         Vec<LiteralComparison>,

    pub insert_value_rows: Option<usize>
}

/// Newtype wrapper so `QueryKind` (which has no meaningful default) can
/// still back a `#[derive(Default)]` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryKindOpt(pub QueryKind);

impl Default for QueryKindOpt {
    fn default() -> Self {
        Self(QueryKind::Other)
    }
}

/// A fully parsed statement: the raw text, whichever trees the two
/// parsers produced, and the derived shape of the primary tree (when one
/// exists).
#[derive(Debug, Clone)]
pub struct ParsedQuery {
    pub text:            String,
    pub primary_tree:    Option<Statement>,
    pub shape:           Option<QueryShape>,
    pub secondary_trees: Vec<SecondaryStatement>,
    pub parse_error:     Option<String>
}

impl ParsedQuery {
    pub fn kind(&self) -> QueryKind {
        self.shape
            .as_ref()
            .map(|s| s.kind.0)
            .unwrap_or(QueryKind::Other)
    }

    pub fn has_primary(&self) -> bool {
        self.primary_tree.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_alias_is_case_insensitive() {
        let binding = AliasBinding {
            underlying: "Tbl".into(),
            alias:      "tbl".into()
        };
        assert!(binding.is_same_name());
    }

    #[test]
    fn like_predicate_detects_leading_wildcard() {
        let pred = LikePredicate {
            pattern: "%foo".into(),
            negated: false
        };
        assert!(pred.starts_with_wildcard());
        assert!(pred.has_wildcard());
    }

    #[test]
    fn like_predicate_without_wildcard() {
        let pred = LikePredicate {
            pattern: "foo".into(),
            negated: false
        };
        assert!(!pred.starts_with_wildcard());
        assert!(!pred.has_wildcard());
    }
}
