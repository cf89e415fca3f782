//! Builds a [`QueryShape`] from a primary-parser AST, generalizing the
//! recursive AST walkers in `query::extract` into the structured facts
//! rule bodies consult.

pub mod extract;
pub mod types;

use compact_str::CompactString;
use extract::{
    collect_table_qualifiers, extract_columns_from_expr, extract_from_set_expr, ExtractionContext
};
use indexmap::IndexSet;
use regex::Regex;
use sqlparser::ast::{Expr, LimitClause, OrderByKind, Statement, Value, ValueWithSpan};
pub use types::{AliasBinding, ParsedQuery, QueryKind, QueryShape};

use crate::query::types::QueryKindOpt;

static WILDCARD_ALIAS_RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();

/// Clause keywords that can legitimately follow a bare `*` with no real
/// alias in between (`SELECT * FROM t`); the regex can't tell these
/// apart from an implicit alias without lookahead, so callers filter the
/// captured word against this list instead.
const WILDCARD_ALIAS_STOPWORDS: &[&str] = &["from", "where", "group", "order", "having", "limit", "union"];

fn wildcard_alias_pattern() -> &'static Regex {
    WILDCARD_ALIAS_RE.get_or_init(|| {
        Regex::new(r"(?i)\*\s*(?:AS\s+)?(?P<alias>[A-Za-z_][A-Za-z0-9_]*)").expect("valid regex")
    })
}

fn has_wildcard_alias(raw: &str) -> bool {
    wildcard_alias_pattern().captures_iter(raw).any(|caps| {
        let alias = caps.name("alias").expect("named group always present on match").as_str();
        !WILDCARD_ALIAS_STOPWORDS.contains(&alias.to_lowercase().as_str())
    })
}

/// Builds the structured shape of a single parsed statement. Returns
/// `None` for statement kinds the catalog has no rule interest in
/// (DDL utility statements, `SET`, etc. still get a minimal shape so
/// table-less rules keep working).
pub fn shape_of(raw: &str, stmt: &Statement) -> QueryShape {
    match stmt {
        Statement::Query(query) => shape_of_select(raw, query),
        Statement::Insert(insert) => shape_of_insert(raw, insert),
        Statement::Update {
            table,
            assignments,
            selection,
            ..
        } => shape_of_update(raw, table, assignments, selection.as_ref()),
        Statement::Delete(delete) => shape_of_delete(raw, delete),
        Statement::Truncate {
            table_names,
            ..
        } => {
            let mut shape = QueryShape {
                kind: QueryKindOpt(QueryKind::Truncate),
                ..Default::default()
            };
            shape.tables = table_names.iter().map(|t| t.name.to_string().into()).collect();
            shape
        }
        Statement::CreateTable { .. }
        | Statement::AlterTable { .. }
        | Statement::Drop { .. } => QueryShape {
            kind: QueryKindOpt(QueryKind::Ddl),
            ..Default::default()
        },
        _ => QueryShape::default()
    }
}

fn shape_of_select(raw: &str, query: &sqlparser::ast::Query) -> QueryShape {
    let mut shape = QueryShape {
        kind: QueryKindOpt(QueryKind::Select),
        ..Default::default()
    };

    for cte in query.with.iter().flat_map(|w| &w.cte_tables) {
        shape.cte_names.push(cte.alias.name.value.as_str().into());
    }

    if let Some(limit_clause) = &query.limit_clause {
        match limit_clause {
            LimitClause::LimitOffset {
                limit,
                offset,
                ..
            } => {
                if let Some(n) = limit.as_ref().and_then(number_of) {
                    shape.limit = Some(n);
                }
                if let Some(offset_expr) = offset
                    && let Some(n) = number_of(&offset_expr.value)
                {
                    shape.offset = Some(n);
                }
            }
            LimitClause::OffsetCommaLimit {
                offset,
                limit,
                ..
            } => {
                if let Some(n) = number_of(limit) {
                    shape.limit = Some(n);
                }
                if let Some(n) = number_of(offset) {
                    shape.offset = Some(n);
                }
            }
        }
    }

    let mut order_qualifiers = IndexSet::new();
    if let Some(order_by) = &query.order_by
        && let OrderByKind::Expressions(exprs) = &order_by.kind
    {
        let mut cols = IndexSet::new();
        for expr in exprs {
            extract_columns_from_expr(&expr.expr, &mut cols);
            collect_table_qualifiers(&expr.expr, &mut order_qualifiers);
            if is_number_literal(&expr.expr) {
                shape.order_by_literal = true;
            }
        }
        shape.order_cols = cols.into_iter().collect();
    }

    let mut tables = IndexSet::new();
    let mut where_cols = IndexSet::new();
    let mut join_cols = IndexSet::new();
    let mut group_cols = IndexSet::new();
    let mut having_cols = IndexSet::new();
    let mut ctx = ExtractionContext {
        tables:          &mut tables,
        table_aliases:   &mut shape.table_aliases,
        column_aliases:  &mut shape.column_aliases,
        where_cols:      &mut where_cols,
        join_cols:       &mut join_cols,
        group_cols:      &mut group_cols,
        having_cols:     &mut having_cols,
        window_funcs:    &mut shape.window_funcs,
        has_union:       &mut shape.has_union,
        has_distinct:    &mut shape.has_distinct,
        has_subquery:    &mut shape.has_subquery,
        select_star:     &mut shape.select_star,
        like_predicates: &mut shape.like_predicates,
        in_lists:        &mut shape.in_lists,
        function_on_where_column: &mut shape.function_on_where_column,
        count_calls:              &mut shape.count_calls,
        has_group_by:             &mut shape.has_group_by,
        has_aggregate:            &mut shape.has_aggregate,
        non_aggregated_unselected_col: &mut shape.non_aggregated_unselected_col,
        group_by_literal:              &mut shape.group_by_literal,
        literal_comparisons:           &mut shape.literal_comparisons
    };
    extract_from_set_expr(&query.body, &mut ctx);

    shape.tables = tables.into_iter().collect();
    shape.where_present = !where_cols.is_empty() || !shape.literal_comparisons.is_empty();
    shape.where_cols = where_cols.into_iter().collect();
    shape.join_cols = join_cols.into_iter().collect();
    shape.group_cols = group_cols.into_iter().collect();
    shape.having_cols = having_cols.into_iter().collect();

    // Cross-table check needs qualifiers from the raw group-by expressions,
    // which the context above discarded down to bare column names; re-walk
    // the select list's group-by expressions directly.
    let mut group_qualifiers = IndexSet::new();
    if let sqlparser::ast::SetExpr::Select(select) = query.body.as_ref()
        && let sqlparser::ast::GroupByExpr::Expressions(exprs, _) = &select.group_by
    {
        for expr in exprs {
            collect_table_qualifiers(expr, &mut group_qualifiers);
        }
    }
    let mut all_qualifiers = group_qualifiers;
    all_qualifiers.extend(order_qualifiers);
    shape.cross_table_group_or_order = all_qualifiers.len() > 1;

    if has_wildcard_alias(raw) {
        shape.wildcard_alias = true;
    }

    shape
}

fn shape_of_insert(_raw: &str, insert: &sqlparser::ast::Insert) -> QueryShape {
    let mut shape = QueryShape {
        kind: QueryKindOpt(QueryKind::Insert),
        ..Default::default()
    };
    shape.tables.push(insert.table.to_string().into());
    if let Some(source) = &insert.source
        && let sqlparser::ast::SetExpr::Values(values) = source.body.as_ref()
    {
        shape.insert_value_rows = Some(values.rows.len());
    }
    shape
}

fn shape_of_update(
    _raw: &str,
    table: &sqlparser::ast::TableWithJoins,
    assignments: &[sqlparser::ast::Assignment],
    selection: Option<&Expr>
) -> QueryShape {
    let mut shape = QueryShape {
        kind: QueryKindOpt(QueryKind::Update),
        ..Default::default()
    };
    shape.tables.push(table.relation.to_string().into());
    if let Some(sel) = selection {
        let mut cols = IndexSet::new();
        extract_columns_from_expr(sel, &mut cols);
        shape.where_cols = cols.into_iter().collect();
        shape.where_present = true;
    }
    shape.set_list_uses_and_separator = assignments.len() >= 2
        && assignments.iter().any(|a| matches!(&a.value, Expr::BinaryOp { op: sqlparser::ast::BinaryOperator::And, .. }));
    shape
}

fn shape_of_delete(_raw: &str, delete: &sqlparser::ast::Delete) -> QueryShape {
    let mut shape = QueryShape {
        kind: QueryKindOpt(QueryKind::Delete),
        ..Default::default()
    };
    if let Some(sel) = &delete.selection {
        let mut cols = IndexSet::new();
        extract_columns_from_expr(sel, &mut cols);
        shape.where_cols = cols.into_iter().collect();
        shape.where_present = true;
    }
    if let sqlparser::ast::FromTable::WithFromKeyword(items) | sqlparser::ast::FromTable::WithoutKeyword(items) =
        &delete.from
    {
        for item in items {
            shape.tables.push(item.relation.to_string().into());
        }
    }
    shape
}

fn number_of(expr: &Expr) -> Option<u64> {
    if let Expr::Value(ValueWithSpan {
        value: Value::Number(n, _),
        ..
    }) = expr
    {
        n.parse().ok()
    } else {
        None
    }
}

fn is_number_literal(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Value(ValueWithSpan {
            value: Value::Number(..),
            ..
        })
    )
}

#[cfg(test)]
mod tests {
    use sqlparser::{dialect::GenericDialect, parser::Parser};

    use super::*;

    fn shape(sql: &str) -> QueryShape {
        let stmts = Parser::parse_sql(&GenericDialect {}, sql).expect("parses");
        shape_of(sql, &stmts[0])
    }

    #[test]
    fn select_without_where_has_no_where_present() {
        let s = shape("SELECT id FROM tbl");
        assert!(!s.where_present);
        assert_eq!(s.kind.0, QueryKind::Select);
    }

    #[test]
    fn select_with_implicit_alias_is_captured_as_alias_binding() {
        let s = shape("SELECT name FROM tbl t1 WHERE id < 1000");
        assert_eq!(s.table_aliases.len(), 1);
        assert_eq!(s.table_aliases[0].underlying.as_str(), "tbl");
        assert_eq!(s.table_aliases[0].alias.as_str(), "t1");
    }

    #[test]
    fn update_without_where_has_no_where_present() {
        let s = shape("UPDATE tbl SET col = 1");
        assert_eq!(s.kind.0, QueryKind::Update);
        assert!(!s.where_present);
    }

    #[test]
    fn insert_multi_row_counts_rows() {
        let s = shape("INSERT INTO tb (a) VALUES (1), (2)");
        assert_eq!(s.insert_value_rows, Some(2));
    }

    #[test]
    fn delete_without_where_has_no_where_present() {
        let s = shape("DELETE FROM tbl");
        assert_eq!(s.kind.0, QueryKind::Delete);
        assert!(!s.where_present);
    }

    #[test]
    fn select_star_flag_set() {
        let s = shape("SELECT * FROM film");
        assert!(s.select_star);
    }

    #[test]
    fn wildcard_alias_fires_without_a_trailing_comma() {
        let s = shape("SELECT o.* AS summary FROM orders o");
        assert!(s.wildcard_alias);
    }

    #[test]
    fn wildcard_alias_fires_on_implicit_form_without_trailing_comma() {
        let s = shape("SELECT o.* summary FROM orders o");
        assert!(s.wildcard_alias);
    }

    #[test]
    fn plain_select_star_has_no_wildcard_alias() {
        let s = shape("SELECT * FROM orders o");
        assert!(!s.wildcard_alias);
    }
}
