use compact_str::CompactString;
use indexmap::IndexSet;
use sqlparser::ast::{GroupByExpr, SelectItem, SetExpr};

use super::{
    ExtractionContext,
    expr::{
        collect_count_calls, collect_in_lists, collect_like_predicates, collect_literal_comparisons,
        contains_subquery, extract_columns_from_expr, extract_window_functions, has_function_wrapped_column,
        is_aggregate_call
    },
    table::extract_from_table_factor
};
use crate::query::types::AliasBinding;

pub fn extract_from_set_expr(set_expr: &SetExpr, ctx: &mut ExtractionContext<'_>) {
    match set_expr {
        SetExpr::Select(select) => {
            *ctx.has_distinct = select.distinct.is_some();

            let mut selected_idents = IndexSet::new();
            let mut has_non_aggregated = false;
            for item in &select.projection {
                match item {
                    SelectItem::Wildcard(_) | SelectItem::QualifiedWildcard(..) => {
                        *ctx.select_star = true;
                    }
                    SelectItem::UnnamedExpr(expr) => {
                        extract_window_functions(expr, ctx.window_funcs);
                        collect_count_calls(expr, ctx.count_calls);
                        if contains_subquery(expr) {
                            *ctx.has_subquery = true;
                        }
                        if is_aggregate_call(expr) {
                            *ctx.has_aggregate = true;
                        } else {
                            let mut cols = IndexSet::new();
                            extract_columns_from_expr(expr, &mut cols);
                            if !cols.is_empty() {
                                has_non_aggregated = true;
                                selected_idents.extend(cols);
                            }
                        }
                    }
                    SelectItem::ExprWithAlias {
                        expr,
                        alias
                    } => {
                        extract_window_functions(expr, ctx.window_funcs);
                        collect_count_calls(expr, ctx.count_calls);
                        if contains_subquery(expr) {
                            *ctx.has_subquery = true;
                        }
                        let mut cols = IndexSet::new();
                        extract_columns_from_expr(expr, &mut cols);
                        if let Some(underlying) = cols.iter().last() {
                            ctx.column_aliases.push(AliasBinding {
                                underlying: underlying.clone(),
                                alias:      alias.value.as_str().into()
                            });
                        }
                        if is_aggregate_call(expr) {
                            *ctx.has_aggregate = true;
                        } else if !cols.is_empty() {
                            has_non_aggregated = true;
                            selected_idents.extend(cols);
                        }
                    }
                }
            }

            for table in &select.from {
                extract_from_table_factor(&table.relation, ctx.tables, ctx.table_aliases);
                for join in &table.joins {
                    extract_from_table_factor(&join.relation, ctx.tables, ctx.table_aliases);
                    match &join.join_operator {
                        sqlparser::ast::JoinOperator::Inner(constraint)
                        | sqlparser::ast::JoinOperator::LeftOuter(constraint)
                        | sqlparser::ast::JoinOperator::RightOuter(constraint)
                        | sqlparser::ast::JoinOperator::FullOuter(constraint) => {
                            if let sqlparser::ast::JoinConstraint::On(expr) = constraint {
                                extract_columns_from_expr(expr, ctx.join_cols);
                            }
                        }
                        _ => {}
                    }
                }
            }

            if let Some(selection) = &select.selection {
                extract_columns_from_expr(selection, ctx.where_cols);
                collect_like_predicates(selection, ctx.like_predicates);
                collect_in_lists(selection, ctx.in_lists);
                collect_literal_comparisons(selection, ctx.literal_comparisons);
                if has_function_wrapped_column(selection) {
                    *ctx.function_on_where_column = true;
                }
                if contains_subquery(selection) {
                    *ctx.has_subquery = true;
                }
            }

            if let GroupByExpr::Expressions(exprs, _) = &select.group_by {
                if !exprs.is_empty() {
                    *ctx.has_group_by = true;
                }
                for expr in exprs {
                    extract_columns_from_expr(expr, ctx.group_cols);
                    if is_literal_or_ordinal(expr) {
                        *ctx.group_by_literal = true;
                    }
                }
            }

            if let Some(having) = &select.having {
                extract_columns_from_expr(having, ctx.having_cols);
                collect_literal_comparisons(having, ctx.literal_comparisons);
            }

            if has_non_aggregated && *ctx.has_group_by {
                let grouped: IndexSet<CompactString> = ctx.group_cols.iter().cloned().collect();
                if selected_idents.iter().any(|c| !grouped.contains(c)) {
                    *ctx.non_aggregated_unselected_col = true;
                }
            }
        }
        SetExpr::SetOperation {
            left,
            right,
            ..
        } => {
            *ctx.has_union = true;
            extract_from_set_expr(left, ctx);
            extract_from_set_expr(right, ctx);
        }
        SetExpr::Query(query) => {
            extract_from_set_expr(&query.body, ctx);
        }
        SetExpr::Values(_)
        | SetExpr::Insert(_)
        | SetExpr::Update(_)
        | SetExpr::Table(_)
        | SetExpr::Delete(_)
        | SetExpr::Merge(_) => {}
    }
}

fn is_literal_or_ordinal(expr: &sqlparser::ast::Expr) -> bool {
    use sqlparser::ast::{Expr, Value, ValueWithSpan};
    matches!(
        expr,
        Expr::Value(ValueWithSpan {
            value: Value::Number(..),
            ..
        })
    )
}
