use compact_str::CompactString;
use indexmap::IndexSet;
use sqlparser::ast::TableFactor;

use super::{ExtractionContext, set_expr::extract_from_set_expr};
use crate::query::types::AliasBinding;

pub fn extract_from_table_factor(
    table_factor: &TableFactor,
    tables: &mut IndexSet<CompactString>,
    aliases: &mut Vec<AliasBinding>
) {
    match table_factor {
        TableFactor::Table {
            name,
            alias,
            ..
        } => {
            let table_name: CompactString = name.to_string().into();
            tables.insert(table_name.clone());
            if let Some(alias) = alias {
                aliases.push(AliasBinding {
                    underlying: table_name,
                    alias:      alias.name.value.as_str().into()
                });
            }
        }
        TableFactor::Derived {
            subquery,
            alias,
            ..
        } => {
            if let Some(alias) = alias {
                tables.insert(format!("(subquery) AS {}", alias.name.value).into());
            }
            let mut sub_where = IndexSet::new();
            let mut sub_join = IndexSet::new();
            let mut sub_group = IndexSet::new();
            let mut sub_having = IndexSet::new();
            let mut sub_windows = Vec::new();
            let mut sub_column_aliases = Vec::new();
            let mut sub_like = Vec::new();
            let mut sub_in_lists = Vec::new();
            let mut sub_counts = Vec::new();
            let mut sub_literal_cmp = Vec::new();
            let (
                mut has_union,
                mut has_distinct,
                mut has_subquery,
                mut select_star,
                mut function_on_where_column,
                mut has_group_by,
                mut has_aggregate,
                mut non_aggregated_unselected_col,
                mut group_by_literal
            ) = (false, false, false, false, false, false, false, false, false);
            let mut ctx = ExtractionContext {
                tables,
                table_aliases: aliases,
                column_aliases: &mut sub_column_aliases,
                where_cols: &mut sub_where,
                join_cols: &mut sub_join,
                group_cols: &mut sub_group,
                having_cols: &mut sub_having,
                window_funcs: &mut sub_windows,
                has_union: &mut has_union,
                has_distinct: &mut has_distinct,
                has_subquery: &mut has_subquery,
                select_star: &mut select_star,
                like_predicates: &mut sub_like,
                in_lists: &mut sub_in_lists,
                function_on_where_column: &mut function_on_where_column,
                count_calls: &mut sub_counts,
                has_group_by: &mut has_group_by,
                has_aggregate: &mut has_aggregate,
                non_aggregated_unselected_col: &mut non_aggregated_unselected_col,
                group_by_literal: &mut group_by_literal,
                literal_comparisons: &mut sub_literal_cmp
            };
            extract_from_set_expr(&subquery.body, &mut ctx);
        }
        TableFactor::TableFunction {
            ..
        } => {}
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => {
            extract_from_table_factor(&table_with_joins.relation, tables, aliases);
            for join in &table_with_joins.joins {
                extract_from_table_factor(&join.relation, tables, aliases);
            }
        }
        _ => {}
    }
}
