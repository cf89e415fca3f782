mod expr;
mod set_expr;
mod table;

use compact_str::CompactString;
pub use expr::{
    collect_count_calls, collect_in_lists, collect_like_predicates, collect_literal_comparisons,
    collect_table_qualifiers, contains_subquery, extract_columns_from_expr, extract_window_functions,
    has_function_wrapped_column, is_aggregate_call
};
use indexmap::IndexSet;
pub use set_expr::extract_from_set_expr;

use super::types::{AliasBinding, CountArgument, InListShape, LikePredicate, LiteralComparison, WindowFunction};

/// Accumulator threaded through the AST walk. Each field mirrors a
/// [`crate::query::types::QueryShape`] field it ultimately populates.
pub struct ExtractionContext<'a> {
    pub tables:          &'a mut IndexSet<CompactString>,
    pub table_aliases:   &'a mut Vec<AliasBinding>,
    pub column_aliases:  &'a mut Vec<AliasBinding>,
    pub where_cols:      &'a mut IndexSet<CompactString>,
    pub join_cols:       &'a mut IndexSet<CompactString>,
    pub group_cols:      &'a mut IndexSet<CompactString>,
    pub having_cols:     &'a mut IndexSet<CompactString>,
    pub window_funcs:    &'a mut Vec<WindowFunction>,
    pub has_union:       &'a mut bool,
    pub has_distinct:    &'a mut bool,
    pub has_subquery:    &'a mut bool,
    pub select_star:     &'a mut bool,
    pub like_predicates: &'a mut Vec<LikePredicate>,
    pub in_lists:        &'a mut Vec<InListShape>,
    pub function_on_where_column: &'a mut bool,
    pub count_calls:              &'a mut Vec<CountArgument>,
    pub has_group_by:             &'a mut bool,
    pub has_aggregate:            &'a mut bool,
    pub non_aggregated_unselected_col: &'a mut bool,
    pub group_by_literal:              &'a mut bool,
    pub literal_comparisons:           &'a mut Vec<LiteralComparison>
}
