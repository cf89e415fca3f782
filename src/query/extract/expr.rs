use compact_str::CompactString;
use indexmap::IndexSet;
use sqlparser::ast::{BinaryOperator, Expr, Value, ValueWithSpan};

use crate::query::types::{CountArgument, InListShape, LikePredicate, LiteralComparison, WindowFunction};

pub fn extract_columns_from_expr(expr: &Expr, columns: &mut IndexSet<CompactString>) {
    match expr {
        Expr::Identifier(ident) => {
            columns.insert(ident.value.as_str().into());
        }
        Expr::CompoundIdentifier(idents) => {
            if let Some(col) = idents.last() {
                columns.insert(col.value.as_str().into());
            }
        }
        Expr::BinaryOp {
            left,
            right,
            ..
        } => {
            extract_columns_from_expr(left, columns);
            extract_columns_from_expr(right, columns);
        }
        Expr::UnaryOp {
            expr, ..
        } => extract_columns_from_expr(expr, columns),
        Expr::InList {
            expr,
            list,
            ..
        } => {
            extract_columns_from_expr(expr, columns);
            for item in list {
                extract_columns_from_expr(item, columns);
            }
        }
        Expr::InSubquery {
            expr, ..
        } => extract_columns_from_expr(expr, columns),
        Expr::Between {
            expr,
            low,
            high,
            ..
        } => {
            extract_columns_from_expr(expr, columns);
            extract_columns_from_expr(low, columns);
            extract_columns_from_expr(high, columns);
        }
        Expr::IsNull(e) | Expr::IsNotNull(e) | Expr::Nested(e) => {
            extract_columns_from_expr(e, columns)
        }
        Expr::Function(func) => {
            if let sqlparser::ast::FunctionArguments::List(arg_list) = &func.args {
                for arg in &arg_list.args {
                    if let sqlparser::ast::FunctionArg::Unnamed(
                        sqlparser::ast::FunctionArgExpr::Expr(e)
                    ) = arg
                    {
                        extract_columns_from_expr(e, columns);
                    }
                }
            }
        }
        Expr::Case {
            operand,
            conditions,
            else_result,
            ..
        } => {
            if let Some(op) = operand {
                extract_columns_from_expr(op, columns);
            }
            for case_when in conditions {
                extract_columns_from_expr(&case_when.condition, columns);
                extract_columns_from_expr(&case_when.result, columns);
            }
            if let Some(else_res) = else_result {
                extract_columns_from_expr(else_res, columns);
            }
        }
        Expr::Cast {
            expr, ..
        }
        | Expr::Extract {
            expr, ..
        } => extract_columns_from_expr(expr, columns),
        Expr::Like {
            expr, ..
        }
        | Expr::ILike {
            expr, ..
        } => extract_columns_from_expr(expr, columns),
        _ => {}
    }
}

pub fn extract_window_functions(expr: &Expr, windows: &mut Vec<WindowFunction>) {
    match expr {
        Expr::Function(func) => {
            if let Some(over) = &func.over {
                let mut partition_cols = Vec::new();
                let mut order_cols = Vec::new();
                if let sqlparser::ast::WindowType::WindowSpec(spec) = over {
                    for part_expr in &spec.partition_by {
                        collect_ident(part_expr, &mut partition_cols);
                    }
                    for order_expr in &spec.order_by {
                        collect_ident(&order_expr.expr, &mut order_cols);
                    }
                }
                windows.push(WindowFunction {
                    name: func.name.to_string().into(),
                    partition_cols,
                    order_cols
                });
            }
            if let sqlparser::ast::FunctionArguments::List(arg_list) = &func.args {
                for arg in &arg_list.args {
                    if let sqlparser::ast::FunctionArg::Unnamed(
                        sqlparser::ast::FunctionArgExpr::Expr(e)
                    ) = arg
                    {
                        extract_window_functions(e, windows);
                    }
                }
            }
        }
        Expr::BinaryOp {
            left,
            right,
            ..
        } => {
            extract_window_functions(left, windows);
            extract_window_functions(right, windows);
        }
        Expr::Nested(e) => extract_window_functions(e, windows),
        Expr::Case {
            operand,
            conditions,
            else_result,
            ..
        } => {
            if let Some(op) = operand {
                extract_window_functions(op, windows);
            }
            for cw in conditions {
                extract_window_functions(&cw.condition, windows);
                extract_window_functions(&cw.result, windows);
            }
            if let Some(e) = else_result {
                extract_window_functions(e, windows);
            }
        }
        _ => {}
    }
}

fn collect_ident(expr: &Expr, out: &mut Vec<CompactString>) {
    match expr {
        Expr::Identifier(ident) => out.push(ident.value.as_str().into()),
        Expr::CompoundIdentifier(idents) => {
            if let Some(col) = idents.last() {
                out.push(col.value.as_str().into());
            }
        }
        _ => {}
    }
}

pub fn contains_subquery(expr: &Expr) -> bool {
    match expr {
        Expr::Subquery(_)
        | Expr::InSubquery {
            ..
        }
        | Expr::Exists {
            ..
        } => true,
        Expr::BinaryOp {
            left,
            right,
            ..
        } => contains_subquery(left) || contains_subquery(right),
        Expr::Nested(e) => contains_subquery(e),
        Expr::InList {
            expr,
            list,
            ..
        } => contains_subquery(expr) || list.iter().any(contains_subquery),
        Expr::Case {
            operand,
            conditions,
            else_result,
            ..
        } => {
            operand.as_ref().is_some_and(|o| contains_subquery(o))
                || conditions
                    .iter()
                    .any(|cw| contains_subquery(&cw.condition) || contains_subquery(&cw.result))
                || else_result.as_ref().is_some_and(|e| contains_subquery(e))
        }
        _ => false
    }
}

/// Walks a predicate expression collecting every `LIKE`/`NOT LIKE` whose
/// pattern is a string literal (`ARG.001`/`ARG.002`).
pub fn collect_like_predicates(expr: &Expr, out: &mut Vec<LikePredicate>) {
    match expr {
        Expr::Like {
            negated,
            pattern,
            ..
        }
        | Expr::ILike {
            negated,
            pattern,
            ..
        } => {
            if let Some(text) = string_literal(pattern) {
                out.push(LikePredicate {
                    pattern: text,
                    negated: *negated
                });
            }
        }
        Expr::BinaryOp {
            left,
            right,
            ..
        } => {
            collect_like_predicates(left, out);
            collect_like_predicates(right, out);
        }
        Expr::UnaryOp {
            expr, ..
        }
        | Expr::Nested(expr) => collect_like_predicates(expr, out),
        _ => {}
    }
}

/// Walks a predicate expression collecting every `IN (...)`/`NOT IN (...)`
/// list shape (`ARG.004`/`ARG.014`).
pub fn collect_in_lists(expr: &Expr, out: &mut Vec<InListShape>) {
    match expr {
        Expr::InList {
            list, ..
        } => {
            let mut shape = InListShape {
                item_count: list.len(),
                ..Default::default()
            };
            for item in list {
                if is_null_literal(item) {
                    shape.has_null = true;
                }
                if matches!(item, Expr::Identifier(_) | Expr::CompoundIdentifier(_)) {
                    shape.has_identifier = true;
                }
            }
            out.push(shape);
        }
        Expr::BinaryOp {
            left,
            right,
            ..
        } => {
            collect_in_lists(left, out);
            collect_in_lists(right, out);
        }
        Expr::UnaryOp {
            expr, ..
        }
        | Expr::Nested(expr) => collect_in_lists(expr, out),
        _ => {}
    }
}

fn is_null_literal(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Value(ValueWithSpan {
            value: Value::Null,
            ..
        })
    )
}

fn string_literal(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Value(ValueWithSpan {
            value: Value::SingleQuotedString(s) | Value::DoubleQuotedString(s),
            ..
        }) => Some(s.clone()),
        _ => None
    }
}

fn number_literal(expr: &Expr) -> Option<f64> {
    match expr {
        Expr::Value(ValueWithSpan {
            value: Value::Number(n, _),
            ..
        }) => n.parse().ok(),
        Expr::UnaryOp {
            op: sqlparser::ast::UnaryOperator::Minus,
            expr
        } => number_literal(expr).map(|n| -n),
        _ => None
    }
}

/// Evaluates a binary comparison of two numeric literals, used to detect
/// always-true/always-false predicates (`RES.006`/`RES.007`).
pub fn literal_comparison(expr: &Expr) -> Option<LiteralComparison> {
    let Expr::BinaryOp {
        left,
        op,
        right
    } = expr
    else {
        return None;
    };
    let (lhs, rhs) = (number_literal(left)?, number_literal(right)?);
    let truth = match op {
        BinaryOperator::Eq => lhs == rhs,
        BinaryOperator::NotEq => lhs != rhs,
        BinaryOperator::Lt => lhs < rhs,
        BinaryOperator::LtEq => lhs <= rhs,
        BinaryOperator::Gt => lhs > rhs,
        BinaryOperator::GtEq => lhs >= rhs,
        _ => return None
    };
    Some(if truth {
        LiteralComparison::AlwaysTrue
    } else {
        LiteralComparison::AlwaysFalse
    })
}

/// Walks a predicate collecting every statically-evaluable literal
/// comparison found anywhere inside it (conjuncts, disjuncts, nesting).
pub fn collect_literal_comparisons(expr: &Expr, out: &mut Vec<LiteralComparison>) {
    if let Some(truth) = literal_comparison(expr) {
        out.push(truth);
    }
    if let Expr::BinaryOp {
        left,
        right,
        ..
    } = expr
    {
        collect_literal_comparisons(left, out);
        collect_literal_comparisons(right, out);
    } else if let Expr::Nested(e) | Expr::UnaryOp {
        expr: e, ..
    } = expr
    {
        collect_literal_comparisons(e, out);
    }
}

/// Detects a function call wrapping a bare column reference on the
/// left-hand side of a comparison, e.g. `WHERE YEAR(created_at) = 2020`
/// (`FUN.001`: such predicates defeat index usage).
pub fn has_function_wrapped_column(expr: &Expr) -> bool {
    match expr {
        Expr::BinaryOp {
            left,
            right,
            op: BinaryOperator::Eq
                | BinaryOperator::NotEq
                | BinaryOperator::Lt
                | BinaryOperator::LtEq
                | BinaryOperator::Gt
                | BinaryOperator::GtEq
        } => is_function_of_column(left) || is_function_of_column(right),
        Expr::BinaryOp {
            left,
            right,
            ..
        } => has_function_wrapped_column(left) || has_function_wrapped_column(right),
        Expr::Nested(e) | Expr::UnaryOp {
            expr: e, ..
        } => has_function_wrapped_column(e),
        _ => false
    }
}

fn is_function_of_column(expr: &Expr) -> bool {
    let Expr::Function(func) = expr else {
        return false;
    };
    let sqlparser::ast::FunctionArguments::List(arg_list) = &func.args else {
        return false;
    };
    arg_list.args.iter().any(|arg| {
        matches!(
            arg,
            sqlparser::ast::FunctionArg::Unnamed(sqlparser::ast::FunctionArgExpr::Expr(
                Expr::Identifier(_) | Expr::CompoundIdentifier(_)
            ))
        )
    })
}

/// Collects `COUNT(...)` call argument shapes, used by `FUN.002`/`FUN.005`.
pub fn collect_count_calls(expr: &Expr, out: &mut Vec<CountArgument>) {
    match expr {
        Expr::Function(func) if func.name.to_string().eq_ignore_ascii_case("count") => {
            if let sqlparser::ast::FunctionArguments::List(arg_list) = &func.args {
                match arg_list.args.as_slice() {
                    [] => out.push(CountArgument::Star),
                    [sqlparser::ast::FunctionArg::Unnamed(
                        sqlparser::ast::FunctionArgExpr::Wildcard
                    )] => out.push(CountArgument::Star),
                    [sqlparser::ast::FunctionArg::Unnamed(
                        sqlparser::ast::FunctionArgExpr::Expr(e)
                    )] => {
                        if number_literal(e).is_some() || string_literal(e).is_some() {
                            out.push(CountArgument::Constant);
                        } else {
                            out.push(CountArgument::Column);
                        }
                    }
                    _ => out.push(CountArgument::Column)
                }
            }
        }
        Expr::BinaryOp {
            left,
            right,
            ..
        } => {
            collect_count_calls(left, out);
            collect_count_calls(right, out);
        }
        Expr::Nested(e) => collect_count_calls(e, out),
        _ => {}
    }
}

/// Collects the table qualifier of every compound identifier in `expr`
/// (`t1.col` -> `t1`). Used to detect group/order keys spanning more than
/// one table (`CLA.006`).
pub fn collect_table_qualifiers(expr: &Expr, out: &mut IndexSet<CompactString>) {
    match expr {
        Expr::CompoundIdentifier(idents) if idents.len() >= 2 => {
            out.insert(idents[0].value.as_str().into());
        }
        Expr::BinaryOp {
            left,
            right,
            ..
        } => {
            collect_table_qualifiers(left, out);
            collect_table_qualifiers(right, out);
        }
        Expr::Nested(e) | Expr::UnaryOp {
            expr: e, ..
        } => collect_table_qualifiers(e, out),
        _ => {}
    }
}

pub fn is_aggregate_call(expr: &Expr) -> bool {
    const AGGREGATES: [&str; 5] = ["count", "sum", "avg", "min", "max"];
    match expr {
        Expr::Function(func) => AGGREGATES
            .iter()
            .any(|name| func.name.to_string().eq_ignore_ascii_case(name)),
        _ => false
    }
}

#[cfg(test)]
mod tests {
    use sqlparser::{dialect::GenericDialect, parser::Parser};

    use super::*;

    fn parse_where(sql: &str) -> Expr {
        let stmts = Parser::parse_sql(&GenericDialect {}, sql).expect("parses");
        let sqlparser::ast::Statement::Query(q) = &stmts[0] else {
            panic!("expected query")
        };
        let sqlparser::ast::SetExpr::Select(select) = q.body.as_ref() else {
            panic!("expected select")
        };
        select.selection.clone().expect("selection")
    }

    #[test]
    fn detects_always_true_literal_comparison() {
        let expr = parse_where("SELECT 1 FROM t WHERE 1 = 1");
        assert_eq!(literal_comparison(&expr), Some(LiteralComparison::AlwaysTrue));
    }

    #[test]
    fn detects_always_false_literal_comparison() {
        let expr = parse_where("SELECT 1 FROM t WHERE 1 = 0");
        assert_eq!(literal_comparison(&expr), Some(LiteralComparison::AlwaysFalse));
    }

    #[test]
    fn collects_leading_wildcard_like() {
        let expr = parse_where("SELECT 1 FROM t WHERE name LIKE '%foo'");
        let mut out = Vec::new();
        collect_like_predicates(&expr, &mut out);
        assert_eq!(out.len(), 1);
        assert!(out[0].starts_with_wildcard());
    }

    #[test]
    fn collects_in_list_with_null() {
        let expr = parse_where("SELECT 1 FROM t WHERE col IN (NULL)");
        let mut out = Vec::new();
        collect_in_lists(&expr, &mut out);
        assert_eq!(out.len(), 1);
        assert!(out[0].has_null);
    }

    #[test]
    fn detects_function_wrapped_column() {
        let expr = parse_where("SELECT 1 FROM t WHERE YEAR(created_at) = 2020");
        assert!(has_function_wrapped_column(&expr));
    }

    #[test]
    fn plain_column_comparison_is_not_function_wrapped() {
        let expr = parse_where("SELECT 1 FROM t WHERE created_at = 2020");
        assert!(!has_function_wrapped_column(&expr));
    }
}
