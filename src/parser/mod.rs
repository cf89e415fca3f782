//! Parser Facade: coordinates the primary and secondary parsers and
//! assembles a [`ParsedQuery`] unconditionally, leaving the decision of
//! whether/how to continue auditing to the Rule Engine.

pub mod secondary;

use log::warn;
use sqlparser::{dialect::MySqlDialect, parser::Parser};

use crate::query::{ParsedQuery, shape_of};

/// Parses `sql` into a [`ParsedQuery`]. `charset`/`collation` are accepted
/// for interface symmetry with the external driver's schema-aware calls
/// but are not yet consulted by any rule body in this core; they are
/// threaded through so a future rule can without an API break.
pub fn parse(sql: &str, _charset: Option<&str>, _collation: Option<&str>) -> ParsedQuery {
    let (primary_tree, shape) = match Parser::parse_sql(&MySqlDialect {}, sql) {
        Ok(mut statements) if !statements.is_empty() => {
            let stmt = statements.remove(0);
            let shape = shape_of(sql, &stmt);
            (Some(stmt), Some(shape))
        }
        Ok(_) => (None, None),
        Err(e) => {
            warn!("primary parser failed: {e}");
            (None, None)
        }
    };

    let (secondary_trees, parse_error) = match secondary::parse(sql) {
        Ok(stmts) => (stmts, None),
        Err(message) => {
            warn!("secondary parser failed: {message}");
            (Vec::new(), Some(message))
        }
    };

    ParsedQuery {
        text: sql.to_string(),
        primary_tree,
        shape,
        secondary_trees,
        parse_error
    }
}
