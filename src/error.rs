//! Error types and constructors for the heuristic audit core.
//!
//! Every fallible entry point returns [`AppError`] / [`AppResult`]. Most
//! failure modes here are *not* fatal — they are recovered locally and
//! surfaced as `ERR.*` findings, or just logged — so most of these
//! constructors back a `log::warn!`/`log::debug!` call site rather than a
//! `?`-propagated return. The one exception is catalog initialization,
//! which is a programmer error with no local recovery.

pub use masterror::{AppError, AppResult};

/// A secondary-parser (syntax) failure. Surfaced to callers as the content
/// of the synthesized `ERR.000` finding.
pub fn syntax_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(format!("syntax error: {}", message.into()))
}

/// A primary-parser failure. Never returned to a caller — logged at the
/// call site and the audit continues without a primary AST.
pub fn parser_warning(message: impl Into<String>) -> AppError {
    AppError::bad_request(format!("parser warning: {}", message.into()))
}

/// A single rule body panicked or returned an internal inconsistency.
/// Caught at the engine boundary and logged; never propagated.
pub fn rule_exception(code: &str, message: impl Into<String>) -> AppError {
    AppError::internal(format!("rule {} failed: {}", code, message.into()))
}

/// A severity string did not match `L[0-9]`.
pub fn score_arithmetic_error(severity: impl Into<String>) -> AppError {
    AppError::bad_request(format!("unparseable severity: {}", severity.into()))
}

/// An unrecognized report format name. Not returned — the formatter falls
/// back to a default rendering and this only backs a log line.
pub fn format_selection_error(format_name: impl Into<String>) -> AppError {
    AppError::bad_request(format!("unrecognized format: {}", format_name.into()))
}

/// A `serde_json` marshaling failure while rendering a report.
pub fn marshal_error(source: serde_json::Error) -> AppError {
    AppError::internal(format!("failed to marshal report: {}", source))
}

/// A config value failed to deserialize.
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Catalog initialization failed — duplicate codes, malformed metadata, or
/// a conflict relation referencing an unknown code. The only fatal path in
/// the core: there is no sane recovery from a broken catalog.
pub fn catalog_init_error(message: impl Into<String>) -> AppError {
    AppError::internal(format!("catalog initialization failed: {}", message.into()))
}

/// Format a SQL error with position highlighting, shared by both parser
/// adapters when the underlying library's message carries `Line: X, Column Y`.
pub fn format_sql_error(prefix: &str, message: &str) -> String {
    if let Some(pos) = extract_position(message) {
        format!(
            "{prefix} at line {line}, column {column}:\n  {message}",
            prefix = prefix,
            line = pos.line,
            column = pos.column,
            message = message
        )
    } else {
        format!("{}:\n  {}", prefix, message)
    }
}

struct SqlPosition {
    line:   usize,
    column: usize
}

fn extract_position(message: &str) -> Option<SqlPosition> {
    let line_marker = "Line: ";
    let col_marker = ", Column ";
    let line_start = message.find(line_marker)?;
    let line_num_start = line_start + line_marker.len();
    let rest = message.get(line_num_start..)?;
    let col_start = rest.find(col_marker)?;
    let line_str = message.get(line_num_start..line_num_start + col_start)?;
    let col_num_start = line_num_start + col_start + col_marker.len();
    let col_rest = message.get(col_num_start..)?;
    let col_end = col_rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(col_rest.len());
    let col_str = message.get(col_num_start..col_num_start + col_end)?;
    let line = line_str.parse().ok()?;
    let column = col_str.parse().ok()?;
    Some(SqlPosition {
        line,
        column
    })
}
