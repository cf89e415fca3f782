//! `KWR.*` — reserved-word identifiers.

use std::sync::OnceLock;

use regex::Regex;

use crate::{
    catalog::{RuleMeta, Severity},
    config::AuditConfig,
    query::ParsedQuery
};

/// Common reserved words that also show up as column/table names in the
/// wild, causing quoting headaches across dialects.
const RISKY_IDENTIFIERS: &[&str] = &[
    "order", "group", "key", "condition", "check", "rank", "row", "date", "time", "desc", "asc"
];

static CREATE_TABLE_RE: OnceLock<Regex> = OnceLock::new();

fn create_table_columns_pattern() -> &'static Regex {
    CREATE_TABLE_RE.get_or_init(|| {
        Regex::new(r"(?is)\bcreate\s+table\b[^(]*\((?P<cols>.*)\)\s*;?\s*$").expect("valid regex")
    })
}

pub(super) fn entries() -> Vec<RuleMeta> {
    vec![RuleMeta {
        code:     "KWR.001",
        severity: Severity::new(1),
        summary:  "Column name is a reserved word",
        content:  "Naming a column after a SQL reserved word (`order`, `group`, `key`, ...) forces \
                   every future query touching it to use backtick/quote escaping or risk a syntax \
                   error.",
        example:  "CREATE TABLE t (id INT, `order` INT)",
        check:    check_reserved_word_identifier
    }]
}

fn check_reserved_word_identifier(parsed: &ParsedQuery, _config: &AuditConfig) -> bool {
    let Some(caps) = create_table_columns_pattern().captures(&parsed.text) else {
        return false;
    };
    let cols = caps["cols"].to_lowercase();
    RISKY_IDENTIFIERS
        .iter()
        .any(|word| cols.split(|c: char| !c.is_alphanumeric() && c != '_').any(|tok| tok == *word))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn reserved_word_column_fires() {
        let parsed = parser::parse("CREATE TABLE t (id INT, `order` INT)", None, None);
        assert!(check_reserved_word_identifier(&parsed, &AuditConfig::default()));
    }

    #[test]
    fn ordinary_column_does_not_fire() {
        let parsed = parser::parse("CREATE TABLE t (id INT, total_amount INT)", None, None);
        assert!(!check_reserved_word_identifier(&parsed, &AuditConfig::default()));
    }
}
