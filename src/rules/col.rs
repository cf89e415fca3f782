//! `COL.*` — projected and declared column shape.

use std::sync::OnceLock;

use regex::Regex;

use crate::{
    catalog::{RuleMeta, Severity},
    config::AuditConfig,
    query::{ParsedQuery, QueryKind}
};

struct Patterns {
    text_blob_type: Regex,
    varchar_type:   Regex
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        text_blob_type: Regex::new(r"(?i)\b(tiny|medium|long)?(text|blob)\b").expect("valid regex"),
        varchar_type:   Regex::new(r"(?i)\bvarchar\s*\(\s*(\d+)\s*\)").expect("valid regex")
    })
}

pub(super) fn entries() -> Vec<RuleMeta> {
    vec![
        RuleMeta {
            code:     "COL.001",
            severity: Severity::new(1),
            summary:  "SELECT projects every column with *",
            content:  "`SELECT *` couples the query to the table's current column set: adding a \
                       column can change result shape and network payload for every caller.",
            example:  "SELECT * FROM film",
            check:    |parsed, _| parsed.shape.as_ref().is_some_and(|s| s.select_star)
        },
        RuleMeta {
            code:     "COL.007",
            severity: Severity::new(2),
            summary:  "CREATE TABLE declares more TEXT/BLOB columns than allowed",
            content:  "Each TEXT/BLOB column is stored off-page on most engines; beyond the \
                       configured count, row reads start paying for large-object fetches that \
                       most queries never asked for.",
            example:  "CREATE TABLE t (a TEXT, b TEXT, c BLOB)",
            check:    check_too_many_text_cols
        },
        RuleMeta {
            code:     "COL.017",
            severity: Severity::new(1),
            summary:  "VARCHAR column declared longer than the configured maximum",
            content:  "A VARCHAR length past the configured ceiling is usually better modeled as \
                       TEXT, and on some engines pushes row size past the in-page limit.",
            example:  "CREATE TABLE t (bio VARCHAR(2000))",
            check:    check_varchar_too_long
        },
        RuleMeta {
            code:     "COL.018",
            severity: Severity::new(2),
            summary:  "CREATE TABLE uses a disallowed column type",
            content:  "The column type appears in the configured deny-list, typically because the \
                       team has standardized on a different type for the same purpose.",
            example:  "CREATE TABLE t (legacy_id FLOAT)  -- FLOAT denied in favor of DECIMAL",
            check:    check_disallowed_column_type
        },
    ]
}

fn is_create_table(parsed: &ParsedQuery) -> bool {
    parsed.kind() == QueryKind::Ddl && parsed.text.to_lowercase().contains("create table")
}

fn check_too_many_text_cols(parsed: &ParsedQuery, config: &AuditConfig) -> bool {
    if !is_create_table(parsed) {
        return false;
    }
    let count = patterns().text_blob_type.find_iter(&parsed.text).count();
    count as u32 > config.max_text_cols_count
}

fn check_varchar_too_long(parsed: &ParsedQuery, config: &AuditConfig) -> bool {
    if !is_create_table(parsed) {
        return false;
    }
    patterns().varchar_type.captures_iter(&parsed.text).any(|caps| {
        caps.get(1)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .is_some_and(|len| len > config.max_varchar_length)
    })
}

fn check_disallowed_column_type(parsed: &ParsedQuery, config: &AuditConfig) -> bool {
    if !is_create_table(parsed) || config.column_not_allow_type.is_empty() {
        return false;
    }
    let lowered = parsed.text.to_lowercase();
    config
        .column_not_allow_type
        .iter()
        .any(|ty| word_boundary_contains(&lowered, &ty.to_lowercase()))
}

fn word_boundary_contains(haystack: &str, needle: &str) -> bool {
    haystack.split(|c: char| !c.is_alphanumeric() && c != '_').any(|tok| tok == needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn select_star_fires() {
        let parsed = parser::parse("SELECT * FROM film", None, None);
        assert!(parsed.shape.unwrap().select_star);
    }

    #[test]
    fn too_many_text_columns_fires() {
        let parsed = parser::parse("CREATE TABLE t (a TEXT, b TEXT, c BLOB)", None, None);
        let mut config = AuditConfig::default();
        config.max_text_cols_count = 2;
        assert!(check_too_many_text_cols(&parsed, &config));
    }

    #[test]
    fn varchar_over_limit_fires() {
        let parsed = parser::parse("CREATE TABLE t (bio VARCHAR(2000))", None, None);
        let mut config = AuditConfig::default();
        config.max_varchar_length = 255;
        assert!(check_varchar_too_long(&parsed, &config));
    }

    #[test]
    fn disallowed_type_fires() {
        let parsed = parser::parse("CREATE TABLE t (legacy_id FLOAT)", None, None);
        let mut config = AuditConfig::default();
        config.column_not_allow_type = vec!["float".to_string()];
        assert!(check_disallowed_column_type(&parsed, &config));
    }
}
