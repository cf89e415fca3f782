//! `TBL.*` — table storage options.

use std::sync::OnceLock;

use regex::Regex;

use crate::{
    catalog::{RuleMeta, Severity},
    config::AuditConfig,
    query::{ParsedQuery, QueryKind}
};

struct Patterns {
    engine:  Regex,
    charset: Regex,
    collate: Regex
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        engine:  Regex::new(r"(?i)\bengine\s*=\s*([A-Za-z0-9_]+)").expect("valid regex"),
        charset: Regex::new(r"(?i)\b(?:default\s+)?charset\s*=\s*([A-Za-z0-9_]+)").expect("valid regex"),
        collate: Regex::new(r"(?i)\bcollate\s*=\s*([A-Za-z0-9_]+)").expect("valid regex")
    })
}

pub(super) fn entries() -> Vec<RuleMeta> {
    vec![
        RuleMeta {
            code:     "TBL.002",
            severity: Severity::new(3),
            summary:  "Table storage engine not in the allowed list",
            content:  "The engine named on the CREATE TABLE statement is not on the configured \
                       allow-list, typically because the team standardizes on one transactional \
                       engine.",
            example:  "CREATE TABLE t (id INT) ENGINE=MyISAM",
            check:    |parsed, config| check_allow_list(parsed, &patterns().engine, &config.allow_engines)
        },
        RuleMeta {
            code:     "TBL.005",
            severity: Severity::new(2),
            summary:  "Table character set not in the allowed list",
            content:  "The character set named on the CREATE TABLE statement is not on the \
                       configured allow-list.",
            example:  "CREATE TABLE t (id INT) CHARSET=latin1",
            check:    |parsed, config| check_allow_list(parsed, &patterns().charset, &config.allow_charsets)
        },
        RuleMeta {
            code:     "TBL.008",
            severity: Severity::new(1),
            summary:  "Table collation not in the allowed list",
            content:  "The collation named on the CREATE TABLE statement is not on the configured \
                       allow-list.",
            example:  "CREATE TABLE t (id INT) COLLATE=latin1_swedish_ci",
            check:    |parsed, config| check_allow_list(parsed, &patterns().collate, &config.allow_collates)
        },
    ]
}

fn check_allow_list(parsed: &ParsedQuery, pattern: &Regex, allowed: &[String]) -> bool {
    if parsed.kind() != QueryKind::Ddl || allowed.is_empty() {
        return false;
    }
    pattern
        .captures(&parsed.text)
        .is_some_and(|caps| !allowed.iter().any(|a| a.eq_ignore_ascii_case(&caps[1])))
}
