//! `KEY.*` — primary/unique key presence.

use std::sync::OnceLock;

use regex::Regex;

use crate::{
    catalog::{RuleMeta, Severity},
    config::AuditConfig,
    query::{ParsedQuery, QueryKind}
};

static PRIMARY_KEY_RE: OnceLock<Regex> = OnceLock::new();

fn primary_key_pattern() -> &'static Regex {
    PRIMARY_KEY_RE.get_or_init(|| Regex::new(r"(?i)\bprimary\s+key\b").expect("valid regex"))
}

pub(super) fn entries() -> Vec<RuleMeta> {
    vec![RuleMeta {
        code:     "KEY.001",
        severity: Severity::new(4),
        summary:  "CREATE TABLE declares no PRIMARY KEY",
        content:  "A table with no primary key has no stable row identity, which breaks \
                   row-based replication, most ORMs, and efficient single-row lookups.",
        example:  "CREATE TABLE t (name VARCHAR(100))",
        check:    check_missing_primary_key
    }]
}

fn check_missing_primary_key(parsed: &ParsedQuery, _config: &AuditConfig) -> bool {
    parsed.kind() == QueryKind::Ddl
        && parsed.text.to_lowercase().contains("create table")
        && !primary_key_pattern().is_match(&parsed.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn missing_primary_key_fires() {
        let parsed = parser::parse("CREATE TABLE t (name VARCHAR(100))", None, None);
        assert!(check_missing_primary_key(&parsed, &AuditConfig::default()));
    }

    #[test]
    fn declared_primary_key_does_not_fire() {
        let parsed = parser::parse("CREATE TABLE t (id INT PRIMARY KEY, name VARCHAR(100))", None, None);
        assert!(!check_missing_primary_key(&parsed, &AuditConfig::default()));
    }
}
