//! `STA.*` — naming standards.

use std::sync::OnceLock;

use regex::Regex;

use crate::{
    catalog::{RuleMeta, Severity},
    config::AuditConfig,
    query::{ParsedQuery, QueryKind}
};

struct Patterns {
    table_name:  Regex,
    unique_key:  Regex,
    plain_index: Regex
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        table_name:  Regex::new(r"(?i)\bcreate\s+table\s+(?:if\s+not\s+exists\s+)?`?([A-Za-z_][A-Za-z0-9_]*)`?")
            .expect("valid regex"),
        unique_key:  Regex::new(r"(?i)\bunique\s+(?:key|index)\s+`?([A-Za-z_][A-Za-z0-9_]*)`?").expect("valid regex"),
        plain_index: Regex::new(r"(?i)\b(?:key|index)\s+`?([A-Za-z_][A-Za-z0-9_]*)`?\s*\(").expect("valid regex")
    })
}

pub(super) fn entries() -> Vec<RuleMeta> {
    vec![
        RuleMeta {
            code:     "STA.001",
            severity: Severity::new(1),
            summary:  "Table name is not lower_snake_case",
            content:  "A mixed-case or camelCase table name forces every future reference to \
                       match its exact casing, which is fragile on case-sensitive filesystems \
                       (most Linux MySQL installs).",
            example:  "CREATE TABLE UserAccounts (id INT)",
            check:    check_table_naming
        },
        RuleMeta {
            code:     "STA.003",
            severity: Severity::new(1),
            summary:  "Index name does not use the configured prefix",
            content:  "Secondary indexes and unique keys are expected to carry a recognizable \
                       prefix so their purpose is clear from `SHOW CREATE TABLE` output alone.",
            example:  "CREATE TABLE t (id INT, KEY by_created (created_at))",
            check:    check_index_prefix
        },
    ]
}

fn check_table_naming(parsed: &ParsedQuery, _config: &AuditConfig) -> bool {
    if parsed.kind() != QueryKind::Ddl {
        return false;
    }
    patterns()
        .table_name
        .captures(&parsed.text)
        .is_some_and(|caps| !is_lower_snake_case(&caps[1]))
}

fn is_lower_snake_case(name: &str) -> bool {
    name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn check_index_prefix(parsed: &ParsedQuery, config: &AuditConfig) -> bool {
    if parsed.kind() != QueryKind::Ddl {
        return false;
    }
    let p = patterns();
    let unique_names: std::collections::HashSet<String> = p
        .unique_key
        .captures_iter(&parsed.text)
        .map(|c| c[1].to_lowercase())
        .collect();

    let uk_missing = !config.uk_prefix.is_empty()
        && p.unique_key
            .captures_iter(&parsed.text)
            .any(|c| !c[1].starts_with(&config.uk_prefix));
    let idx_missing = !config.idx_prefix.is_empty()
        && p.plain_index
            .captures_iter(&parsed.text)
            .filter(|c| !unique_names.contains(&c[1].to_lowercase()))
            .any(|c| !c[1].starts_with(&config.idx_prefix));
    uk_missing || idx_missing
}
