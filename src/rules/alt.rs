//! `ALT.*` — schema-altering statements.

use std::sync::OnceLock;

use regex::Regex;

use crate::{
    catalog::{RuleMeta, Severity},
    config::AuditConfig,
    query::ParsedQuery
};

static DROP_COLUMN_RE: OnceLock<Regex> = OnceLock::new();

fn drop_column_pattern() -> &'static Regex {
    DROP_COLUMN_RE.get_or_init(|| Regex::new(r"(?i)\balter\s+table\b[^;]*\bdrop\s+column\b").expect("valid regex"))
}

pub(super) fn entries() -> Vec<RuleMeta> {
    vec![RuleMeta {
        code:     "ALT.001",
        severity: Severity::new(4),
        summary:  "ALTER TABLE drops a column",
        content:  "A DROP COLUMN clause is destructive and irreversible once applied; it \
                   deserves explicit review separate from additive schema changes.",
        example:  "ALTER TABLE orders DROP COLUMN legacy_status",
        check:    check_drop_column
    }]
}

fn check_drop_column(parsed: &ParsedQuery, _config: &AuditConfig) -> bool {
    drop_column_pattern().is_match(&parsed.text)
}
