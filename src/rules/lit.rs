//! `LIT.*` — literal representation.

use std::sync::OnceLock;

use regex::Regex;

use crate::{
    catalog::{RuleMeta, Severity},
    config::AuditConfig,
    query::ParsedQuery
};

static UNQUOTED_DATE_RE: OnceLock<Regex> = OnceLock::new();

fn unquoted_date_pattern() -> &'static Regex {
    // A YYYY-MM-DD token not immediately preceded by a quote character.
    UNQUOTED_DATE_RE.get_or_init(|| Regex::new(r"(?:[^'\x22\w]|^)\d{4}-\d{2}-\d{2}\b").expect("valid regex"))
}

pub(super) fn entries() -> Vec<RuleMeta> {
    vec![RuleMeta {
        code:     "LIT.002",
        severity: Severity::new(2),
        summary:  "Date-shaped literal is not quoted",
        content:  "`col < 2018-01-10` parses as an arithmetic expression (`2018 - 01 - 10`), not \
                   a date comparison, because the literal was never quoted as a string.",
        example:  "... WHERE created_at < 2018-01-10",
        check:    check_unquoted_date_literal
    }]
}

fn check_unquoted_date_literal(parsed: &ParsedQuery, _config: &AuditConfig) -> bool {
    unquoted_date_pattern().is_match(&parsed.text)
}
