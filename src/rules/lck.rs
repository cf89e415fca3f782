//! `LCK.*` — explicit locking clauses.

use std::sync::OnceLock;

use regex::Regex;

use crate::{
    catalog::{RuleMeta, Severity},
    config::AuditConfig,
    query::ParsedQuery
};

static LOCK_CLAUSE_RE: OnceLock<Regex> = OnceLock::new();

fn lock_clause_pattern() -> &'static Regex {
    LOCK_CLAUSE_RE.get_or_init(|| Regex::new(r"(?i)\bfor\s+update\b|\block\s+in\s+share\s+mode\b").expect("valid regex"))
}

pub(super) fn entries() -> Vec<RuleMeta> {
    vec![RuleMeta {
        code:     "LCK.001",
        severity: Severity::new(2),
        summary:  "Query takes an explicit row lock",
        content:  "`FOR UPDATE`/`LOCK IN SHARE MODE` hold row locks for the lifetime of the \
                   surrounding transaction. Outside an explicit, short transaction this can stall \
                   concurrent writers far longer than intended.",
        example:  "SELECT * FROM accounts WHERE id = 1 FOR UPDATE",
        check:    check_explicit_lock
    }]
}

fn check_explicit_lock(parsed: &ParsedQuery, _config: &AuditConfig) -> bool {
    lock_clause_pattern().is_match(&parsed.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn for_update_fires() {
        let parsed = parser::parse("SELECT * FROM accounts WHERE id = 1 FOR UPDATE", None, None);
        assert!(check_explicit_lock(&parsed, &AuditConfig::default()));
    }

    #[test]
    fn plain_select_does_not_fire() {
        let parsed = parser::parse("SELECT * FROM accounts WHERE id = 1", None, None);
        assert!(!check_explicit_lock(&parsed, &AuditConfig::default()));
    }
}
