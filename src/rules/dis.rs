//! `DIS.*` — DISTINCT interactions.

use crate::{
    catalog::{RuleMeta, Severity},
    config::AuditConfig,
    query::ParsedQuery
};

pub(super) fn entries() -> Vec<RuleMeta> {
    vec![RuleMeta {
        code:     "DIS.001",
        severity: Severity::new(1),
        summary:  "DISTINCT combined with ORDER BY",
        content:  "MySQL requires every ORDER BY expression paired with DISTINCT to also appear \
                   in the select list, and the combination forces a temporary table plus \
                   filesort more often than DISTINCT alone; confirm both are actually needed.",
        example:  "SELECT DISTINCT name FROM users ORDER BY created_at",
        check:    check_distinct_with_order_by
    }]
}

fn check_distinct_with_order_by(parsed: &ParsedQuery, _config: &AuditConfig) -> bool {
    parsed
        .shape
        .as_ref()
        .is_some_and(|s| s.has_distinct && !s.order_cols.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn distinct_with_order_by_fires() {
        let parsed = parser::parse("SELECT DISTINCT name FROM users ORDER BY created_at", None, None);
        assert!(check_distinct_with_order_by(&parsed, &AuditConfig::default()));
    }

    #[test]
    fn distinct_alone_does_not_fire() {
        let parsed = parser::parse("SELECT DISTINCT name FROM users", None, None);
        assert!(!check_distinct_with_order_by(&parsed, &AuditConfig::default()));
    }
}
