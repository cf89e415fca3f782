//! `ARG.*` — predicate and literal-argument shape.

use crate::{
    catalog::{RuleMeta, Severity},
    config::AuditConfig,
    query::ParsedQuery
};

pub(super) fn entries() -> Vec<RuleMeta> {
    vec![
        RuleMeta {
            code:     "ARG.001",
            severity: Severity::new(3),
            summary:  "LIKE pattern starts with a wildcard",
            content:  "A leading `%` or `_` in a LIKE pattern prevents the storage engine from \
                       using a B-tree index prefix scan, forcing a full scan of the column.",
            example:  "... WHERE name LIKE '%foo'",
            check:    check_leading_wildcard_like
        },
        RuleMeta {
            code:     "ARG.002",
            severity: Severity::new(1),
            summary:  "LIKE pattern contains no wildcard",
            content:  "A LIKE pattern with neither `%` nor `_` is equivalent to plain equality \
                       and should be written as `=` for clarity and (on some engines) speed.",
            example:  "... WHERE name LIKE 'foo'",
            check:    check_like_without_wildcard
        },
        RuleMeta {
            code:     "ARG.004",
            severity: Severity::new(2),
            summary:  "IN list contains a literal NULL",
            content:  "`col IN (..., NULL, ...)` never matches NULL because `IN` uses `=` \
                       semantics internally; the NULL entry is always dead weight.",
            example:  "... WHERE col IN (1, 2, NULL)",
            check:    check_null_in_in_list
        },
        RuleMeta {
            code:     "ARG.012",
            severity: Severity::new(2),
            summary:  "INSERT supplies more VALUES rows than the configured threshold",
            content:  "A single multi-row INSERT beyond the configured row threshold should be \
                       batched to bound lock hold time and replication lag.",
            example:  "INSERT INTO t (a) VALUES (1), (2), (3), ...",
            check:    check_large_insert_batch
        },
        RuleMeta {
            code:     "ARG.014",
            severity: Severity::new(2),
            summary:  "IN list contains an identifier, not only literals",
            content:  "An identifier inside an `IN (...)` list is usually a typo'd literal or a \
                       sign that a subquery/JOIN was intended instead.",
            example:  "... WHERE status IN (1, active_flag)",
            check:    check_identifier_in_in_list
        },
    ]
}

fn check_leading_wildcard_like(parsed: &ParsedQuery, _config: &AuditConfig) -> bool {
    parsed
        .shape
        .as_ref()
        .is_some_and(|s| s.like_predicates.iter().any(|p| p.starts_with_wildcard()))
}

fn check_like_without_wildcard(parsed: &ParsedQuery, _config: &AuditConfig) -> bool {
    parsed
        .shape
        .as_ref()
        .is_some_and(|s| s.like_predicates.iter().any(|p| !p.has_wildcard()))
}

fn check_null_in_in_list(parsed: &ParsedQuery, _config: &AuditConfig) -> bool {
    parsed.shape.as_ref().is_some_and(|s| s.in_lists.iter().any(|l| l.has_null))
}

fn check_identifier_in_in_list(parsed: &ParsedQuery, _config: &AuditConfig) -> bool {
    parsed
        .shape
        .as_ref()
        .is_some_and(|s| s.in_lists.iter().any(|l| l.has_identifier))
}

fn check_large_insert_batch(parsed: &ParsedQuery, config: &AuditConfig) -> bool {
    parsed
        .shape
        .as_ref()
        .and_then(|s| s.insert_value_rows)
        .is_some_and(|rows| rows as u32 > config.max_insert_value_rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn leading_wildcard_fires() {
        let parsed = parser::parse("SELECT 1 FROM t WHERE name LIKE '%foo'", None, None);
        assert!(check_leading_wildcard_like(&parsed, &AuditConfig::default()));
    }

    #[test]
    fn no_wildcard_fires_arg_002_not_arg_001() {
        let parsed = parser::parse("SELECT 1 FROM t WHERE name LIKE 'foo'", None, None);
        assert!(check_like_without_wildcard(&parsed, &AuditConfig::default()));
        assert!(!check_leading_wildcard_like(&parsed, &AuditConfig::default()));
    }

    #[test]
    fn null_in_in_list_fires() {
        let parsed = parser::parse("SELECT * FROM tb WHERE col IN (NULL)", None, None);
        assert!(check_null_in_in_list(&parsed, &AuditConfig::default()));
    }

    #[test]
    fn large_insert_respects_threshold() {
        let parsed = parser::parse("INSERT INTO tb (a) VALUES (1), (2)", None, None);
        let mut config = AuditConfig::default();
        config.max_insert_value_rows = 1;
        assert!(check_large_insert_batch(&parsed, &config));
        config.max_insert_value_rows = 10;
        assert!(!check_large_insert_batch(&parsed, &config));
    }
}
