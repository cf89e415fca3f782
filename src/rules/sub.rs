//! `SUB.*` — subquery usage.

use crate::{
    catalog::{RuleMeta, Severity},
    config::AuditConfig,
    query::ParsedQuery
};

pub(super) fn entries() -> Vec<RuleMeta> {
    vec![RuleMeta {
        code:     "SUB.001",
        severity: Severity::new(1),
        summary:  "Query contains a subquery where a JOIN might suffice",
        content:  "A correlated or uncorrelated subquery is often rewritable as a JOIN, which \
                   gives the optimizer more freedom to choose an access path; flagged for review, \
                   not necessarily wrong.",
        example:  "SELECT * FROM a WHERE id IN (SELECT a_id FROM b)",
        check:    check_has_subquery
    }]
}

fn check_has_subquery(parsed: &ParsedQuery, _config: &AuditConfig) -> bool {
    parsed.shape.as_ref().is_some_and(|s| s.has_subquery)
}
