//! `GRP.*` — GROUP BY shape.

const MAX_REASONABLE_GROUP_COLS: usize = 5;

use crate::{
    catalog::{RuleMeta, Severity},
    config::AuditConfig,
    query::ParsedQuery
};

pub(super) fn entries() -> Vec<RuleMeta> {
    vec![RuleMeta {
        code:     "GRP.001",
        severity: Severity::new(1),
        summary:  "GROUP BY key has an unusually large number of columns",
        content:  "A GROUP BY with many columns often means the query is grouping on a near-\
                   unique combination, which is closer to a DISTINCT over those columns than an \
                   aggregation and rarely benefits from grouping semantics.",
        example:  "... GROUP BY a, b, c, d, e, f",
        check:    check_wide_group_by
    }]
}

fn check_wide_group_by(parsed: &ParsedQuery, _config: &AuditConfig) -> bool {
    parsed
        .shape
        .as_ref()
        .is_some_and(|s| s.group_cols.len() > MAX_REASONABLE_GROUP_COLS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn wide_group_by_fires() {
        let parsed = parser::parse("SELECT a,b,c,d,e,f FROM t GROUP BY a,b,c,d,e,f", None, None);
        assert!(check_wide_group_by(&parsed, &AuditConfig::default()));
    }

    #[test]
    fn narrow_group_by_does_not_fire() {
        let parsed = parser::parse("SELECT a FROM t GROUP BY a", None, None);
        assert!(!check_wide_group_by(&parsed, &AuditConfig::default()));
    }
}
