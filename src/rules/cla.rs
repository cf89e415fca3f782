//! `CLA.*` — clause-presence and clause-shape checks.

use crate::{
    catalog::{RuleMeta, Severity},
    config::AuditConfig,
    query::{ParsedQuery, QueryKind}
};

pub(super) fn entries() -> Vec<RuleMeta> {
    vec![
        RuleMeta {
            code:     "CLA.001",
            severity: Severity::new(3),
            summary:  "SELECT has no WHERE clause",
            content:  "A SELECT without a WHERE clause scans every row in the table. If that is \
                       intentional, add an explicit LIMIT; otherwise a predicate was likely \
                       dropped by mistake.",
            example:  "SELECT id FROM tbl",
            check:    |parsed, _| missing_where(parsed, QueryKind::Select)
        },
        RuleMeta {
            code:     "CLA.014",
            severity: Severity::new(5),
            summary:  "DELETE has no WHERE clause",
            content:  "A DELETE without WHERE removes every row in the table. If the goal is to \
                       empty the table, TRUNCATE is faster and makes the intent explicit.",
            example:  "DELETE FROM tbl  -- consider: TRUNCATE TABLE tbl",
            check:    |parsed, _| missing_where(parsed, QueryKind::Delete)
        },
        RuleMeta {
            code:     "CLA.015",
            severity: Severity::new(6),
            summary:  "UPDATE has no WHERE clause",
            content:  "An UPDATE without WHERE rewrites every row in the table. This is the most \
                       common cause of an accidental full-table mutation in production.",
            example:  "update tbl set col=1",
            check:    |parsed, _| missing_where(parsed, QueryKind::Update)
        },
        RuleMeta {
            code:     "CLA.006",
            severity: Severity::new(2),
            summary:  "GROUP BY / ORDER BY spans more than one table",
            content:  "A GROUP BY or ORDER BY key that mixes columns qualified by different \
                       tables usually means the join has not reduced to one logical row set yet, \
                       which can silently produce more groups/sort keys than intended.",
            example:  "... FROM a JOIN b ON a.id = b.a_id GROUP BY a.id, b.kind",
            check:    |parsed, _| parsed.shape.as_ref().is_some_and(|s| s.cross_table_group_or_order)
        },
    ]
}

fn missing_where(parsed: &ParsedQuery, kind: QueryKind) -> bool {
    if parsed.kind() != kind {
        return false;
    }
    parsed.shape.as_ref().is_some_and(|s| !s.where_present)
}
