//! `RES.*` — result-determinism and logic hazards.

use crate::{
    catalog::{RuleMeta, Severity},
    config::AuditConfig,
    query::types::LiteralComparison,
    query::ParsedQuery
};

pub(super) fn entries() -> Vec<RuleMeta> {
    vec![
        RuleMeta {
            code:     "RES.001",
            severity: Severity::new(3),
            summary:  "Non-aggregated column selected but not in GROUP BY",
            content:  "Selecting a column that is neither aggregated nor part of the GROUP BY key \
                       gives the engine license to pick any one row's value for it; the result is \
                       non-deterministic even though it happens to run.",
            example:  "SELECT id, name FROM t GROUP BY id  -- name is arbitrary per group",
            check:    |parsed, _| parsed.shape.as_ref().is_some_and(|s| s.non_aggregated_unselected_col)
        },
        RuleMeta {
            code:     "RES.002",
            severity: Severity::new(2),
            summary:  "LIMIT used without ORDER BY",
            content:  "Without an ORDER BY, the rows a LIMIT keeps are whatever order the engine's \
                       current plan happens to produce, which can change between runs or after an \
                       index change.",
            example:  "SELECT * FROM t LIMIT 10",
            check:    check_limit_without_order_by
        },
        RuleMeta {
            code:     "RES.005",
            severity: Severity::new(4),
            summary:  "UPDATE SET list uses AND instead of commas",
            content:  "`SET a = 1 AND b = 2` assigns `a` the boolean result of the whole \
                       expression and never touches `b`; the comma-separated form is required \
                       between assignments.",
            example:  "UPDATE t SET a = 1 AND b = 2 WHERE id = 1",
            check:    |parsed, _| parsed.shape.as_ref().is_some_and(|s| s.set_list_uses_and_separator)
        },
        RuleMeta {
            code:     "RES.006",
            severity: Severity::new(5),
            summary:  "WHERE contains an always-true comparison",
            content:  "A statically-true comparison (`1 = 1`) makes the surrounding predicate a \
                       no-op; if it is a leftover placeholder, the statement is wider than \
                       intended.",
            example:  "... WHERE 1 = 1",
            check:    |parsed, _| has_literal_comparison(parsed, LiteralComparison::AlwaysTrue)
        },
        RuleMeta {
            code:     "RES.007",
            severity: Severity::new(3),
            summary:  "WHERE contains an always-false comparison",
            content:  "A statically-false comparison (`1 = 0`) makes the statement return nothing; \
                       if not a deliberate disable switch, a condition was likely copy-pasted \
                       incorrectly.",
            example:  "... WHERE 1 = 0",
            check:    |parsed, _| has_literal_comparison(parsed, LiteralComparison::AlwaysFalse)
        },
    ]
}

fn has_literal_comparison(parsed: &ParsedQuery, wanted: LiteralComparison) -> bool {
    parsed
        .shape
        .as_ref()
        .is_some_and(|s| s.literal_comparisons.iter().any(|c| *c == wanted))
}

fn check_limit_without_order_by(parsed: &ParsedQuery, _config: &AuditConfig) -> bool {
    parsed
        .shape
        .as_ref()
        .is_some_and(|s| s.limit.is_some() && s.order_cols.is_empty() && !s.order_by_literal)
}
