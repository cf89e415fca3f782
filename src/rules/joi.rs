//! `JOI.*` — join shape.

use std::sync::OnceLock;

use regex::Regex;

use crate::{
    catalog::{RuleMeta, Severity},
    config::AuditConfig,
    query::{ParsedQuery, QueryKind}
};

static FROM_CLAUSE_RE: OnceLock<Regex> = OnceLock::new();
static CROSS_JOIN_RE: OnceLock<Regex> = OnceLock::new();

fn from_clause_pattern() -> &'static Regex {
    FROM_CLAUSE_RE.get_or_init(|| {
        Regex::new(r"(?is)\bfrom\b(?P<body>.*?)(\bwhere\b|\bgroup\s+by\b|\border\s+by\b|\blimit\b|$)")
            .expect("valid regex")
    })
}

fn cross_join_pattern() -> &'static Regex {
    CROSS_JOIN_RE.get_or_init(|| Regex::new(r"(?i)\bcross\s+join\b").expect("valid regex"))
}

pub(super) fn entries() -> Vec<RuleMeta> {
    vec![
        RuleMeta {
            code:     "JOI.001",
            severity: Severity::new(2),
            summary:  "Tables joined with a comma instead of an explicit JOIN",
            content:  "Comma-separated tables in FROM (the pre-ANSI-92 join syntax) put the join \
                       condition in WHERE, indistinguishable from a missing one at a glance, and \
                       are easy to accidentally turn into a cross join.",
            example:  "SELECT * FROM a, b WHERE a.id = b.a_id",
            check:    check_comma_join
        },
        RuleMeta {
            code:     "JOI.002",
            severity: Severity::new(2),
            summary:  "Explicit CROSS JOIN",
            content:  "A CROSS JOIN produces the full Cartesian product of both sides; confirm \
                       this is intentional rather than a missing join condition.",
            example:  "SELECT * FROM a CROSS JOIN b",
            check:    |parsed, _| cross_join_pattern().is_match(&parsed.text)
        },
    ]
}

fn check_comma_join(parsed: &ParsedQuery, _config: &AuditConfig) -> bool {
    if parsed.kind() != QueryKind::Select {
        return false;
    }
    let Some(caps) = from_clause_pattern().captures(&parsed.text) else {
        return false;
    };
    let body = &caps["body"];
    body.contains(',') && !body.to_lowercase().contains("join")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn comma_join_fires() {
        let parsed = parser::parse("SELECT * FROM a, b WHERE a.id = b.a_id", None, None);
        assert!(check_comma_join(&parsed, &AuditConfig::default()));
    }

    #[test]
    fn explicit_join_does_not_fire_comma_rule() {
        let parsed = parser::parse("SELECT * FROM a JOIN b ON a.id = b.a_id", None, None);
        assert!(!check_comma_join(&parsed, &AuditConfig::default()));
    }

    #[test]
    fn cross_join_fires() {
        let parsed = parser::parse("SELECT * FROM a CROSS JOIN b", None, None);
        assert!(cross_join_pattern().is_match(&parsed.text));
    }
}
