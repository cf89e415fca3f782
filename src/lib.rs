//! # Heuristic SQL audit core
//!
//! Parses a MySQL-family SQL statement through two independent parsers,
//! runs a static catalog of rules against the resulting shape, resolves
//! conflicting findings, applies an ignore list, scores the result, and
//! renders it in one of several report formats. The command-line driver,
//! configuration loader, schema introspection, and live EXPLAIN/profiling
//! collaborators are out of scope for this crate; it only merges and
//! renders whatever `FindingSet`s those collaborators hand it.

pub mod blacklist;
pub mod catalog;
pub mod conflict;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod format;
pub mod ignore;
pub mod parser;
pub mod query;
pub mod rules;
pub mod scorer;

use rules::FindingSet;

/// Parses `sql` into a [`query::ParsedQuery`]. Thin alias over
/// [`parser::parse`] matching the programmatic API's naming.
pub fn new_parsed_query(sql: &str, charset: Option<&str>, collation: Option<&str>) -> query::ParsedQuery {
    parser::parse(sql, charset, collation)
}

/// Returns the process-wide rule catalog.
pub fn list_heuristic_rules() -> &'static indexmap::IndexMap<&'static str, catalog::RuleMeta> {
    catalog::catalog()
}

/// Runs every enabled heuristic rule against `parsed` and folds in the
/// `ERR.000` syntax-failure finding when the secondary parser rejected
/// the input. Does not resolve conflicts, apply the ignore list, or
/// score — that happens in [`format::format`], which is where external
/// collaborators' `FindingSet`s are merged in too.
pub fn audit(parsed: &query::ParsedQuery, config: &config::AuditConfig, enabled_codes: Option<&[String]>) -> FindingSet {
    let mut findings = rules::audit(parsed, config, enabled_codes);
    if let Some(syntax_failure) = rules::syntax_failure_finding(parsed) {
        if findings.is_ok_only() {
            findings.remove(catalog::OK_CODE);
        }
        findings.insert(syntax_failure);
    }
    findings
}

/// End-to-end convenience wrapper: parses, audits, and formats in one
/// call. `finding_sets` lets callers merge in collaborator-produced sets
/// (explain/profiling/trace/index) alongside this crate's own heuristic
/// findings; pass an empty slice when none apply.
pub fn format_suggest(
    sql: &str,
    current_db: Option<&str>,
    config: &config::AuditConfig,
    extra_finding_sets: Vec<FindingSet>
) -> (FindingSet, String) {
    let parsed = new_parsed_query(sql, None, None);
    let own = audit(&parsed, config, None);
    let mut all = vec![own];
    all.extend(extra_finding_sets);
    format::format(sql, current_db, &config.report_type, &parsed, config, all)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_folds_in_syntax_failure_finding() {
        let config = config::AuditConfig::default();
        let parsed = new_parsed_query("SELECT FROM FROM FROM", None, None);
        let findings = audit(&parsed, &config, None);
        assert!(findings.contains("ERR.000"));
    }

    #[test]
    fn format_suggest_round_trips_a_clean_query() {
        let config = config::AuditConfig::default();
        let (findings, rendered) = format_suggest("select id from tbl where id = 1", None, &config, vec![]);
        assert!(findings.is_ok_only());
        assert!(rendered.contains("OK") || rendered.contains("\"HeuristicRules\""));
    }

    #[test]
    fn format_suggest_flags_missing_where() {
        let config = config::AuditConfig::default();
        let (findings, _) = format_suggest("select id from tbl", None, &config, vec![]);
        assert!(findings.contains("CLA.001"));
    }
}
