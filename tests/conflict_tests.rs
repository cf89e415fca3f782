//! Conflict Resolver, exercised through the full formatting pipeline
//! where suppression is actually applied.

use soar_heuristic_audit::{config::AuditConfig, format_suggest};

#[test]
fn wildcard_alias_suppresses_generic_select_star_in_rendered_output() {
    let config = AuditConfig::default();
    let (findings, _) = format_suggest("select tbl.* as c1,c2,c3 from tbl where id < 1000", None, &config, vec![]);
    assert!(findings.contains("ALI.002"));
    assert!(!findings.contains("COL.001"));
}

#[test]
fn unrelated_findings_on_a_missing_where_select_survive_resolution() {
    let config = AuditConfig::default();
    let (findings, _) = format_suggest("select * from film", None, &config, vec![]);
    assert!(findings.contains("COL.001"));
    assert!(findings.contains("CLA.001"));
}
