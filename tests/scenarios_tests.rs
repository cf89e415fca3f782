//! End-to-end scenarios: each statement audited through the full pipeline
//! (parse, run the heuristic catalog, fold in `ERR.000`) must surface the
//! named code and must not surface the named absent code.

use soar_heuristic_audit::{audit, config::AuditConfig, new_parsed_query};

fn run(sql: &str, config: &AuditConfig) -> soar_heuristic_audit::rules::FindingSet {
    let parsed = new_parsed_query(sql, None, None);
    audit(&parsed, config, None)
}

#[test]
fn implicit_alias_on_table_reference() {
    let findings = run("select name from tbl t1 where id < 1000", &AuditConfig::default());
    assert!(findings.contains("ALI.001"));
    assert!(!findings.contains("OK"));
}

#[test]
fn wildcard_alias_on_select_star() {
    let findings = run("select tbl.* as c1,c2,c3 from tbl where id < 1000", &AuditConfig::default());
    assert!(findings.contains("ALI.002"));
    assert!(!findings.contains("OK"));
}

#[test]
fn leading_wildcard_like_not_confused_with_no_wildcard() {
    let findings = run("select c1,c2,c3 from tbl where name like '%foo'", &AuditConfig::default());
    assert!(findings.contains("ARG.001"));
    assert!(!findings.contains("ARG.002"));
}

#[test]
fn like_without_wildcard_not_confused_with_leading_wildcard() {
    let findings = run("select c1,c2,c3 from tbl where name like 'foo'", &AuditConfig::default());
    assert!(findings.contains("ARG.002"));
    assert!(!findings.contains("ARG.001"));
}

#[test]
fn null_inside_in_list() {
    let findings = run("SELECT * FROM tb WHERE col IN (NULL)", &AuditConfig::default());
    assert!(findings.contains("ARG.004"));
    assert!(!findings.contains("OK"));
}

#[test]
fn update_missing_where_is_fatal() {
    let findings = run("update tbl set col=1", &AuditConfig::default());
    assert!(findings.contains("CLA.015"));
    assert!(!findings.contains("OK"));
}

#[test]
fn select_missing_where() {
    let findings = run("select id from tbl", &AuditConfig::default());
    assert!(findings.contains("CLA.001"));
    assert!(!findings.contains("OK"));
}

#[test]
fn select_star_with_no_other_issues() {
    let findings = run("select * from film", &AuditConfig::default());
    assert!(findings.contains("COL.001"));
    assert!(!findings.contains("OK"));
}

#[test]
fn unquoted_date_literal() {
    let findings = run("select col1,col2 from tbl where time < 2018-01-10", &AuditConfig::default());
    assert!(findings.contains("LIT.002"));
    assert!(!findings.contains("OK"));
}

#[test]
fn large_insert_batch_over_configured_threshold() {
    let mut config = AuditConfig::default();
    config.max_insert_value_rows = 1;
    let findings = run("INSERT INTO tb (a) VALUES (1), (2)", &config);
    assert!(findings.contains("ARG.012"));
    assert!(!findings.contains("OK"));
}

#[test]
fn clean_query_with_where_and_no_findings_is_ok_only() {
    let findings = run("select id from tbl where id = 1", &AuditConfig::default());
    assert!(findings.is_ok_only());
}
