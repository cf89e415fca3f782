//! Formatter contracts: determinism (property 1) and the stable `json`
//! field surface named in the external-interfaces section.

use soar_heuristic_audit::{config::AuditConfig, format_suggest};

#[test]
fn format_suggest_is_deterministic_for_fixed_inputs_and_config() {
    let config = AuditConfig::default();
    let (_, a) = format_suggest("select * from film", None, &config, vec![]);
    let (_, b) = format_suggest("select * from film", None, &config, vec![]);
    assert_eq!(a, b);
}

#[test]
fn json_report_preserves_the_public_field_surface() {
    let mut config = AuditConfig::default();
    config.report_type = "json".to_string();
    let (_, rendered) = format_suggest("select * from film", Some("shop"), &config, vec![]);
    for key in [
        "\"ID\"",
        "\"Fingerprint\"",
        "\"Score\"",
        "\"Sample\"",
        "\"Explain\"",
        "\"HeuristicRules\"",
        "\"IndexRules\"",
        "\"Tables\""
    ] {
        assert!(rendered.contains(key), "missing {key}");
    }
    assert!(rendered.contains("\"film\""));
}

#[test]
fn lint_format_suppresses_ok_and_explain_codes() {
    let mut config = AuditConfig::default();
    config.report_type = "lint".to_string();
    let (_, rendered) = format_suggest("select id from tbl where id = 1", None, &config, vec![]);
    assert!(!rendered.contains("OK "));
}

#[test]
fn markdown_format_sections_a_missing_where_select() {
    let mut config = AuditConfig::default();
    config.report_type = "markdown".to_string();
    let (_, rendered) = format_suggest("select * from film", None, &config, vec![]);
    assert!(rendered.contains("## Heuristic"));
    assert!(rendered.contains("COL.001"));
}

#[test]
fn unrecognized_format_name_falls_back_rather_than_erroring() {
    let mut config = AuditConfig::default();
    config.report_type = "yaml".to_string();
    let (_, rendered) = format_suggest("select id from tbl where id = 1", None, &config, vec![]);
    assert!(!rendered.is_empty());
}
