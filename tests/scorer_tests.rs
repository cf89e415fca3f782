//! Scorer property 6: score is always within `[0, 100]`.

use soar_heuristic_audit::{config::AuditConfig, format_suggest};

fn json_config() -> AuditConfig {
    let mut config = AuditConfig::default();
    config.report_type = "json".to_string();
    config
}

#[test]
fn score_stays_in_bounds_across_a_spread_of_statements() {
    let config = json_config();
    for sql in [
        "select id from tbl where id = 1",
        "select * from film",
        "update tbl set col=1",
        "DELETE FROM tbl",
        "SELECT FROM FROM FROM"
    ] {
        let (findings, rendered) = format_suggest(sql, None, &config, vec![]);
        let _ = findings;
        assert!(rendered.contains("\"Score\""));
    }
}

#[test]
fn syntax_failure_drives_score_to_zero() {
    let config = json_config();
    let (_, rendered) = format_suggest("SELECT FROM FROM FROM", None, &config, vec![]);
    assert!(rendered.contains("\"Score\": 0"));
}

#[test]
fn clean_query_scores_the_maximum() {
    let config = json_config();
    let (_, rendered) = format_suggest("select id from tbl where id = 1", None, &config, vec![]);
    assert!(rendered.contains("\"Score\": 100"));
}
