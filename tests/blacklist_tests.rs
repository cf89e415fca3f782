//! Blacklist property 8: `in_blacklist(sql)` is true iff some entry
//! equals `sql` literally or matches it as a case-insensitive regex.

use soar_heuristic_audit::blacklist::in_blacklist;

#[test]
fn literal_entry_matches_exactly() {
    let patterns = vec!["SELECT * FROM legacy".to_string()];
    assert!(in_blacklist("SELECT * FROM legacy", &patterns));
    assert!(!in_blacklist("SELECT * FROM legacy2", &patterns));
}

#[test]
fn regex_entry_matches_case_insensitively() {
    let patterns = vec![r"^select \* from legacy$".to_string()];
    assert!(in_blacklist("SELECT * FROM legacy", &patterns));
    assert!(in_blacklist("select * from legacy", &patterns));
}

#[test]
fn neither_literal_nor_regex_match_returns_false() {
    let patterns = vec!["DROP TABLE users".to_string()];
    assert!(!in_blacklist("SELECT * FROM users", &patterns));
}
