//! Parser Facade: the two parsers degrade independently and the facade
//! always returns a `ParsedQuery`, never an error.

use soar_heuristic_audit::new_parsed_query;

#[test]
fn valid_sql_parses_on_both_legs() {
    let parsed = new_parsed_query("SELECT id FROM tbl WHERE id = 1", None, None);
    assert!(parsed.primary_tree.is_some());
    assert!(parsed.parse_error.is_none());
    assert!(!parsed.secondary_trees.is_empty());
}

#[test]
fn malformed_sql_still_returns_a_parsed_query() {
    let parsed = new_parsed_query("SELECT FROM FROM FROM", None, None);
    assert_eq!(parsed.text, "SELECT FROM FROM FROM");
    assert!(parsed.primary_tree.is_none());
    assert!(parsed.parse_error.is_some());
}

#[test]
fn charset_and_collation_hints_do_not_change_parse_outcome() {
    let without_hints = new_parsed_query("SELECT id FROM tbl WHERE id = 1", None, None);
    let with_hints = new_parsed_query("SELECT id FROM tbl WHERE id = 1", Some("utf8mb4"), Some("utf8mb4_general_ci"));
    assert_eq!(without_hints.primary_tree.is_some(), with_hints.primary_tree.is_some());
}
