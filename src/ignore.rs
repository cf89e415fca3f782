//! Ignore Filter: drops findings whose code matches a configured prefix
//! glob, with special handling for the `OK` sentinel.
//!
//! Grounded on the teacher's `RulesConfig::disabled` exact-match idiom in
//! `rules.rs`, generalized to prefix-glob matching per the wider matching
//! semantics this catalog's codes need (`"COL.*"` should suppress every
//! `COL` code, not just a literal one).

use crate::rules::FindingSet;

/// True if `code` matches `pattern` under prefix-glob semantics: a
/// trailing `*` is stripped and the remainder is treated as a literal
/// prefix; an empty pattern (or a pattern that is only `*`) matches
/// nothing; the literal `OK` never matches through this mechanism.
pub fn is_ignored(code: &str, ignore_patterns: &[String]) -> bool {
    if code == "OK" {
        return false;
    }
    ignore_patterns.iter().any(|pattern| matches_pattern(code, pattern))
}

fn matches_pattern(code: &str, pattern: &str) -> bool {
    let prefix = pattern.strip_suffix('*').unwrap_or(pattern);
    if prefix.is_empty() {
        return false;
    }
    code.starts_with(prefix)
}

/// Applies [`is_ignored`] to every member of `findings`, then separately
/// drops the `OK` sentinel when the ignore list names it explicitly and
/// the set still has real findings left (an `OK`-only set always keeps
/// its sentinel, so the caller sees a positive confirmation rather than
/// an empty report).
pub fn apply(mut findings: FindingSet, ignore_patterns: &[String]) -> FindingSet {
    let to_remove: Vec<String> = findings
        .codes()
        .filter(|code| is_ignored(code, ignore_patterns))
        .map(str::to_string)
        .collect();
    for code in to_remove {
        findings.remove(&code);
    }

    if ignore_patterns.iter().any(|p| p == "OK") && findings.len() > 1 && findings.contains("OK") {
        findings.remove("OK");
    }

    if findings.is_empty() {
        findings.insert(crate::rules::Finding::new("OK"));
    }

    findings
}
