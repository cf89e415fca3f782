//! Blacklist predicate: decides whether a statement should skip auditing
//! entirely before any parser or rule runs.
//!
//! Grounded on the teacher's allow/deny list matching in `config.rs`
//! (literal string comparison), generalized to also accept a pattern as a
//! case-insensitive regex, since the driver-facing config documents this
//! crate targets use both forms for the same list.

use std::sync::OnceLock;

use log::debug;
use regex::RegexBuilder;

/// True if `sql` is covered by any entry of `patterns`: either an exact
/// literal match, or a match against the entry compiled as a
/// case-insensitive regex. A pattern that fails to compile as a regex is
/// only ever tried as a literal and is logged, not rejected — a config
/// author's typo shouldn't make the blacklist fail closed.
pub fn in_blacklist(sql: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| {
        if pattern == sql {
            return true;
        }
        match compiled(pattern) {
            Some(re) => re.is_match(sql),
            None => false
        }
    })
}

fn compiled(pattern: &str) -> Option<regex::Regex> {
    static CACHE: OnceLock<std::sync::Mutex<std::collections::HashMap<String, Option<regex::Regex>>>> =
        OnceLock::new();
    let cache = CACHE.get_or_init(Default::default);
    let mut guard = cache.lock().expect("blacklist pattern cache poisoned");
    if let Some(entry) = guard.get(pattern) {
        return entry.clone();
    }
    let compiled = RegexBuilder::new(pattern).case_insensitive(true).build().ok();
    if compiled.is_none() {
        debug!("blacklist pattern is not a valid regex, only literal matching applies: {pattern}");
    }
    guard.insert(pattern.to_string(), compiled.clone());
    compiled
}
