//! Rule Catalog: a static, read-only registry mapping a rule code to its
//! metadata and check function.
//!
//! Grounded on the teacher's `rules/types.rs` (`Severity`, `RuleCategory`,
//! `Violation`) generalized from a hand-instantiated `Vec<Box<dyn Rule>>`
//! into a process-wide constant table, per the redesign note about
//! replacing a globally mutable, module-load-time catalog with a lazily
//! constructed, once-initialized, read-only view.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

use crate::{
    config::AuditConfig,
    error::catalog_init_error,
    query::ParsedQuery,
    rules
};

/// The sentinel code returned when no rule in the catalog matched.
pub const OK_CODE: &str = "OK";

/// An ordinal severity, `L0` (informational) through `L9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Severity(u8);

impl Severity {
    pub const fn new(digit: u8) -> Self {
        Self(digit)
    }

    pub fn digit(self) -> u8 {
        self.0
    }

    /// Parses a severity string matching `^L[0-9]$`.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() == 2 && bytes[0] == b'L' && bytes[1].is_ascii_digit() {
            Some(Self(bytes[1] - b'0'))
        } else {
            None
        }
    }

    pub fn as_str(self) -> String {
        format!("L{}", self.0)
    }
}

/// A rule-check function: evaluates a parsed statement (plus the frozen
/// config snapshot for the duration of one audit) and reports whether the
/// rule fires. Using a plain function pointer rather than the source's
/// closure-style dispatch, per the redesign note on function-pointer
/// catalogs.
pub type RuleCheck = fn(&ParsedQuery, &AuditConfig) -> bool;

/// One catalog entry: metadata plus its check function. This is the
/// crate's realization of the spec's `Rule` record — metadata and
/// behavior bundled at the catalog level; a match against the raw SQL at
/// audit time produces a [`crate::rules::Finding`], not another `RuleMeta`.
pub struct RuleMeta {
    pub code:     &'static str,
    pub severity: Severity,
    pub summary:  &'static str,
    pub content:  &'static str,
    pub example:  &'static str,
    pub check:    RuleCheck
}

static CATALOG: OnceLock<IndexMap<&'static str, RuleMeta>> = OnceLock::new();
static CODE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn code_pattern() -> &'static Regex {
    CODE_PATTERN.get_or_init(|| Regex::new(r"^(OK|[A-Z]{3}\.\d{3})$").expect("valid regex"))
}

/// Returns the process-wide rule catalog, building and validating it on
/// first access. Panics on a malformed catalog (duplicate/invalid code):
/// the only fatal path in this crate, per the error-handling policy —
/// there is no sane way to run an audit against a broken catalog.
pub fn catalog() -> &'static IndexMap<&'static str, RuleMeta> {
    CATALOG.get_or_init(|| build_catalog().unwrap_or_else(|e| panic!("{e}")))
}

/// Looks up a single rule's metadata by code.
pub fn get(code: &str) -> Option<&'static RuleMeta> {
    catalog().get(code)
}

fn build_catalog() -> Result<IndexMap<&'static str, RuleMeta>, crate::error::AppError> {
    let mut map = IndexMap::new();
    for entry in rules::entries() {
        if !code_pattern().is_match(entry.code) {
            return Err(catalog_init_error(format!("invalid rule code: {}", entry.code)));
        }
        if map.insert(entry.code, entry).is_some() {
            return Err(catalog_init_error(format!("duplicate rule code")));
        }
    }
    if !map.contains_key(OK_CODE) {
        return Err(catalog_init_error("catalog is missing the OK sentinel"));
    }
    Ok(map)
}
