//! Rule Engine: runs every enabled catalog entry against a parsed
//! statement and assembles the resulting [`FindingSet`].
//!
//! Grounded on the teacher's `RuleRunner::analyze` (`rayon`-parallel
//! execution over a rule collection, one flat violation list merged at the
//! end) generalized from "one rule per query" to "one rule per parsed
//! statement, keyed by rule code" and from a `Vec<Box<dyn Rule>>` to the
//! catalog's function-pointer table, per the redesign note favoring data
//! over dynamic dispatch for a fixed, static rule set.

mod ali;
mod alt;
mod arg;
mod cla;
mod col;
mod dis;
mod fun;
mod grp;
mod joi;
mod key;
mod kwr;
mod lck;
mod lit;
mod res;
mod sec;
mod sta;
mod sub;
mod tbl;

use std::panic::{AssertUnwindSafe, catch_unwind};

use compact_str::CompactString;
use indexmap::IndexMap;
use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    catalog::{OK_CODE, RuleMeta, catalog},
    config::AuditConfig,
    error::rule_exception,
    query::ParsedQuery
};

/// Assembles the full catalog from every category submodule. The catalog
/// itself (`crate::catalog::catalog`) calls this once and caches the
/// result; this function owns the only place the rule set is enumerated.
pub(crate) fn entries() -> Vec<RuleMeta> {
    let mut all = Vec::new();
    all.push(RuleMeta {
        code:     OK_CODE,
        severity: crate::catalog::Severity::new(0),
        summary:  "No rule fired",
        content:  "The sentinel finding recorded when a statement passed every enabled rule.",
        example:  "",
        check:    |_, _| false
    });
    all.extend(ali::entries());
    all.extend(alt::entries());
    all.extend(arg::entries());
    all.extend(cla::entries());
    all.extend(col::entries());
    all.extend(dis::entries());
    all.extend(fun::entries());
    all.extend(grp::entries());
    all.extend(joi::entries());
    all.extend(key::entries());
    all.extend(kwr::entries());
    all.extend(lck::entries());
    all.extend(lit::entries());
    all.extend(res::entries());
    all.extend(sec::entries());
    all.extend(sta::entries());
    all.extend(sub::entries());
    all.extend(tbl::entries());
    all
}

/// One finding: a rule code plus the byte offset in the source text it
/// relates to. Every rule in this core reports statement-level
/// granularity (position `0`), since the underlying parse trees carry no
/// span information this crate propagates; `position` exists for a future
/// rule that can compute one without changing this type.
///
/// `content` is `None` for every catalog-backed finding — the catalog
/// entry's prose is the content, and callers look it up by code. It is
/// `Some` only for findings synthesized outside the catalog (`ERR.000`'s
/// parser message), whose text varies per audit run and so cannot live in
/// static rule metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub code:     CompactString,
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content:  Option<String>
}

impl Finding {
    pub fn new(code: impl Into<CompactString>) -> Self {
        Self {
            code:    code.into(),
            position: 0,
            content: None
        }
    }

    pub fn with_content(code: impl Into<CompactString>, content: impl Into<String>) -> Self {
        Self {
            code:    code.into(),
            position: 0,
            content: Some(content.into())
        }
    }
}

/// Synthesizes the `ERR.000` finding when the secondary parser failed.
/// `ERR.000` is core-owned (unlike `EXP`/`PRO`/`TRA`/`IDX`, which arrive
/// only by merging a collaborator's [`FindingSet`]) because a syntax
/// failure is something this crate observes directly; its content is the
/// parser's own message rather than static catalog prose.
pub fn syntax_failure_finding(parsed: &ParsedQuery) -> Option<Finding> {
    parsed
        .parse_error
        .as_deref()
        .map(|message| Finding::with_content("ERR.000", message))
}

/// A deduplicated-by-code set of findings for one statement. Last write
/// for a given code wins on merge, which is benign because catalog
/// metadata for a code never varies by audit run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FindingSet(IndexMap<CompactString, Finding>);

impl FindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, finding: Finding) {
        self.0.insert(finding.code.clone(), finding);
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    pub fn remove(&mut self, code: &str) -> Option<Finding> {
        self.0.shift_remove(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_ok_only(&self) -> bool {
        self.0.len() == 1 && self.0.contains_key(OK_CODE)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|c| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Finding> {
        self.0.values()
    }

    /// Merges `other` into `self`, `other` winning on a shared code.
    pub fn merge(&mut self, other: FindingSet) {
        for (code, finding) in other.0 {
            self.0.insert(code, finding);
        }
    }
}

/// Runs every catalog rule whose code is present in `enabled_codes`
/// (`None` means "run everything") against `parsed`, in parallel, and
/// returns the resulting [`FindingSet`]. A rule that panics is caught and
/// logged rather than propagated or allowed to poison the audit; a rule
/// synthesized from a failed secondary parse (`ERR.000`) is merged in by
/// the caller, not by this function, since it has no catalog check
/// function to invoke.
pub fn audit(parsed: &ParsedQuery, config: &AuditConfig, enabled_codes: Option<&[String]>) -> FindingSet {
    let rules: Vec<&RuleMeta> = catalog()
        .values()
        .filter(|r| r.code != OK_CODE)
        .filter(|r| match enabled_codes {
            Some(codes) => codes.iter().any(|c| c == r.code),
            None => true
        })
        .collect();

    let hits: Vec<Finding> = rules
        .par_iter()
        .filter_map(|rule| {
            let outcome = catch_unwind(AssertUnwindSafe(|| (rule.check)(parsed, config)));
            match outcome {
                Ok(true) => Some(Finding::new(rule.code)),
                Ok(false) => None,
                Err(_) => {
                    let err = rule_exception(rule.code, "rule panicked");
                    debug!("{err}");
                    None
                }
            }
        })
        .collect();

    let mut set = FindingSet::new();
    if hits.is_empty() {
        set.insert(Finding::new(OK_CODE));
    } else {
        for finding in hits {
            set.insert(finding);
        }
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn clean_query_yields_ok_only() {
        let parsed = parser::parse("SELECT id FROM tbl WHERE id = 1", None, None);
        let config = AuditConfig::default();
        let findings = audit(&parsed, &config, None);
        assert!(findings.is_ok_only());
    }

    #[test]
    fn missing_where_in_delete_fires() {
        let parsed = parser::parse("DELETE FROM tbl", None, None);
        let config = AuditConfig::default();
        let findings = audit(&parsed, &config, None);
        assert!(findings.contains("CLA.014"));
        assert!(!findings.contains(OK_CODE));
    }

    #[test]
    fn enabled_codes_filters_rule_set() {
        let parsed = parser::parse("DELETE FROM tbl", None, None);
        let config = AuditConfig::default();
        let enabled = vec!["ALI.001".to_string()];
        let findings = audit(&parsed, &config, Some(&enabled));
        assert!(!findings.contains("CLA.014"));
    }

    #[test]
    fn finding_set_merge_prefers_other() {
        let mut a = FindingSet::new();
        a.insert(Finding::new("ALI.001"));
        let mut b = FindingSet::new();
        b.insert(Finding {
            code:     "ALI.001".into(),
            position: 7,
            content:  None
        });
        a.merge(b);
        assert_eq!(a.iter().next().unwrap().position, 7);
    }

    #[test]
    fn syntax_failure_finding_carries_parser_message() {
        let parsed = parser::parse("SELECT FROM FROM FROM", None, None);
        let finding = syntax_failure_finding(&parsed).expect("secondary parser should have failed");
        assert_eq!(finding.code.as_str(), "ERR.000");
        assert!(finding.content.is_some());
    }

    #[test]
    fn syntax_failure_finding_absent_for_valid_sql() {
        let parsed = parser::parse("SELECT id FROM tbl WHERE id = 1", None, None);
        assert!(syntax_failure_finding(&parsed).is_none());
    }
}
