//! Conflict Resolver: applies a static, pairwise suppression relation to a
//! [`FindingSet`] so a more specific finding doesn't sit alongside a more
//! generic one describing the same observation.
//!
//! Grounded on the teacher's `RulesConfig`-driven filtering idiom in
//! `rules.rs`, generalized per the redesign note that the original's
//! ad-hoc imperative deletions should become a static code-pair relation
//! resolved in one pass rather than branching logic.

use indexmap::IndexMap;
use std::sync::OnceLock;

use crate::rules::FindingSet;

/// `code -> codes suppressed when code is also present`. Kept as data, not
/// a match statement, so extending the relation never touches the
/// resolution algorithm.
fn suppression_relation() -> &'static IndexMap<&'static str, &'static [&'static str]> {
    static RELATION: OnceLock<IndexMap<&'static str, &'static [&'static str]>> = OnceLock::new();
    RELATION.get_or_init(|| {
        let mut map = IndexMap::new();
        // A wildcard alias already reports the underlying `SELECT *`
        // shape at a more specific level.
        map.insert("ALI.002", ["COL.001"].as_slice());
        // A fatal, WHERE-less UPDATE is the actionable finding; the
        // SET-list AND/comma mixup on the same statement is secondary.
        map.insert("CLA.015", ["RES.005"].as_slice());
        map
    })
}

/// Removes, from `findings`, every code that another present code
/// suppresses. One pass: suppression is not transitive in this relation,
/// so iterating once is sufficient.
pub fn resolve(mut findings: FindingSet) -> FindingSet {
    let relation = suppression_relation();
    let present: Vec<String> = findings.codes().map(str::to_string).collect();

    let mut to_remove = Vec::new();
    for code in &present {
        if let Some(suppressed) = relation.get(code.as_str()) {
            for victim in *suppressed {
                if findings.contains(victim) {
                    to_remove.push(victim.to_string());
                }
            }
        }
    }
    for code in to_remove {
        findings.remove(&code);
    }
    findings
}
