//! Scorer: reduces a [`FindingSet`] to an integer score in `[0, 100]`.
//!
//! New module, grounded on the teacher's severity-ordinal idea
//! (`Severity` implementing `Ord` for "errors first" sorting) generalized
//! from a three-level enum into the catalog's `L0`-`L9` digit scale and
//! the arithmetic this core's scoring rule specifies.

use log::warn;

use crate::{catalog::catalog, error::score_arithmetic_error, rules::FindingSet};

const STARTING_SCORE: i32 = 100;
const PENALTY_PER_SEVERITY_DIGIT: i32 = 5;

/// Prefixes of categories this core never owns severity metadata for:
/// they arrive only by merging a collaborator's [`FindingSet`] (`ERR.000`
/// is the one exception, synthesized by [`crate::rules::syntax_failure_finding`],
/// but it is handled by the hard-zero rule below rather than the digit
/// penalty, so it is included here too).
const EXTERNAL_CATEGORY_PREFIXES: &[&str] = &["ERR.", "EXP.", "PRO.", "TRA.", "IDX."];

/// Starts at 100 and subtracts `severity_digit * 5` for every real,
/// catalog-backed finding; any finding in the `ERR.*` category carrying
/// non-empty content forces the score to 0 outright (a parse/execution
/// failure overrides the heuristic penalty). A finding whose code is
/// neither in the catalog nor a recognized externally-produced category
/// is a corrupt rule code: logged and the whole score falls to 0,
/// conservatively. Clamped to `[0, 100]`.
pub fn score(findings: &FindingSet) -> u8 {
    if findings.is_ok_only() {
        return STARTING_SCORE as u8;
    }

    let has_hard_error = findings
        .iter()
        .any(|f| f.code.starts_with("ERR.") && f.content.as_deref().is_some_and(|c| !c.is_empty()));
    if has_hard_error {
        return 0;
    }

    let mut total = STARTING_SCORE;
    for finding in findings.iter() {
        if finding.code == "OK" {
            continue;
        }
        if let Some(meta) = catalog().get(finding.code.as_str()) {
            total -= meta.severity.digit() as i32 * PENALTY_PER_SEVERITY_DIGIT;
            continue;
        }
        if EXTERNAL_CATEGORY_PREFIXES.iter().any(|p| finding.code.starts_with(p)) {
            continue;
        }
        let err = score_arithmetic_error(finding.code.as_str());
        warn!("{err}");
        return 0;
    }
    total.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Finding;

    fn set(codes: &[&str]) -> FindingSet {
        let mut set = FindingSet::new();
        for code in codes {
            set.insert(Finding::new(*code));
        }
        set
    }

    #[test]
    fn ok_only_scores_100() {
        assert_eq!(score(&set(&["OK"])), 100);
    }

    #[test]
    fn single_low_severity_finding_subtracts_a_little() {
        let s = score(&set(&["ALI.003"]));
        assert!(s < 100 && s > 80);
    }

    #[test]
    fn score_never_goes_below_zero() {
        let many: Vec<&str> = vec!["CLA.015"; 1];
        let s = score(&set(&many));
        assert!(s <= 100);
    }

    #[test]
    fn non_empty_err_content_forces_zero() {
        let mut findings = set(&["ALI.001"]);
        findings.insert(Finding::with_content("ERR.000", "unexpected token near FROM"));
        assert_eq!(score(&findings), 0);
    }

    #[test]
    fn err_with_no_content_does_not_force_zero() {
        let mut findings = set(&["ALI.001"]);
        findings.insert(Finding::new("ERR.000"));
        assert!(score(&findings) > 0);
    }

    #[test]
    fn unrecognized_code_outside_catalog_and_external_categories_zeroes_score() {
        let findings = set(&["ZZZ.999"]);
        assert_eq!(score(&findings), 0);
    }

    #[test]
    fn externally_merged_category_without_severity_does_not_penalize() {
        let findings = set(&["EXP.001"]);
        assert_eq!(score(&findings), 100);
    }
}
