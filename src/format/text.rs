//! `text` and `lint` report rendering.
//!
//! Grounded on the teacher's `format_text_summary` (labeled-field block
//! per item, blank line between items) generalized from one block per
//! query to one block per finding.

use crate::{catalog::catalog, format::Partitioned, rules::Finding};

/// One labeled-field block per finding, across every partition in
/// category order (error, explain, profiling, trace, index, heuristic).
pub fn render_text(sql: &str, fingerprint: &str, id: &str, score: u8, partitioned: &Partitioned) -> String {
    let mut out = String::new();
    out.push_str(&format!("Query: {sql}\n"));
    out.push_str(&format!("Fingerprint: {fingerprint}\n"));
    out.push_str(&format!("ID: {id}\n"));
    out.push_str(&format!("Score: {score}\n\n"));

    let all = [
        &partitioned.error,
        &partitioned.explain,
        &partitioned.profiling,
        &partitioned.trace,
        &partitioned.index,
        &partitioned.heuristic
    ];
    for bucket in all {
        for finding in bucket.iter() {
            out.push_str(&render_block(finding));
            out.push('\n');
        }
    }
    out
}

fn render_block(finding: &Finding) -> String {
    let mut block = format!("Code: {}\n", finding.code);
    match catalog().get(finding.code.as_str()) {
        Some(meta) => {
            block.push_str(&format!("Severity: {}\n", meta.severity.as_str()));
            block.push_str(&format!("Summary: {}\n", meta.summary));
            if !meta.content.is_empty() {
                block.push_str(&format!("Content: {}\n", meta.content));
            }
            if !meta.example.is_empty() {
                block.push_str(&format!("Example: {}\n", meta.example));
            }
        }
        None => {
            if let Some(content) = finding.content.as_deref().filter(|c| !c.is_empty()) {
                block.push_str(&format!("Content: {content}\n"));
            }
        }
    }
    block
}

/// One line per finding, `CODE summary`; `OK` and `EXP.*` are suppressed.
pub fn render_lint(partitioned: &Partitioned) -> String {
    let all = [
        &partitioned.error,
        &partitioned.profiling,
        &partitioned.trace,
        &partitioned.index,
        &partitioned.heuristic
    ];
    let mut lines = Vec::new();
    for bucket in all {
        for finding in bucket.iter() {
            if finding.code == "OK" {
                continue;
            }
            let summary = catalog()
                .get(finding.code.as_str())
                .map(|m| m.summary)
                .or(finding.content.as_deref())
                .unwrap_or("");
            lines.push(format!("{} {}", finding.code, summary));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partitioned_with(codes: &[&str]) -> Partitioned {
        let mut p = Partitioned::default();
        for code in codes {
            p.heuristic.push(Finding::new(*code));
        }
        p
    }

    #[test]
    fn text_report_carries_header_fields() {
        let p = partitioned_with(&["COL.001"]);
        let rendered = render_text("SELECT * FROM t", "select * from t", "abc123", 95, &p);
        assert!(rendered.contains("Query: SELECT * FROM t"));
        assert!(rendered.contains("Code: COL.001"));
        assert!(rendered.contains("Score: 95"));
    }

    #[test]
    fn lint_suppresses_ok_and_explain() {
        let mut p = partitioned_with(&["COL.001"]);
        p.heuristic.push(Finding::new("OK"));
        p.explain.push(Finding::new("EXP.001"));
        let rendered = render_lint(&p);
        assert!(rendered.contains("COL.001"));
        assert!(!rendered.contains("OK"));
        assert!(!rendered.contains("EXP.001"));
    }
}
