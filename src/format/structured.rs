//! `markdown` / `html` / `explain-digest` / `duplicate-key-checker`
//! rendering: the same structured-report layout (header, score,
//! MySQL-execute-failed block, Explain/Profiling/Trace/Index/Heuristic
//! blocks) with only the markup differing per `Kind`.
//!
//! Grounded on the teacher's `format_analysis_result` (header banner,
//! `colored` for terminal emphasis, body appended beneath) generalized
//! from a single banner-plus-body shape into the six-block report this
//! catalog's external collaborators (explain/profiling/trace/index) need
//! alongside the heuristic findings.

use crate::{catalog::catalog, config::AuditConfig, format::Partitioned, rules::Finding};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Markdown,
    Html,
    ExplainDigest,
    DuplicateKeyChecker
}

impl Kind {
    fn section(self, title: &str) -> String {
        match self {
            Kind::Markdown | Kind::ExplainDigest | Kind::DuplicateKeyChecker => format!("## {title}\n"),
            Kind::Html => format!("<h2>{title}</h2>\n")
        }
    }

    fn header(self, title: &str) -> String {
        match self {
            Kind::Markdown | Kind::ExplainDigest | Kind::DuplicateKeyChecker => format!("# {title}\n"),
            Kind::Html => format!("<h1>{title}</h1>\n")
        }
    }

    fn line(self, text: &str) -> String {
        match self {
            Kind::Html => format!("<p>{text}</p>\n"),
            _ => format!("{text}\n")
        }
    }

    fn code_block(self, text: &str) -> String {
        match self {
            Kind::Html => format!("<pre><code>{text}</code></pre>\n"),
            _ => format!("```sql\n{text}\n```\n")
        }
    }

    fn item(self, text: &str) -> String {
        match self {
            Kind::Html => format!("<li>{text}</li>\n"),
            _ => format!("- {text}\n")
        }
    }
}

/// Renders the header (query per `ExplainSQLReportType`, current
/// database), the score, and every non-empty block in the fixed order
/// Error, Explain, Profiling, Trace, Index, Heuristic. `duplicate-key-checker`
/// and `explain-digest` share this layout: the spec names them as variants
/// of the same structured report rather than distinct schemas, so a
/// caller picks the block it cares about out of one rendering.
pub fn render(
    kind: Kind,
    sql: &str,
    current_db: Option<&str>,
    fingerprint_text: &str,
    fingerprint_id: &str,
    score: u8,
    config: &AuditConfig,
    partitioned: &Partitioned
) -> String {
    let mut out = String::new();
    out.push_str(&kind.header("SQL Audit Report"));

    let query_rendering = match config.explain_sql_report_type.as_str() {
        "fingerprint" => fingerprint_text,
        // "pretty" falls back to raw: the pretty-printer is an external
        // collaborator this core only calls through a narrow interface
        // it does not own.
        _ => sql
    };
    out.push_str(&kind.code_block(query_rendering));
    out.push_str(&kind.line(&format!("Fingerprint ID: {fingerprint_id}")));
    if let Some(db) = current_db {
        out.push_str(&kind.line(&format!("Database: {db}")));
    }
    out.push_str(&kind.line(&format!("Score: {score}")));

    render_section(&mut out, kind, "MySQL Execute Failed", &partitioned.error, true);
    render_section(&mut out, kind, "Explain", &partitioned.explain, false);
    render_section(&mut out, kind, "Profiling", &partitioned.profiling, false);
    render_section(&mut out, kind, "Trace", &partitioned.trace, false);
    render_section(&mut out, kind, "Index", &partitioned.index, false);
    render_section(&mut out, kind, "Heuristic", &partitioned.heuristic, false);

    out
}

fn render_section(out: &mut String, kind: Kind, title: &str, findings: &[Finding], prefer_content: bool) {
    if findings.is_empty() {
        return;
    }
    out.push_str(&kind.section(title));
    for finding in findings {
        let text = if prefer_content {
            finding
                .content
                .as_deref()
                .filter(|c| !c.is_empty())
                .map(|c| format!("{}: {}", finding.code, c))
                .unwrap_or_else(|| finding.code.to_string())
        } else {
            match catalog().get(finding.code.as_str()) {
                Some(meta) => format!("{} — {}", finding.code, meta.summary),
                None => finding.code.to_string()
            }
        };
        out.push_str(&kind.item(&text));
    }
}
