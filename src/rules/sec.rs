//! `SEC.*` — security-sensitive patterns.

use std::sync::OnceLock;

use regex::Regex;

use crate::{
    catalog::{RuleMeta, Severity},
    config::AuditConfig,
    query::{ParsedQuery, QueryKind}
};

static PLAINTEXT_SECRET_RE: OnceLock<Regex> = OnceLock::new();

fn plaintext_secret_pattern() -> &'static Regex {
    PLAINTEXT_SECRET_RE.get_or_init(|| {
        Regex::new(r"(?i)\b(password|passwd|secret|api_key|token)\s*=\s*'[^']+'").expect("valid regex")
    })
}

pub(super) fn entries() -> Vec<RuleMeta> {
    vec![RuleMeta {
        code:     "SEC.001",
        severity: Severity::new(6),
        summary:  "Credential-shaped column assigned a literal string",
        content:  "A column named like a credential (`password`, `secret`, `api_key`, ...) is \
                   assigned a literal string directly, suggesting the value was never hashed or \
                   is being written in plaintext.",
        example:  "INSERT INTO users (email, password) VALUES ('a@b.com', 'hunter2')",
        check:    check_plaintext_secret_assignment
    }]
}

fn check_plaintext_secret_assignment(parsed: &ParsedQuery, _config: &AuditConfig) -> bool {
    matches!(parsed.kind(), QueryKind::Insert | QueryKind::Update) && plaintext_secret_pattern().is_match(&parsed.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn plaintext_password_update_fires() {
        let parsed = parser::parse("UPDATE users SET password = 'hunter2' WHERE id = 1", None, None);
        assert!(check_plaintext_secret_assignment(&parsed, &AuditConfig::default()));
    }

    #[test]
    fn unrelated_column_does_not_fire() {
        let parsed = parser::parse("UPDATE users SET name = 'hunter2' WHERE id = 1", None, None);
        assert!(!check_plaintext_secret_assignment(&parsed, &AuditConfig::default()));
    }
}
