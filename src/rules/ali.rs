//! `ALI.*` — alias hygiene.

use crate::{
    catalog::{RuleMeta, Severity},
    config::AuditConfig,
    query::ParsedQuery
};

pub(super) fn entries() -> Vec<RuleMeta> {
    vec![
        RuleMeta {
            code:     "ALI.001",
            severity: Severity::new(2),
            summary:  "Table alias declared without the AS keyword",
            content:  "An alias was found on a table reference without an explicit AS keyword. \
                       Relying on the implicit form makes the alias easy to miss on review and \
                       harder to distinguish from a typo'd second table name.",
            example:  "SELECT * FROM orders o WHERE o.id = 1  -- prefer: FROM orders AS o",
            check:    check_implicit_alias
        },
        RuleMeta {
            code:     "ALI.002",
            severity: Severity::new(3),
            summary:  "Wildcard column expanded and aliased to a single name",
            content:  "A `tbl.*` projection was given a single column alias, which silently \
                       discards every column after the first and is almost always a mistake.",
            example:  "SELECT o.* AS summary FROM orders o",
            check:    |parsed, _| parsed.shape.as_ref().is_some_and(|s| s.wildcard_alias)
        },
        RuleMeta {
            code:     "ALI.003",
            severity: Severity::new(1),
            summary:  "Alias is identical to the name it aliases",
            content:  "A table or column was aliased to exactly its own name (case-insensitively), \
                       adding noise without renaming anything.",
            example:  "SELECT name AS name FROM users",
            check:    check_same_name_alias
        },
    ]
}

fn check_implicit_alias(parsed: &ParsedQuery, _config: &AuditConfig) -> bool {
    let Some(shape) = &parsed.shape else {
        return false;
    };
    if shape.table_aliases.is_empty() {
        return false;
    }
    let lowered = parsed.text.to_lowercase();
    shape
        .table_aliases
        .iter()
        .any(|binding| !lowered.contains(&format!("as {}", binding.alias.to_lowercase())))
}

fn check_same_name_alias(parsed: &ParsedQuery, _config: &AuditConfig) -> bool {
    let Some(shape) = &parsed.shape else {
        return false;
    };
    shape.table_aliases.iter().any(|b| b.is_same_name()) || shape.column_aliases.iter().any(|b| b.is_same_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn implicit_alias_fires_without_as() {
        let parsed = parser::parse("SELECT * FROM orders o", None, None);
        assert!(check_implicit_alias(&parsed, &AuditConfig::default()));
    }

    #[test]
    fn explicit_alias_does_not_fire() {
        let parsed = parser::parse("SELECT * FROM orders AS o", None, None);
        assert!(!check_implicit_alias(&parsed, &AuditConfig::default()));
    }

    #[test]
    fn same_name_alias_fires() {
        let parsed = parser::parse("SELECT name AS name FROM users", None, None);
        assert!(check_same_name_alias(&parsed, &AuditConfig::default()));
    }

    #[test]
    fn wildcard_alias_fires_on_its_own_documented_example() {
        let parsed = parser::parse("SELECT o.* AS summary FROM orders o", None, None);
        assert!(parsed.shape.unwrap().wildcard_alias);
    }
}
