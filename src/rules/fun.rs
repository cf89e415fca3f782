//! `FUN.*` — function usage that defeats indexing or miscounts rows.

use crate::{
    catalog::{RuleMeta, Severity},
    config::AuditConfig,
    query::{ParsedQuery, types::CountArgument}
};

pub(super) fn entries() -> Vec<RuleMeta> {
    vec![
        RuleMeta {
            code:     "FUN.001",
            severity: Severity::new(3),
            summary:  "WHERE wraps an indexed column in a function",
            content:  "Applying a function to a column before comparing it (`YEAR(created_at) = \
                       2020`) prevents the optimizer from using an index on that column; rewrite \
                       as a range on the bare column instead.",
            example:  "... WHERE YEAR(created_at) = 2020",
            check:    |parsed, _| parsed.shape.as_ref().is_some_and(|s| s.function_on_where_column)
        },
        RuleMeta {
            code:     "FUN.002",
            severity: Severity::new(1),
            summary:  "COUNT(column) used where COUNT(*) would suffice",
            content:  "`COUNT(column)` skips NULLs, which is rarely the intent when counting \
                       rows; if NULLs should count, use `COUNT(*)`, otherwise make the NULL \
                       exclusion explicit.",
            example:  "SELECT COUNT(email) FROM users",
            check:    |parsed, _| has_count_argument(parsed, CountArgument::Column)
        },
        RuleMeta {
            code:     "FUN.005",
            severity: Severity::new(2),
            summary:  "COUNT(constant) used instead of COUNT(*)",
            content:  "`COUNT(1)` and `COUNT(*)` are equivalent on every modern engine this core \
                       targets; the constant form suggests a stale optimization myth rather than \
                       intent.",
            example:  "SELECT COUNT(1) FROM users",
            check:    |parsed, _| has_count_argument(parsed, CountArgument::Constant)
        },
    ]
}

fn has_count_argument(parsed: &ParsedQuery, wanted: CountArgument) -> bool {
    parsed
        .shape
        .as_ref()
        .is_some_and(|s| s.count_calls.iter().any(|c| *c == wanted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    #[test]
    fn function_wrapped_where_column_fires() {
        let parsed = parser::parse("SELECT 1 FROM t WHERE YEAR(created_at) = 2020", None, None);
        assert!(parsed.shape.unwrap().function_on_where_column);
    }

    #[test]
    fn count_column_fires_fun_002() {
        let parsed = parser::parse("SELECT COUNT(email) FROM users", None, None);
        assert!(has_count_argument(&parsed, CountArgument::Column));
    }

    #[test]
    fn count_constant_fires_fun_005() {
        let parsed = parser::parse("SELECT COUNT(1) FROM users", None, None);
        assert!(has_count_argument(&parsed, CountArgument::Constant));
        assert!(!has_count_argument(&parsed, CountArgument::Column));
    }
}
