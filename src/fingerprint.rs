//! Fingerprinter: normalizes SQL text into a parameter-stripped canonical
//! form and derives a stable hex digest from it.
//!
//! Grounded on the teacher's content-hashing idiom (hashing normalized
//! text for cache-key stability) generalized from a single cache key into
//! the two-function contract this core exposes.

use std::sync::OnceLock;

use regex::Regex;

const RESERVED_WORDS: &[&str] = &[
    "select", "from", "where", "insert", "into", "update", "delete", "and", "or", "not", "in",
    "like", "group", "by", "order", "limit", "offset", "join", "inner", "left", "right", "outer",
    "on", "as", "distinct", "having", "set", "values", "null", "is", "between", "exists", "union",
    "all", "case", "when", "then", "else", "end", "desc", "asc", "count", "sum", "avg", "min",
    "max", "truncate", "table", "create", "alter", "drop"
];

struct Patterns {
    block_comment: Regex,
    line_comment:  Regex,
    single_quoted: Regex,
    double_quoted: Regex,
    hex_literal:   Regex,
    bit_literal:   Regex,
    numeric:       Regex,
    keyword:       Regex,
    in_list:       Regex,
    whitespace:    Regex
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

fn patterns() -> &'static Patterns {
    PATTERNS.get_or_init(|| Patterns {
        block_comment: Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"),
        line_comment:  Regex::new(r"(--|#)[^\n]*").expect("valid regex"),
        single_quoted: Regex::new(r"'(?:[^'\\]|\\.)*'").expect("valid regex"),
        double_quoted: Regex::new(r#""(?:[^"\\]|\\.)*""#).expect("valid regex"),
        hex_literal:   Regex::new(r"0[xX][0-9A-Fa-f]+").expect("valid regex"),
        bit_literal:   Regex::new(r"(?i)b'[01]+'").expect("valid regex"),
        numeric:       Regex::new(r"\b\d+(?:\.\d+)?\b").expect("valid regex"),
        keyword: Regex::new(&format!(r"(?i)\b({})\b", RESERVED_WORDS.join("|"))).expect("valid regex"),
        in_list:    Regex::new(r"(?i)\bin\s*\(\s*\?(?:\s*,\s*\?)+\s*\)").expect("valid regex"),
        whitespace: Regex::new(r"\s+").expect("valid regex")
    })
}

/// Produces the canonical, parameter-stripped form of a SQL statement:
/// comments stripped, literals replaced with `?`, reserved words
/// lowercased, `IN (?, ?, ...)` folded to `in(?+)`, whitespace collapsed.
///
/// Idempotent: `fingerprint(fingerprint(sql)) == fingerprint(sql)`,
/// because every transform it applies is already a fixed point of itself
/// (stripped comments stay stripped, `?` stays `?`, lowercased keywords
/// stay lowercase, single spaces stay single spaces).
pub fn fingerprint(text: &str) -> String {
    let p = patterns();

    let mut out = p.block_comment.replace_all(text, "").into_owned();
    out = p.line_comment.replace_all(&out, "").into_owned();
    out = p.single_quoted.replace_all(&out, "?").into_owned();
    out = p.double_quoted.replace_all(&out, "?").into_owned();
    out = p.hex_literal.replace_all(&out, "?").into_owned();
    out = p.bit_literal.replace_all(&out, "?").into_owned();
    out = p.numeric.replace_all(&out, "?").into_owned();
    out = p
        .keyword
        .replace_all(&out, |caps: &regex::Captures<'_>| caps[0].to_lowercase())
        .into_owned();
    out = p.in_list.replace_all(&out, "in(?+)").into_owned();
    out = p.whitespace.replace_all(&out, " ").into_owned();
    out.trim().to_string()
}

/// Derives a stable, deterministic 32-character lowercase hex digest of a
/// fingerprint string. Collisions are tolerated (best-effort identity).
pub fn id(fingerprint_text: &str) -> String {
    format!("{:x}", md5::compute(fingerprint_text.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_comparison_ends_in_placeholder() {
        let fp = fingerprint("SELECT * FROM t WHERE id = 42");
        assert!(fp.ends_with("id = ?"), "got: {fp}");
    }

    #[test]
    fn in_list_collapses_to_plus_form() {
        let fp = fingerprint("select * from t where id in (1, 2, 3)");
        assert!(fp.contains("in(?+)"), "got: {fp}");
    }

    #[test]
    fn id_is_32_lowercase_hex_chars() {
        let fp = fingerprint("SELECT 1");
        let hash = id(&fp);
        assert_eq!(hash.len(), 32);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn id_depends_only_on_fingerprint_text() {
        let a = id(&fingerprint("SELECT 1 FROM t WHERE id = 1"));
        let b = id(&fingerprint("select   1 from   t where id = 1"));
        // Both reduce to the same canonical form once keywords are
        // lowercased and whitespace collapsed.
        assert_eq!(a, b);
    }

    #[test]
    fn fingerprint_is_idempotent() {
        let once = fingerprint("SELECT * FROM t WHERE id IN (1,2,3) /* comment */");
        let twice = fingerprint(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn strips_comments() {
        let fp = fingerprint("SELECT 1 -- trailing\nFROM t /* block */ WHERE 1=1");
        assert!(!fp.contains("trailing"));
        assert!(!fp.contains("block"));
    }
}
