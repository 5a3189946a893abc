//! Helpers for composing query expressions.

use std::sync::LazyLock;

use regex::Regex;

static AUTHOR_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"AA\.AuN\s*==\s*'([^']*)'").expect("valid author name pattern")
});

/// Turn comma-separated phrases into space-separated tokens, quoting
/// phrases that contain whitespace.
///
/// `some words, foo, bar` becomes `"some words" foo bar`. Input without a
/// comma is returned unchanged.
#[must_use]
pub fn parenthesize_phrases(query: &str) -> String {
    if !query.contains(',') {
        return query.to_string();
    }

    query
        .split(',')
        .map(str::trim)
        .map(|phrase| {
            if phrase.contains(char::is_whitespace) {
                format!("\"{phrase}\"")
            } else {
                phrase.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Combine expressions with `OR(...)`.
///
/// A single expression is returned as is; no expressions yields `None`.
#[must_use]
pub fn or_all<S: AsRef<str>>(exprs: &[S]) -> Option<String> {
    match exprs {
        [] => None,
        [single] => Some(single.as_ref().to_string()),
        many => Some(format!(
            "OR({})",
            many.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",")
        )),
    }
}

/// Expression matching papers that reference `paper_id`.
#[must_use]
pub fn references(paper_id: u64) -> String {
    format!("RId={paper_id}")
}

/// Natural-language interpret query for an author's papers.
#[must_use]
pub fn author_query(author: &str) -> String {
    format!("papers by {}", author.trim())
}

/// Normalized author names compared in an expression, in order of
/// appearance and without duplicates.
#[must_use]
pub fn author_names_in(expr: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for cap in AUTHOR_NAME_RE.captures_iter(expr) {
        let name = cap[1].to_string();
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parenthesize_phrases() {
        assert_eq!(parenthesize_phrases("some words, foo, bar"), "\"some words\" foo bar");
        assert_eq!(parenthesize_phrases("no commas here"), "no commas here");
        assert_eq!(parenthesize_phrases("a,b"), "a b");
    }

    #[test]
    fn test_or_all() {
        assert_eq!(or_all::<&str>(&[]), None);
        assert_eq!(or_all(&["Y=2000"]), Some("Y=2000".to_string()));
        assert_eq!(or_all(&["Y=2000", "Y=2001"]), Some("OR(Y=2000,Y=2001)".to_string()));
    }

    #[test]
    fn test_references_and_author_query() {
        assert_eq!(references(42), "RId=42");
        assert_eq!(author_query("  albert einstein "), "papers by albert einstein");
    }

    #[test]
    fn test_author_names_in() {
        let expr = "OR(Composite(AA.AuN=='albert einstein'),Composite(AA.AuN == 'a einstein'),\
                    Composite(AA.AuN=='albert einstein'))";
        assert_eq!(author_names_in(expr), vec!["albert einstein", "a einstein"]);
        assert!(author_names_in("Y=2000").is_empty());
    }
}
