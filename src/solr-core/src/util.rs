//! Query-string helpers.

/// Escape Lucene query-parser metacharacters in user-supplied text so it can
/// be embedded verbatim in a `q` parameter.
pub fn escape_query_chars(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(
            c,
            '+' | '-'
                | '!'
                | '('
                | ')'
                | '{'
                | '}'
                | '['
                | ']'
                | '^'
                | '"'
                | '~'
                | '*'
                | '?'
                | ':'
                | '&'
                | '|'
                | '\\'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_query_chars() {
        assert_eq!(escape_query_chars("borges"), "borges");
        assert_eq!(escape_query_chars("a:b"), "a\\:b");
        assert_eq!(escape_query_chars("[* TO *]"), "\\[\\* TO \\*\\]");
        assert_eq!(escape_query_chars("c++"), "c\\+\\+");
    }
}
