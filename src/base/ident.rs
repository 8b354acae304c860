//! Identifier checks for user-supplied ids (`\defgroup`, `\page`, `\section`).

/// Returns true if `id` can be used as a group/page/anchor id.
///
/// Ids end up in link targets, so they are restricted to XID characters
/// plus `-`.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| unicode_ident::is_xid_continue(c) || c == '-')
}

/// Strip one pair of surrounding double quotes.
pub fn strip_quotes(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
