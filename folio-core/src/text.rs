//! Small text helpers shared by the theme table and the client.

/// Upper-case the first character of `s`, leaving the rest untouched.
///
/// Works on chars, not bytes, so multi-byte first letters are handled.
pub fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Truncate `text` to at most `word_limit` space-separated words.
///
/// Appends `"..."` when anything was cut.
pub fn truncate_words(text: &str, word_limit: usize) -> String {
    let words: Vec<&str> = text.split(' ').collect();
    if words.len() > word_limit {
        format!("{}...", words[..word_limit].join(" "))
    } else {
        text.to_string()
    }
}
