//! Text literal encoding for the generated specification

/// Escape a text value: backslashes are doubled, then quotes are escaped
pub fn escape_text(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Inverse of [`escape_text`]
///
/// A backslash takes the next character literally; a trailing lone
/// backslash is kept as is.
pub fn unescape_text(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            out.push(chars.next().unwrap_or('\\'));
        } else {
            out.push(c);
        }
    }
    out
}

/// Quoted, escaped text literal
pub fn quote(text: &str) -> String {
    format!("\"{}\"", escape_text(text))
}
