//! Quoted-literal escaping shared by the Turtle writer and the triple view.

use std::borrow::Cow;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnescapeError {
    #[error("dangling backslash at byte {position}")]
    DanglingBackslash { position: usize },
    #[error("unsupported escape '\\{found}' at byte {position}")]
    UnsupportedEscape { found: char, position: usize },
}

/// Escapes text for a double-quoted literal.
///
/// Backslash, double quote, LF, CR and TAB become two-character escapes;
/// everything else is copied. Borrowed when nothing needs escaping.
pub fn escape_literal(text: &str) -> Cow<'_, str> {
    if !text.contains(['\\', '"', '\n', '\r', '\t']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

/// Inverse of [`escape_literal`].
///
/// # Errors
///
/// Fails on a trailing backslash or an escape [`escape_literal`] never emits.
pub fn unescape_literal(escaped: &str) -> Result<String, UnescapeError> {
    let mut text = String::with_capacity(escaped.len());
    let mut chars = escaped.char_indices();
    while let Some((position, ch)) = chars.next() {
        if ch != '\\' {
            text.push(ch);
            continue;
        }
        let Some((_, code)) = chars.next() else {
            return Err(UnescapeError::DanglingBackslash { position });
        };
        let decoded = match code {
            '\\' => '\\',
            '"' => '"',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            found => return Err(UnescapeError::UnsupportedEscape { found, position }),
        };
        text.push(decoded);
    }
    Ok(text)
}
