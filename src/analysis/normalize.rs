//! Text fragment cleanup.

/// Clean a raw text fragment.
///
/// Typographic double quotes and the right single quote become their ASCII
/// equivalents; whitespace runs (including newlines and tabs) collapse to a
/// single space and the result is trimmed. Returns an empty string when
/// nothing meaningful remains.
pub fn normalize_text(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2019}' => '\'',
            other => other,
        })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}
