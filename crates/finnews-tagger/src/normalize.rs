//! Text normalization applied before matching.

use unicode_normalization::UnicodeNormalization;

/// Normalize text for matching.
///
/// NFC-composes, maps curly quotes to straight quotes and en/em dashes to a
/// hyphen, lowercases, collapses whitespace runs to a single space, and trims.
///
/// # Example
///
/// ```
/// use finnews_tagger::normalize_text;
///
/// assert_eq!(
///     normalize_text("  Apple\u{2019}s   Q3 \u{2014}\n beat "),
///     "apple's q3 - beat"
/// );
/// ```
pub fn normalize_text(s: &str) -> String {
    let mapped: String = s
        .nfc()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            other => other,
        })
        .collect();

    mapped
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
