//! Regex pattern construction from configured names.
//!
//! Names come from free-text configuration and may contain any punctuation.
//! Building a pattern never fails: characters outside letters, digits,
//! underscores, whitespace, and apostrophes are replaced by spaces before the
//! remaining words are escaped.

use crate::normalize::normalize_text;

/// Separator placed between the words of a multi-word name.
const WORD_GAP: &str = r"\s+";

/// Optional possessive suffix appended to names.
const POSSESSIVE: &str = "('s)?";

/// Build the pattern matching a company name or alias.
///
/// Returns `None` for names that are blank once cleaned.
///
/// # Example
///
/// ```
/// use finnews_tagger::name_to_pattern;
///
/// assert_eq!(
///     name_to_pattern("Apple Inc.").as_deref(),
///     Some(r"\bapple\s+inc('s)?\b")
/// );
/// assert_eq!(name_to_pattern(" ?! "), None);
/// ```
pub fn name_to_pattern(name: &str) -> Option<String> {
    let cleaned: String = normalize_text(name)
        .chars()
        .map(|c| if is_name_char(c) { c } else { ' ' })
        .collect();

    let words: Vec<&str> = cleaned.split_whitespace().collect();
    if words.is_empty() {
        return None;
    }

    let mut core = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join(WORD_GAP);

    if !words.join(" ").ends_with("'s") {
        core.push_str(POSSESSIVE);
    }

    Some(format!(r"\b{core}\b"))
}

/// Build the pattern matching a bare ticker symbol.
///
/// Returns `None` for blank symbols.
pub fn symbol_to_pattern(symbol: &str) -> Option<String> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return None;
    }
    Some(format!(r"\b{}\b", regex::escape(symbol)))
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\'' || c.is_whitespace()
}
