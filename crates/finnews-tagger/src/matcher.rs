//! Compiled per-ticker rules and the matcher that applies them.

use std::collections::BTreeSet;

use finnews_traits::Symbol;
use finnews_traits::types::join_tickers;
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::config::TickerConfig;
use crate::normalize::normalize_text;
use crate::pattern::{name_to_pattern, symbol_to_pattern};

/// A ticker and the patterns that identify it in normalized text.
///
/// Holds the symbol pattern first, then the canonical-name pattern, then one
/// pattern per alias. Any single match counts as a hit.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    ticker: Symbol,
    patterns: Vec<Regex>,
}

impl CompiledRule {
    /// Compile the rule for `ticker` from its name and aliases.
    pub fn compile(ticker: &str, name: Option<&str>, aliases: &[String]) -> Self {
        let sources = symbol_to_pattern(ticker)
            .into_iter()
            .chain(name.and_then(name_to_pattern))
            .chain(aliases.iter().filter_map(|a| name_to_pattern(a)));

        let mut patterns = Vec::new();
        for source in sources {
            match RegexBuilder::new(&source).case_insensitive(true).build() {
                Ok(re) => patterns.push(re),
                Err(e) => warn!(ticker, pattern = %source, "skipping pattern: {e}"),
            }
        }

        Self {
            ticker: ticker.trim().to_string(),
            patterns,
        }
    }

    /// The ticker this rule identifies.
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Number of compiled patterns.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Whether any pattern occurs anywhere in already-normalized text.
    pub fn is_match(&self, normalized: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(normalized))
    }
}

/// Tags text with the configured tickers it mentions.
///
/// Rules are compiled once from a [`TickerConfig`] and are immutable
/// afterwards.
///
/// # Example
///
/// ```
/// use finnews_tagger::{TickerConfig, TickerMatcher};
///
/// let cfg = TickerConfig::with_universe(["AAPL", "TSLA"])
///     .name("AAPL", "Apple")
///     .name("TSLA", "Tesla");
/// let matcher = TickerMatcher::new(&cfg);
///
/// assert_eq!(matcher.find("Apple's earnings beat; tsla slips"), vec!["AAPL", "TSLA"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TickerMatcher {
    rules: Vec<CompiledRule>,
}

impl TickerMatcher {
    /// Compile one rule per ticker in the universe.
    pub fn new(config: &TickerConfig) -> Self {
        let rules: Vec<CompiledRule> = config
            .universe
            .iter()
            .map(|t| CompiledRule::compile(t, config.name_of(t), config.aliases_of(t)))
            .filter(|r| r.pattern_count() > 0)
            .collect();

        debug!(
            tickers = rules.len(),
            patterns = rules.iter().map(CompiledRule::pattern_count).sum::<usize>(),
            "compiled ticker rules"
        );

        Self { rules }
    }

    /// Compiled rules in universe order.
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Number of tickers with at least one rule.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the matcher has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Sorted, deduplicated tickers mentioned in `text`.
    pub fn find(&self, text: &str) -> Vec<Symbol> {
        self.find_normalized(&normalize_text(text))
    }

    /// Like [`find`](Self::find) for text that is already normalized.
    pub fn find_normalized(&self, normalized: &str) -> Vec<Symbol> {
        let hits: BTreeSet<&str> = self
            .rules
            .iter()
            .filter(|r| r.is_match(normalized))
            .map(CompiledRule::ticker)
            .collect();
        hits.into_iter().map(str::to_string).collect()
    }

    /// Matched tickers in stored form: comma-joined, empty if none.
    pub fn tag(&self, text: &str) -> String {
        join_tickers(&self.find(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn matcher() -> TickerMatcher {
        let cfg = TickerConfig::with_universe(["TSLA", "AAPL", "GM", "MCD", "KO", "IBM"])
            .name("TSLA", "Tesla")
            .name("AAPL", "Apple")
            .name("GM", "General Motors")
            .name("MCD", "McDonald's")
            .name("KO", "Coca-Cola")
            .name("IBM", "  ")
            .aliases("TSLA", &["Elon Musk's carmaker"])
            .aliases("KO", &["Coke"]);
        TickerMatcher::new(&cfg)
    }

    #[rstest]
    #[case("tsla rallies")]
    #[case("TSLA rallies")]
    #[case("Tsla rallies")]
    #[case("Shares of $TSLA rallied")]
    fn test_symbol_case_insensitive(#[case] text: &str) {
        assert_eq!(matcher().find(text), vec!["TSLA"]);
    }

    #[rstest]
    #[case("Apple reported record revenue")]
    #[case("Apple's earnings topped estimates")]
    #[case("Apple\u{2019}s earnings topped estimates")]
    fn test_possessive_name(#[case] text: &str) {
        assert_eq!(matcher().find(text), vec!["AAPL"]);
    }

    #[test]
    fn test_symbol_word_boundary() {
        assert!(matcher().find("A programmer joined the team").is_empty());
        assert!(matcher().find("Old dogma dies hard").is_empty());
        assert!(matcher().find("Kosher kombucha").is_empty());
        assert!(matcher().find("The pineapple harvest").is_empty());
    }

    #[test]
    fn test_multiword_name_across_line_breaks() {
        assert_eq!(matcher().find("General\n   Motors recalls trucks"), vec!["GM"]);
    }

    #[test]
    fn test_name_already_possessive() {
        assert_eq!(matcher().find("McDonald's raises prices"), vec!["MCD"]);
        assert_eq!(matcher().find("McDonald\u{2019}s raises prices"), vec!["MCD"]);
    }

    #[test]
    fn test_alias_and_stripped_punctuation() {
        assert_eq!(matcher().find("Elon Musk\u{2019}s carmaker cuts prices"), vec!["TSLA"]);
        assert_eq!(matcher().find("Coke sales rise"), vec!["KO"]);
        // "Coca-Cola" compiles to "coca cola"; a spaced mention matches.
        assert_eq!(matcher().find("coca  cola sales rise"), vec!["KO"]);
        // The hyphenated spelling in text does not fill the whitespace gap.
        assert!(matcher().find("Coca-Cola beats estimates").is_empty());
    }

    #[test]
    fn test_blank_name_keeps_symbol_rule() {
        let m = matcher();
        let ibm = m.rules().iter().find(|r| r.ticker() == "IBM").unwrap();
        assert_eq!(ibm.pattern_count(), 1);
        assert_eq!(m.find("IBM unveils chip"), vec!["IBM"]);
    }

    #[test]
    fn test_output_sorted_and_unique() {
        let found = matcher().find("Tesla and TSLA and Apple and Tesla's rival GM");
        assert_eq!(found, vec!["AAPL", "GM", "TSLA"]);
        assert_eq!(
            matcher().tag("Tesla and TSLA and Apple and Tesla's rival GM"),
            "AAPL,GM,TSLA"
        );
    }

    #[test]
    fn test_empty_config_matches_nothing() {
        let m = TickerMatcher::new(&TickerConfig::default());
        assert!(m.is_empty());
        assert!(m.find("Apple Tesla TSLA").is_empty());
        assert_eq!(m.tag("anything"), "");
    }

    #[test]
    fn test_names_outside_universe_are_ignored() {
        let cfg = TickerConfig::with_universe(["AAPL"]).name("MSFT", "Microsoft");
        let m = TickerMatcher::new(&cfg);
        assert!(m.find("Microsoft earnings").is_empty());
    }

    #[test]
    fn test_single_word_name_property() {
        for (ticker, name) in [("NVDA", "Nvidia"), ("AMZN", "Amazon"), ("F", "Ford")] {
            let cfg = TickerConfig::with_universe([ticker]).name(ticker, name);
            let m = TickerMatcher::new(&cfg);
            assert_eq!(m.find(&format!("Shares of {ticker} moved")), vec![ticker]);
        }
    }
}
