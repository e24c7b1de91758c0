//! Ticker configuration.
//!
//! The configuration is a YAML mapping with three optional sections:
//!
//! ```yaml
//! universe: [AAPL, TSLA]
//! map:
//!   AAPL: Apple
//!   TSLA: Tesla
//! aliases:
//!   TSLA: [Tesla Motors, Elon Musk's carmaker]
//! ```
//!
//! Each section is read independently. A missing, null, or malformed section
//! degrades to empty; only a missing file is an error.

use std::collections::BTreeMap;
use std::path::Path;

use finnews_traits::{FinnewsError, Result, Symbol};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use tracing::{debug, warn};

/// Default location of the ticker configuration file.
pub const DEFAULT_TICKERS_PATH: &str = "configs/tickers.yaml";

/// Tickers the matcher knows about, with their names and aliases.
///
/// `universe` is unique and keeps file order. Keys in `name_map` and
/// `alias_map` that are not in the universe are kept but never used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Configured ticker symbols.
    pub universe: Vec<Symbol>,
    /// Ticker to canonical company name.
    pub name_map: BTreeMap<Symbol, String>,
    /// Ticker to alias strings, in file order.
    pub alias_map: BTreeMap<Symbol, Vec<String>>,
}

impl TickerConfig {
    /// Build a configuration from a universe alone.
    pub fn with_universe<I, S>(universe: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let mut cfg = Self::default();
        for t in universe {
            cfg.push_ticker(t.into());
        }
        cfg
    }

    /// Set the canonical name for a ticker.
    #[must_use]
    pub fn name(mut self, ticker: &str, name: &str) -> Self {
        self.name_map.insert(ticker.to_string(), name.to_string());
        self
    }

    /// Append aliases for a ticker.
    #[must_use]
    pub fn aliases(mut self, ticker: &str, aliases: &[&str]) -> Self {
        self.alias_map
            .entry(ticker.to_string())
            .or_default()
            .extend(aliases.iter().map(|a| a.to_string()));
        self
    }

    /// Load the configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`FinnewsError::ConfigNotFound`] when the file does not exist and
    /// [`FinnewsError::Io`] when it exists but cannot be read. Malformed content
    /// is not an error; it yields an empty configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FinnewsError::ConfigNotFound(path.to_path_buf()),
            _ => FinnewsError::Io(e),
        })?;
        let cfg = Self::from_yaml_str(&raw);
        debug!(
            path = %path.display(),
            tickers = cfg.universe.len(),
            names = cfg.name_map.len(),
            aliases = cfg.alias_map.len(),
            "loaded ticker configuration"
        );
        Ok(cfg)
    }

    /// Parse configuration text. Never fails.
    pub fn from_yaml_str(raw: &str) -> Self {
        let doc: Value = match serde_yaml::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                warn!("ticker configuration is not valid YAML, using empty universe: {e}");
                return Self::default();
            }
        };

        let Value::Mapping(_) = doc else {
            if !doc.is_null() {
                warn!("ticker configuration is not a mapping, using empty universe");
            }
            return Self::default();
        };

        let mut cfg = Self::default();

        match doc.get("universe") {
            Some(Value::Sequence(items)) => {
                for item in items {
                    match scalar_string(item) {
                        Some(t) => cfg.push_ticker(t),
                        None => debug!("skipping non-scalar universe entry"),
                    }
                }
            }
            Some(Value::Null) | None => {}
            Some(_) => warn!("`universe` is not a sequence, ignoring"),
        }

        match doc.get("map") {
            Some(Value::Mapping(entries)) => {
                for (k, v) in entries {
                    if let (Some(ticker), Some(name)) = (scalar_string(k), scalar_string(v)) {
                        cfg.name_map.insert(ticker, name);
                    }
                }
            }
            Some(Value::Null) | None => {}
            Some(_) => warn!("`map` is not a mapping, ignoring"),
        }

        match doc.get("aliases") {
            Some(Value::Mapping(entries)) => {
                for (k, v) in entries {
                    let Some(ticker) = scalar_string(k) else {
                        continue;
                    };
                    let aliases: Vec<String> = match v {
                        Value::Sequence(items) => items.iter().filter_map(scalar_string).collect(),
                        other => scalar_string(other).into_iter().collect(),
                    };
                    cfg.alias_map.entry(ticker).or_default().extend(aliases);
                }
            }
            Some(Value::Null) | None => {}
            Some(_) => warn!("`aliases` is not a mapping, ignoring"),
        }

        cfg
    }

    /// Canonical name for a ticker, if configured.
    pub fn name_of(&self, ticker: &str) -> Option<&str> {
        self.name_map.get(ticker).map(String::as_str)
    }

    /// Aliases for a ticker; empty when none are configured.
    pub fn aliases_of(&self, ticker: &str) -> &[String] {
        self.alias_map.get(ticker).map_or(&[], Vec::as_slice)
    }

    /// Whether the universe is empty.
    pub fn is_empty(&self) -> bool {
        self.universe.is_empty()
    }

    fn push_ticker(&mut self, ticker: Symbol) {
        let ticker = ticker.trim().to_string();
        if !ticker.is_empty() && !self.universe.contains(&ticker) {
            self.universe.push(ticker);
        }
    }
}

fn scalar_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
universe:
  - AAPL
  - TSLA
  - GM
  - TSLA
map:
  AAPL: Apple
  TSLA: Tesla
  XOM: Exxon Mobil
aliases:
  TSLA:
    - Tesla Motors
    - Elon Musk's carmaker
  GM: General Motors
"#;

    #[test]
    fn test_parse_sections() {
        let cfg = TickerConfig::from_yaml_str(SAMPLE);
        assert_eq!(cfg.universe, vec!["AAPL", "TSLA", "GM"]);
        assert_eq!(cfg.name_of("AAPL"), Some("Apple"));
        assert_eq!(cfg.name_of("XOM"), Some("Exxon Mobil"));
        assert_eq!(cfg.aliases_of("TSLA").len(), 2);
        assert_eq!(cfg.aliases_of("GM"), &["General Motors".to_string()]);
        assert!(cfg.aliases_of("AAPL").is_empty());
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let cfg = TickerConfig::from_yaml_str("universe: [MSFT]\n");
        assert_eq!(cfg.universe, vec!["MSFT"]);
        assert!(cfg.name_map.is_empty());
        assert!(cfg.alias_map.is_empty());
    }

    #[test]
    fn test_null_sections() {
        let cfg = TickerConfig::from_yaml_str("universe:\nmap:\naliases:\n");
        assert!(cfg.is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_empty() {
        let cfg = TickerConfig::from_yaml_str("universe: [AAPL\n  map: {");
        assert_eq!(cfg, TickerConfig::default());
    }

    #[test]
    fn test_wrong_shapes_degrade_per_section() {
        let cfg = TickerConfig::from_yaml_str("universe: AAPL\nmap:\n  TSLA: Tesla\n");
        assert!(cfg.universe.is_empty());
        assert_eq!(cfg.name_of("TSLA"), Some("Tesla"));

        assert!(TickerConfig::from_yaml_str("- a\n- b\n").is_empty());
        assert!(TickerConfig::from_yaml_str("").is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = TickerConfig::load("/definitely/not/here/tickers.yaml").unwrap_err();
        assert!(matches!(err, FinnewsError::ConfigNotFound(_)));
    }

    #[test]
    fn test_load_file() {
        let path = std::env::temp_dir().join(format!("finnews-tickers-{}.yaml", std::process::id()));
        std::fs::write(&path, SAMPLE).unwrap();
        let cfg = TickerConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(cfg.universe.len(), 3);
    }

    #[test]
    fn test_shipped_config() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../configs/tickers.yaml");
        let cfg = TickerConfig::load(path).unwrap();
        assert!(cfg.universe.contains(&"GM".to_string()));
        assert!(!cfg.is_empty());
    }

    #[test]
    fn test_builder() {
        let cfg = TickerConfig::with_universe(["AAPL", " ", "AAPL"])
            .name("AAPL", "Apple")
            .aliases("AAPL", &["iPhone maker"]);
        assert_eq!(cfg.universe, vec!["AAPL"]);
        assert_eq!(cfg.aliases_of("AAPL"), &["iPhone maker".to_string()]);
    }
}
