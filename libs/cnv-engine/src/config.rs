use std::path::Path;

use serde::Deserialize;

use crate::error::EngineError;

/// Root configuration, parsed from TOML.
///
/// ```toml
/// [[strategies]]
/// name = "hex"
/// backend = "strtol"
/// config = { base = 16, uppercase = true }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CnvConfig {
    /// Named strategy presets.
    #[serde(default)]
    pub strategies: Vec<StrategyConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategyConfig {
    pub name: String,
    /// Backend name: `strtol`, `printf`, `stream`, `lexical` or `spirit`.
    pub backend: String,
    #[serde(default)]
    pub config: Option<toml::Value>,
}

impl StrategyConfig {
    /// The `config` table as a format-independent value.
    pub fn config_value(&self) -> Result<Option<serde_json::Value>, EngineError> {
        self.config
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| EngineError::Config(e.to_string()))
    }
}

impl CnvConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| std::io::Error::new(e.kind(), format!("{}: {e}", path.display())))?;
        Self::parse(&content).map_err(|e| e.with_context(path.display()))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, EngineError> {
        toml::from_str(toml_str).map_err(|e| EngineError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strategy_tables() {
        let config = CnvConfig::parse(
            r#"
            [[strategies]]
            name = "hex"
            backend = "strtol"
            config = { base = 16, uppercase = true }

            [[strategies]]
            name = "plain"
            backend = "lexical"
            "#,
        )
        .unwrap();

        assert_eq!(config.strategies.len(), 2);
        assert_eq!(config.strategies[0].name, "hex");
        let value = config.strategies[0].config_value().unwrap().unwrap();
        assert_eq!(value["base"], 16);
        assert_eq!(value["uppercase"], true);
        assert!(config.strategies[1].config_value().unwrap().is_none());
    }

    #[test]
    fn empty_file_has_no_presets() {
        assert!(CnvConfig::parse("").unwrap().strategies.is_empty());
    }

    #[test]
    fn rejects_unknown_keys_and_missing_backend() {
        assert!(matches!(
            CnvConfig::parse("port = 1"),
            Err(EngineError::Config(_))
        ));
        assert!(CnvConfig::parse("[[strategies]]\nname = \"x\"").is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CnvConfig::load("/nonexistent/cnv.toml").unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
        assert!(err.to_string().contains("/nonexistent/cnv.toml"));
    }
}
