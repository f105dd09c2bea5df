use crate::backend::Backend;
use crate::config::{CnvConfig, StrategyConfig};
use crate::error::EngineError;
use crate::params;
use crate::registry::{Registry, Strategy};

impl Registry {
    /// Build the registry from a parsed configuration.
    ///
    /// Starts from the built-in entries and adds every configured preset.
    /// The first bad entry aborts with an error naming it.
    pub fn bootstrap(config: &CnvConfig) -> Result<Self, EngineError> {
        let mut registry = Registry::builtin();
        for backend in Backend::ALL {
            tracing::debug!(strategy = %backend, "registered built-in strategy");
        }

        for strategy_cfg in &config.strategies {
            let ctx = format!("strategy '{}'", strategy_cfg.name);
            let strategy = create_strategy(strategy_cfg).map_err(|e| e.with_context(&ctx))?;

            tracing::info!(
                strategy = %strategy_cfg.name,
                backend = %strategy.backend(),
                params = strategy.params().len(),
                "registered strategy"
            );
            registry.register(strategy)?;
        }

        Ok(registry)
    }

    /// Load a TOML file and bootstrap from it.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, EngineError> {
        let config = CnvConfig::load(path)?;
        Self::bootstrap(&config)
    }
}

/// Resolve backend, parse and validate params, build the converter.
fn create_strategy(cfg: &StrategyConfig) -> Result<Strategy, EngineError> {
    let backend: Backend = cfg.backend.parse()?;
    let raw = cfg.config_value()?;
    let params = params::parse_params(raw.as_ref(), backend)?;
    Strategy::new(cfg.name.clone(), backend, params)
}

#[cfg(test)]
mod tests {
    use cnv_api::config::{Base, Param};
    use cnv_api::error::ConfigError;
    use cnv_api::{convert, ConverterExt};

    use super::*;

    fn bootstrap(toml: &str) -> Result<Registry, EngineError> {
        Registry::bootstrap(&CnvConfig::parse(toml)?)
    }

    #[test]
    fn builtins_are_always_present() {
        let registry = bootstrap("").unwrap();
        assert_eq!(registry.len(), Backend::ALL.len());
        for backend in Backend::ALL {
            assert_eq!(registry.get(backend.name()).unwrap().name(), backend.name());
        }
    }

    #[test]
    fn presets_resolve_by_name() {
        let registry = bootstrap(
            r#"
            [[strategies]]
            name = "hex"
            backend = "strtol"
            config = { base = 16, uppercase = true }
            "#,
        )
        .unwrap();

        let hex = registry.strategy("hex").unwrap();
        assert_eq!(hex.backend(), Backend::Strtol);
        assert_eq!(hex.params(), &[Param::Base(Base::Hex), Param::Uppercase(true)]);

        let cnv = registry.get("hex").unwrap();
        assert_eq!(convert::<String>(255i32, &*cnv).value(), "FF");
        assert_eq!(cnv.parse::<i32>("ff"), Some(255));
    }

    #[test]
    fn overrides_apply_after_preset() {
        let registry = bootstrap(
            r#"
            [[strategies]]
            name = "hex"
            backend = "strtol"
            config = { base = 16 }
            "#,
        )
        .unwrap();
        let overrides = params::parse_assignments(["field_width=4", "fill_char=0"]).unwrap();
        let cnv = registry.configured("hex", Some(&overrides)).unwrap();
        assert_eq!(convert::<String>(255i32, &*cnv).value(), "00ff");

        let err = registry
            .configured("lexical", Some(&overrides))
            .err()
            .unwrap();
        assert!(matches!(
            err,
            EngineError::Param(ConfigError::Unrecognized { strategy: "lexical", .. })
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = bootstrap(
            r#"
            [[strategies]]
            name = "strtol"
            backend = "stream"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::DuplicateStrategy(name) if name == "strtol"));

        let err = bootstrap(
            r#"
            [[strategies]]
            name = "a"
            backend = "spirit"

            [[strategies]]
            name = "a"
            backend = "lexical"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::DuplicateStrategy(_)));
    }

    #[test]
    fn bad_entries_name_the_strategy() {
        let err = bootstrap(
            r#"
            [[strategies]]
            name = "fast"
            backend = "karma"
            "#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "unknown backend: strategy 'fast': karma");

        let err = bootstrap(
            r#"
            [[strategies]]
            name = "bin"
            backend = "printf"
            config = { base = 2 }
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("strategy 'bin'"), "{err}");
    }

    #[test]
    fn unknown_strategy_lookup() {
        let registry = Registry::builtin();
        assert!(matches!(
            registry.get("nope"),
            Err(EngineError::UnknownStrategy(name)) if name == "nope"
        ));
    }
}
