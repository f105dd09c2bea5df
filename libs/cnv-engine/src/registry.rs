use std::collections::HashMap;
use std::sync::Arc;

use cnv_api::config::Param;
use cnv_api::converter::Converter;

use crate::backend::Backend;
use crate::error::EngineError;
use crate::params;

/// A named, configured strategy.
pub struct Strategy {
    name: String,
    backend: Backend,
    params: Vec<Param>,
    converter: Arc<dyn Converter>,
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy")
            .field("name", &self.name)
            .field("backend", &self.backend)
            .field("params", &self.params)
            .finish()
    }
}

impl Strategy {
    pub(crate) fn new(name: String, backend: Backend, params: Vec<Param>) -> Result<Self, EngineError> {
        let converter = backend.build(params.iter().copied())?;
        Ok(Self {
            name,
            backend,
            params,
            converter,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Params applied on top of the backend defaults.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn converter(&self) -> Arc<dyn Converter> {
        self.converter.clone()
    }
}

/// Registry of every strategy the engine knows, by name.
///
/// Built once by [`Registry::bootstrap`] and read-only afterwards, so it can
/// be shared across threads without locking.
#[derive(Debug, Default)]
pub struct Registry {
    strategies: HashMap<String, Strategy>,
}

impl Registry {
    /// Registry holding one default-configured entry per backend, named
    /// after the backend.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        for backend in Backend::ALL {
            let name = backend.name().to_string();
            // Defaults are always valid.
            if let Ok(strategy) = Strategy::new(name.clone(), *backend, Vec::new()) {
                registry.strategies.insert(name, strategy);
            }
        }
        registry
    }

    pub(crate) fn register(&mut self, strategy: Strategy) -> Result<(), EngineError> {
        if self.strategies.contains_key(&strategy.name) {
            return Err(EngineError::DuplicateStrategy(strategy.name));
        }
        self.strategies.insert(strategy.name.clone(), strategy);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    pub fn strategy(&self, name: &str) -> Result<&Strategy, EngineError> {
        self.strategies
            .get(name)
            .ok_or_else(|| EngineError::UnknownStrategy(name.to_string()))
    }

    /// The configured converter registered under `name`.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Converter>, EngineError> {
        self.strategy(name).map(Strategy::converter)
    }

    /// Converter for `name` with `overrides` applied after its own params.
    ///
    /// `overrides` has the same shape as a strategy `config` table.
    pub fn configured(
        &self,
        name: &str,
        overrides: Option<&serde_json::Value>,
    ) -> Result<Arc<dyn Converter>, EngineError> {
        let strategy = self.strategy(name)?;
        let extra = params::parse_params(overrides, strategy.backend)
            .map_err(|e| e.with_context(format!("strategy '{name}'")))?;
        if extra.is_empty() {
            return Ok(strategy.converter());
        }
        let params = strategy.params.iter().copied().chain(extra);
        strategy
            .backend
            .build(params)
            .map_err(|e| EngineError::from(e).with_context(format!("strategy '{name}'")))
    }

    /// Strategies sorted by name.
    pub fn strategies(&self) -> Vec<&Strategy> {
        let mut all: Vec<_> = self.strategies.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}
