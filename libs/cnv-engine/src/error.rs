use cnv_api::error::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("config error: {0}")]
    Config(String),

    #[error("parameter error: {0}")]
    Param(#[from] ConfigError),

    #[error("strategy not found: {0}")]
    UnknownStrategy(String),

    #[error("unknown backend: {0}")]
    UnknownBackend(String),

    #[error("strategy '{0}' is defined more than once")]
    DuplicateStrategy(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Add context to the error.
    ///
    /// For `Param` variant, context is added to the inner `ConfigError`.
    /// For other message-carrying variants, context is prepended.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            EngineError::Param(e) => EngineError::Param(e.with_context(ctx)),
            EngineError::Config(msg) => EngineError::Config(format!("{ctx}: {msg}")),
            EngineError::UnknownBackend(msg) => EngineError::UnknownBackend(format!("{ctx}: {msg}")),
            EngineError::UnknownStrategy(msg) => {
                EngineError::UnknownStrategy(format!("{ctx}: {msg}"))
            }
            other => other,
        }
    }
}
