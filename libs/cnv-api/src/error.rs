/// Strategy configuration error.
///
/// Raised when a strategy is configured, never by a conversion. A bad
/// option is a programming error, so it is reported as early as possible.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The strategy does not take this parameter at all.
    #[error("{strategy}: unrecognized parameter '{param}'")]
    Unrecognized {
        strategy: &'static str,
        param: &'static str,
    },

    /// The parameter is recognized but the value is outside its domain.
    #[error("parameter '{param}': {message}")]
    OutOfDomain {
        param: &'static str,
        message: String,
    },

    /// No parameter has this name.
    #[error("unknown parameter '{0}'")]
    UnknownParam(String),

    /// The value has the wrong type for the parameter.
    #[error("parameter '{param}': expected {expected}")]
    WrongType {
        param: &'static str,
        expected: &'static str,
    },
}

impl ConfigError {
    pub fn out_of_domain(param: &'static str, message: impl Into<String>) -> Self {
        Self::OutOfDomain {
            param,
            message: message.into(),
        }
    }

    /// Add context to the error, preserving the variant where it carries a
    /// free-form message.
    ///
    /// Produces: `"context: original message"`.
    pub fn with_context(self, ctx: impl std::fmt::Display) -> Self {
        match self {
            ConfigError::OutOfDomain { param, message } => ConfigError::OutOfDomain {
                param,
                message: format!("{ctx}: {message}"),
            },
            ConfigError::UnknownParam(name) => ConfigError::UnknownParam(format!("{ctx}: {name}")),
            other => other,
        }
    }
}
