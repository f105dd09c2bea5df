use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use cnv_api::config::{Configure, Param, ParamKind};
use cnv_api::converter::Converter;
use cnv_api::error::ConfigError;
use cnv_converter_lexical::LexicalCast;
use cnv_converter_printf::Printf;
use cnv_converter_spirit::Spirit;
use cnv_converter_stream::Stream;
use cnv_converter_strtol::Strtol;

use crate::error::EngineError;

/// Converter backends linked into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    Strtol,
    Printf,
    Stream,
    Lexical,
    Spirit,
}

impl Backend {
    pub const ALL: &'static [Backend] = &[
        Backend::Strtol,
        Backend::Printf,
        Backend::Stream,
        Backend::Lexical,
        Backend::Spirit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Strtol => Strtol::NAME,
            Backend::Printf => Printf::NAME,
            Backend::Stream => Stream::NAME,
            Backend::Lexical => LexicalCast::NAME,
            Backend::Spirit => Spirit::NAME,
        }
    }

    /// Parameters the backend recognizes.
    pub fn params(&self) -> &'static [ParamKind] {
        match self {
            Backend::Strtol => Strtol::PARAMS,
            Backend::Printf => Printf::PARAMS,
            Backend::Stream => Stream::PARAMS,
            Backend::Lexical => LexicalCast::PARAMS,
            Backend::Spirit => Spirit::PARAMS,
        }
    }

    /// Construct a configured strategy, applying `params` in order.
    pub fn build(
        &self,
        params: impl IntoIterator<Item = Param>,
    ) -> Result<Arc<dyn Converter>, ConfigError> {
        Ok(match self {
            Backend::Strtol => Arc::new(Strtol::new().with_all(params)?),
            Backend::Printf => Arc::new(Printf::new().with_all(params)?),
            Backend::Stream => Arc::new(Stream::new().with_all(params)?),
            Backend::Lexical => Arc::new(LexicalCast::new().with_all(params)?),
            Backend::Spirit => Arc::new(Spirit::new().with_all(params)?),
        })
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|b| b.name() == s)
            .ok_or_else(|| EngineError::UnknownBackend(s.to_string()))
    }
}
