//! Named strategy registry for the conversion library.
//!
//! Loads strategy presets from TOML, validates their params against the
//! backend that will run them, and hands out shared converters.

pub mod backend;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod params;
pub mod registry;

pub use backend::Backend;
pub use config::CnvConfig;
pub use error::EngineError;
pub use params::{parse_assignments, parse_params};
pub use registry::{Registry, Strategy};
