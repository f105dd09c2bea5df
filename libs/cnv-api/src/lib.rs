//! Backend-pluggable conversion between text and typed values.
//!
//! A call site picks a strategy, optionally configures it, and converts:
//!
//! ```ignore
//! let cnv = Strtol::new().with(Param::base(16)?)?;
//! let n = convert::<i32>("ff", &cnv).value_or(-1);
//! let s = convert::<String>(255i32, &cnv).value();
//! ```
//!
//! Nothing in this crate knows a concrete backend. Backends implement
//! [`converter::Converter`] and live in their own crates.

// Lets `#[derive(NamedValues)]` expand to `::cnv_api::...` inside this crate too.
extern crate self as cnv_api;

pub mod config;
pub mod convert;
pub mod converter;
pub mod error;
pub mod result;
pub mod text;
pub mod value;

pub use cnv_api_derive::NamedValues;

pub use config::{Configure, Param};
pub use convert::{convert, convert_all, convert_or};
pub use converter::{Converter, ConverterExt};
pub use error::ConfigError;
pub use result::ConversionResult;
pub use value::{Convertible, Kind, NamedValues, Repr};
