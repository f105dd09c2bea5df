//! iostream-style converter.
//!
//! Behaves like extraction and insertion on a string stream: `oct`, `dec`
//! and `hex` radixes, `setw`/`setfill`/`left`/`right` padding, and
//! `skipws`, which is on by default.

use cnv_api::config::{Base, Configure, Param, ParamKind, Settings};
use cnv_api::converter::Converter;
use cnv_api::error::ConfigError;
use cnv_api::text;
use cnv_api::value::{Kind, Repr};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stream {
    settings: Settings,
}

impl Default for Stream {
    fn default() -> Self {
        Self {
            settings: Settings {
                skip_ws: true,
                ..Settings::default()
            },
        }
    }
}

impl Stream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input as the stream sees it. With `skipws` the surrounding
    /// whitespace is dropped; anything else must still be consumed.
    fn input<'a>(&self, text: &'a str) -> &'a str {
        if self.settings.skip_ws {
            text.trim()
        } else {
            text
        }
    }

    fn extract_int(&self, text: &str, kind: Kind) -> Option<i128> {
        let (negative, rest) = match text.as_bytes().first()? {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };
        let digits = match self.settings.base {
            Base::Hex => rest
                .strip_prefix("0x")
                .or_else(|| rest.strip_prefix("0X"))
                .unwrap_or(rest),
            _ => rest,
        };
        let radix = self.settings.base.radix();
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return None;
        }

        let magnitude = u128::from_str_radix(digits, radix).ok()?;
        let value = if negative {
            0i128.checked_sub_unsigned(magnitude)?
        } else {
            i128::try_from(magnitude).ok()?
        };
        kind.contains(value).then_some(value)
    }
}

impl Configure for Stream {
    const NAME: &'static str = "stream";
    const PARAMS: &'static [ParamKind] = &[
        ParamKind::Base,
        ParamKind::Precision,
        ParamKind::Width,
        ParamKind::Fill,
        ParamKind::Adjust,
        ParamKind::Uppercase,
        ParamKind::Notation,
        ParamKind::SkipWs,
    ];

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    fn check(&self, param: &Param) -> Result<(), ConfigError> {
        match param {
            Param::Base(Base::Binary) => Err(ConfigError::out_of_domain(
                "base",
                "streams support oct, dec and hex only (use 8, 10 or 16)",
            )),
            _ => Ok(()),
        }
    }
}

impl Converter for Stream {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn try_parse(&self, text: &str, kind: Kind) -> Option<Repr> {
        let text = self.input(text);
        match kind {
            Kind::Int { .. } => self.extract_int(text, kind).map(Repr::Int),
            Kind::Float { bits } => text::parse_float(text, bits).map(Repr::Float),
            Kind::Named(_) => kind.lookup(text).map(Repr::Named),
        }
    }

    fn try_format(&self, value: Repr, kind: Kind) -> Option<String> {
        let s = &self.settings;
        let out = match (value, kind) {
            (Repr::Int(v), Kind::Int { .. }) if kind.contains(v) => {
                text::format_int(v, s.base, s.uppercase)
            }
            (Repr::Float(v), Kind::Float { bits }) => {
                text::format_float(v, bits, s.precision, s.notation, s.uppercase)
            }
            (Repr::Named(i), Kind::Named(_)) => kind.name_at(i)?.to_string(),
            _ => return None,
        };
        Some(s.pad(out))
    }
}
