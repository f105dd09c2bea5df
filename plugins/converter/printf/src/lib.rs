//! printf/scanf-style converter.
//!
//! Formatting follows the `%d`/`%o`/`%x`/`%f`/`%e` conversions: precision
//! defaults to 6, padding is spaces or zeros, and zero padding goes after
//! the sign. Parsing follows `%d%n`-style scanning: leading whitespace is
//! skipped, a `0x` prefix is allowed in hex, and nothing may follow the
//! number.
//!
//! Named types have no printf conversion and always fail.

use cnv_api::config::{Adjust, Base, Configure, Notation, Param, ParamKind, Settings};
use cnv_api::converter::Converter;
use cnv_api::error::ConfigError;
use cnv_api::text;
use cnv_api::value::{Kind, Repr};

const DEFAULT_PRECISION: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Printf {
    settings: Settings,
}

impl Default for Printf {
    fn default() -> Self {
        Self {
            settings: Settings {
                precision: Some(DEFAULT_PRECISION),
                ..Settings::default()
            },
        }
    }
}

impl Printf {
    pub fn new() -> Self {
        Self::default()
    }

    fn scan_int(&self, text: &str, kind: Kind) -> Option<i128> {
        let rest = text.trim_start();
        let (negative, rest) = match rest.as_bytes().first()? {
            b'-' => (true, &rest[1..]),
            b'+' => (false, &rest[1..]),
            _ => (false, rest),
        };
        let digits = match self.settings.base {
            Base::Hex => rest
                .strip_prefix("0x")
                .or_else(|| rest.strip_prefix("0X"))
                .unwrap_or(rest),
            _ => rest,
        };
        let radix = self.settings.base.radix();
        // from_str_radix would accept a second sign; scanf does not.
        if !digits.bytes().next()?.is_ascii_alphanumeric() {
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

    fn scan_float(&self, text: &str, bits: u32) -> Option<f64> {
        text::parse_float(text.trim_start(), bits)
    }

    /// Field padding with printf flag rules: `0` pads after the sign and is
    /// ignored when left-adjusted.
    fn pad(&self, body: String) -> String {
        let s = &self.settings;
        let len = body.chars().count();
        if len >= s.width {
            return body;
        }
        let gap = s.width - len;
        match (s.adjust, s.fill) {
            (Adjust::Left, _) => format!("{body}{}", " ".repeat(gap)),
            (_, '0') => {
                let (sign, digits) = match body.strip_prefix('-') {
                    Some(digits) => ("-", digits),
                    None => ("", body.as_str()),
                };
                format!("{sign}{}{digits}", "0".repeat(gap))
            }
            _ => format!("{}{body}", " ".repeat(gap)),
        }
    }
}

/// Rewrite a Rust exponent (`1.5e3`, `1.5E-7`) the way `%e` prints it:
/// explicit sign and at least two digits (`1.5e+03`, `1.5E-07`).
fn c_exponent(body: String) -> String {
    let Some(pos) = body.find(['e', 'E']) else {
        return body;
    };
    let (mantissa, rest) = body.split_at(pos);
    let (marker, exp) = rest.split_at(1);
    let (sign, digits) = match exp.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exp),
    };
    format!("{mantissa}{marker}{sign}{digits:0>2}")
}

impl Configure for Printf {
    const NAME: &'static str = "printf";
    const PARAMS: &'static [ParamKind] = &[
        ParamKind::Base,
        ParamKind::Precision,
        ParamKind::Width,
        ParamKind::Fill,
        ParamKind::Adjust,
        ParamKind::Uppercase,
        ParamKind::Notation,
    ];

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    fn check(&self, param: &Param) -> Result<(), ConfigError> {
        match *param {
            Param::Base(Base::Binary) => Err(ConfigError::out_of_domain(
                "base",
                "printf has no binary conversion (use 8, 10 or 16)",
            )),
            Param::Fill(c) if c != ' ' && c != '0' => Err(ConfigError::out_of_domain(
                "fill_char",
                format!("printf pads with ' ' or '0', got {c:?}"),
            )),
            Param::Adjust(Adjust::Center) => Err(ConfigError::out_of_domain(
                "adjust",
                "printf cannot center a field",
            )),
            _ => Ok(()),
        }
    }
}

impl Converter for Printf {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn try_parse(&self, text: &str, kind: Kind) -> Option<Repr> {
        match kind {
            Kind::Int { .. } => self.scan_int(text, kind).map(Repr::Int),
            Kind::Float { bits } => self.scan_float(text, bits).map(Repr::Float),
            Kind::Named(_) => None,
        }
    }

    fn try_format(&self, value: Repr, kind: Kind) -> Option<String> {
        let s = &self.settings;
        let body = match (value, kind) {
            (Repr::Int(v), Kind::Int { .. }) if kind.contains(v) => {
                text::format_int(v, s.base, s.uppercase)
            }
            (Repr::Float(v), Kind::Float { bits }) => {
                let body = text::format_float(
                    v,
                    bits,
                    Some(s.precision.unwrap_or(DEFAULT_PRECISION)),
                    s.notation,
                    s.uppercase,
                );
                match s.notation {
                    Notation::Scientific => c_exponent(body),
                    Notation::Fixed => body,
                }
            }
            _ => return None,
        };
        Some(self.pad(body))
    }
}
