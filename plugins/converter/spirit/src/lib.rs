//! Grammar-based converter.
//!
//! Input is matched against small parser-combinator grammars and must be
//! consumed in full:
//!
//! ```text
//! integer := [+-] digit+                        (digits of the configured base)
//! float   := [+-] digit+ [. digit+] [(e|E) [+-] digit+]
//! named   := longest entry of the type's symbol table
//! ```
//!
//! Integer accumulation is checked, so every width parses across its full
//! range.

use nom::bytes::complete::take_while1;
use nom::character::complete::{char, digit1, one_of};
use nom::combinator::{all_consuming, map, map_opt, opt, recognize};
use nom::error::{Error, ErrorKind};
use nom::sequence::{pair, tuple};
use nom::IResult;

use cnv_api::config::{Configure, ParamKind, Settings};
use cnv_api::converter::Converter;
use cnv_api::text;
use cnv_api::value::{Kind, Repr};

// ---------------------------------------------------------------------------
// Grammar
// ---------------------------------------------------------------------------

fn sign(i: &str) -> IResult<&str, bool> {
    map(opt(one_of("+-")), |s| s == Some('-'))(i)
}

fn integer(i: &str, radix: u32) -> IResult<&str, i128> {
    let (i, negative) = sign(i)?;
    let (rest, digits) = take_while1(|c: char| c.is_digit(radix))(i)?;
    match accumulate(digits, radix, negative) {
        Some(value) => Ok((rest, value)),
        None => Err(nom::Err::Error(Error::new(i, ErrorKind::TooLarge))),
    }
}

/// Digits folded toward the sign, so the most negative value is reachable.
fn accumulate(digits: &str, radix: u32, negative: bool) -> Option<i128> {
    let radix = radix as i128;
    digits.bytes().try_fold(0i128, |acc, b| {
        let digit = text::digit_value(b)? as i128;
        let acc = acc.checked_mul(radix)?;
        if negative {
            acc.checked_sub(digit)
        } else {
            acc.checked_add(digit)
        }
    })
}

fn float_literal(i: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(one_of("+-")),
        digit1,
        opt(pair(char('.'), digit1)),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(i)
}

fn float(i: &str, bits: u32) -> IResult<&str, f64> {
    map_opt(float_literal, |lit| text::parse_float(lit, bits))(i)
}

/// Longest symbol-table entry that prefixes `i`.
fn symbol<'a>(i: &'a str, names: &[&str]) -> IResult<&'a str, usize> {
    names
        .iter()
        .enumerate()
        .filter(|(_, name)| i.starts_with(**name))
        .max_by_key(|(_, name)| name.len())
        .map(|(index, name)| (&i[name.len()..], index))
        .ok_or_else(|| nom::Err::Error(Error::new(i, ErrorKind::Tag)))
}

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// Recognized params: `base`, `precision`, `notation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spirit {
    settings: Settings,
}

impl Spirit {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Configure for Spirit {
    const NAME: &'static str = "spirit";
    const PARAMS: &'static [ParamKind] =
        &[ParamKind::Base, ParamKind::Precision, ParamKind::Notation];

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}

impl Converter for Spirit {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn try_parse(&self, text: &str, kind: Kind) -> Option<Repr> {
        match kind {
            Kind::Int { .. } => {
                let radix = self.settings.base.radix();
                let (_, value) = all_consuming(|i| integer(i, radix))(text).ok()?;
                kind.contains(value).then_some(Repr::Int(value))
            }
            Kind::Float { bits } => {
                let (_, value) = all_consuming(|i| float(i, bits))(text).ok()?;
                Some(Repr::Float(value))
            }
            Kind::Named(names) => {
                let (_, index) = all_consuming(|i| symbol(i, names))(text).ok()?;
                Some(Repr::Named(index))
            }
        }
    }

    fn try_format(&self, value: Repr, kind: Kind) -> Option<String> {
        let s = &self.settings;
        match (value, kind) {
            (Repr::Int(v), Kind::Int { .. }) if kind.contains(v) => {
                Some(text::format_int(v, s.base, false))
            }
            (Repr::Float(v), Kind::Float { bits }) => {
                Some(text::format_float(v, bits, s.precision, s.notation, false))
            }
            (Repr::Named(i), Kind::Named(_)) => kind.name_at(i).map(str::to_string),
            _ => None,
        }
    }
}
