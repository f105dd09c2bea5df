//! Text helpers shared by converter backends.
//!
//! Backends own their parsing grammar; these cover the parts that are the
//! same everywhere: radix formatting, float notation, and exact float
//! parsing per width.

use crate::config::{Base, Notation};

/// Format an integer in `base`, sign-magnitude (`-ff`), no prefix.
pub fn format_int(value: i128, base: Base, uppercase: bool) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let magnitude = value.unsigned_abs();
    match (base, uppercase) {
        (Base::Binary, _) => format!("{sign}{magnitude:b}"),
        (Base::Octal, _) => format!("{sign}{magnitude:o}"),
        (Base::Decimal, _) => format!("{sign}{magnitude}"),
        (Base::Hex, false) => format!("{sign}{magnitude:x}"),
        (Base::Hex, true) => format!("{sign}{magnitude:X}"),
    }
}

/// Format a float of the given width.
///
/// Without `precision` the output is the shortest text that parses back to
/// the same value at that width.
pub fn format_float(
    value: f64,
    bits: u32,
    precision: Option<u32>,
    notation: Notation,
    uppercase: bool,
) -> String {
    if bits == 32 {
        render(value as f32, precision, notation, uppercase)
    } else {
        render(value, precision, notation, uppercase)
    }
}

fn render<V>(v: V, precision: Option<u32>, notation: Notation, uppercase: bool) -> String
where
    V: std::fmt::Display + std::fmt::LowerExp + std::fmt::UpperExp,
{
    match (notation, precision, uppercase) {
        (Notation::Fixed, None, _) => format!("{v}"),
        (Notation::Fixed, Some(p), _) => format!("{:.*}", p as usize, v),
        (Notation::Scientific, None, false) => format!("{v:e}"),
        (Notation::Scientific, None, true) => format!("{v:E}"),
        (Notation::Scientific, Some(p), false) => format!("{:.*e}", p as usize, v),
        (Notation::Scientific, Some(p), true) => format!("{:.*E}", p as usize, v),
    }
}

/// Parse a float at the given width, rounding once.
///
/// A 32-bit result is parsed as `f32` and widened, so it narrows back
/// exactly. Finite text that overflows the width is out of range and gives
/// `None`; only an explicit `inf`/`infinity` spelling yields an infinity.
pub fn parse_float(text: &str, bits: u32) -> Option<f64> {
    let value = if bits == 32 {
        text.parse::<f32>().ok().map(f64::from)?
    } else {
        text.parse::<f64>().ok()?
    };
    if value.is_infinite() && !text.to_ascii_lowercase().contains("inf") {
        return None;
    }
    Some(value)
}

/// Value of an ASCII digit in radix 36, or `None`.
pub fn digit_value(c: u8) -> Option<u32> {
    (c as char).to_digit(36)
}
