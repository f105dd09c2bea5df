//! Table-driven converter.
//!
//! Integers are read and written with a 256-entry digit lookup table in any
//! of the four supported bases. Floats are decimal only. Named types are
//! looked up in their own table.

use cnv_api::config::{Configure, Param, ParamKind, Settings};
use cnv_api::converter::Converter;
use cnv_api::text;
use cnv_api::value::{Kind, Repr};

/// Marks bytes that are not digits in any base.
const NOT_A_DIGIT: u8 = 0xFF;

/// ASCII byte → digit value (0-35), or `NOT_A_DIGIT`.
static DIGIT_TABLE: [u8; 256] = build_digit_table();

const fn build_digit_table() -> [u8; 256] {
    let mut table = [NOT_A_DIGIT; 256];
    let mut i = 0;
    while i < 10 {
        table[b'0' as usize + i] = i as u8;
        i += 1;
    }
    let mut i = 0;
    while i < 26 {
        table[b'a' as usize + i] = 10 + i as u8;
        table[b'A' as usize + i] = 10 + i as u8;
        i += 1;
    }
    table
}

const LOWER_DIGITS: &[u8; 16] = b"0123456789abcdef";
const UPPER_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Table-driven strategy.
///
/// Recognized params: `base`, `precision`, `width`, `fill`, `adjust`,
/// `uppercase`, `notation`. Input is never trimmed: `" 12"` fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Strtol {
    settings: Settings,
}

impl Strtol {
    pub fn new() -> Self {
        Self::default()
    }

    fn parse_int(&self, text: &str, kind: Kind) -> Option<i128> {
        let bytes = text.as_bytes();
        let (negative, digits) = match bytes.first()? {
            b'-' => (true, &bytes[1..]),
            b'+' => (false, &bytes[1..]),
            _ => (false, bytes),
        };
        if digits.is_empty() {
            return None;
        }

        let radix = self.settings.base.radix() as u8;
        let mut acc: i128 = 0;
        for &b in digits {
            let digit = DIGIT_TABLE[b as usize];
            if digit >= radix {
                return None;
            }
            acc = acc.checked_mul(radix as i128)?;
            // Accumulate toward the sign so i128::MIN is reachable.
            acc = if negative {
                acc.checked_sub(digit as i128)?
            } else {
                acc.checked_add(digit as i128)?
            };
        }

        kind.contains(acc).then_some(acc)
    }

    fn format_int(&self, value: i128) -> String {
        let table = if self.settings.uppercase {
            UPPER_DIGITS
        } else {
            LOWER_DIGITS
        };
        let radix = self.settings.base.radix() as u128;

        // 128 binary digits plus sign.
        let mut buf = [0u8; 129];
        let mut pos = buf.len();
        let mut magnitude = value.unsigned_abs();
        loop {
            pos -= 1;
            buf[pos] = table[(magnitude % radix) as usize];
            magnitude /= radix;
            if magnitude == 0 {
                break;
            }
        }
        if value < 0 {
            pos -= 1;
            buf[pos] = b'-';
        }

        buf[pos..].iter().map(|&b| b as char).collect()
    }
}

impl Configure for Strtol {
    const NAME: &'static str = "strtol";
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
}

impl Converter for Strtol {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn try_parse(&self, text: &str, kind: Kind) -> Option<Repr> {
        match kind {
            Kind::Int { .. } => self.parse_int(text, kind).map(Repr::Int),
            Kind::Float { bits } => text::parse_float(text, bits).map(Repr::Float),
            Kind::Named(_) => kind.lookup(text).map(Repr::Named),
        }
    }

    fn try_format(&self, value: Repr, kind: Kind) -> Option<String> {
        let s = &self.settings;
        let out = match (value, kind) {
            (Repr::Int(v), Kind::Int { .. }) if kind.contains(v) => self.format_int(v),
            (Repr::Float(v), Kind::Float { bits }) => {
                text::format_float(v, bits, s.precision, s.notation, s.uppercase)
            }
            (Repr::Named(i), Kind::Named(_)) => kind.name_at(i)?.to_string(),
            _ => return None,
        };
        Some(s.pad(out))
    }
}

/// Shorthand for `Strtol::new().with_all(params)`.
pub fn strtol(params: impl IntoIterator<Item = Param>) -> Result<Strtol, cnv_api::ConfigError> {
    Strtol::new().with_all(params)
}

#[cfg(test)]
mod tests {
    use cnv_api::config::{Adjust, Base};
    use cnv_api::{convert, NamedValues};

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, NamedValues)]
    enum Change {
        No,
        Up,
        Dn,
    }

    #[test]
    fn decimal_defaults() {
        let cnv = Strtol::new();
        assert_eq!(convert::<i32>("-2147483648", &cnv).value(), i32::MIN);
        assert_eq!(convert::<i32>("+17", &cnv).value(), 17);
        assert_eq!(convert::<String>(-42i64, &cnv).value(), "-42");
        assert_eq!(convert::<String>(i128::MIN, &cnv).value(), i128::MIN.to_string());
    }

    #[test]
    fn rejects_partial_and_padded_input() {
        let cnv = Strtol::new();
        for bad in ["", "-", "+", "123abc", " 12", "12 ", "1_000", "0x10"] {
            assert!(convert::<i32>(bad, &cnv).is_empty(), "{bad:?} should fail");
        }
    }

    #[test]
    fn overflow_is_empty() {
        let cnv = Strtol::new();
        assert!(convert::<i8>("128", &cnv).is_empty());
        assert_eq!(convert::<i8>("-128", &cnv).value(), -128);
        assert!(convert::<u32>("-1", &cnv).is_empty());
        assert!(convert::<i128>("999999999999999999999999999999999999999999", &cnv).is_empty());
    }

    #[test]
    fn hex_with_uppercase_and_padding() {
        let cnv = strtol([
            Param::Base(Base::Hex),
            Param::Uppercase(true),
            Param::Width(6),
            Param::Fill('0'),
        ])
        .unwrap();
        assert_eq!(convert::<String>(255u16, &cnv).value(), "0000FF");
        assert_eq!(convert::<u16>("fF", &cnv).value(), 255);
        assert!(convert::<u16>("fg", &cnv).is_empty());

        let left = cnv.with(Param::Adjust(Adjust::Left)).unwrap();
        assert_eq!(convert::<String>(-1i8, &left).value(), "-10000");
    }

    #[test]
    fn binary_base() {
        let cnv = Strtol::new().with(Param::base(2).unwrap()).unwrap();
        assert_eq!(convert::<u8>("101", &cnv).value(), 5);
        assert!(convert::<u8>("102", &cnv).is_empty());
        assert_eq!(convert::<String>(5u8, &cnv).value(), "101");
    }

    #[test]
    fn floats_stay_decimal() {
        let cnv = Strtol::new()
            .with(Param::Base(Base::Hex))
            .unwrap()
            .with(Param::Precision(2))
            .unwrap();
        assert_eq!(convert::<f64>("1.25", &cnv).value(), 1.25);
        assert_eq!(convert::<String>(1.255f64, &cnv).value(), "1.25");
        assert!(convert::<f64>("1.2.5", &cnv).is_empty());
    }

    #[test]
    fn named_values_use_the_table() {
        let cnv = Strtol::new();
        assert_eq!(convert::<Change>("up", &cnv).value(), Change::Up);
        assert_eq!(convert::<String>(Change::Dn, &cnv).value(), "dn");
        assert!(convert::<Change>("Up", &cnv).is_empty());
    }

    #[test]
    fn skipws_is_not_recognized() {
        let err = Strtol::new().with(Param::SkipWs(true)).unwrap_err();
        assert_eq!(err.to_string(), "strtol: unrecognized parameter 'skipws'");
    }
}
