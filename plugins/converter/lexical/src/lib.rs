//! Lexical-cast converter.
//!
//! Strict decimal text in both directions with no knobs at all: every
//! `Param` is rejected as unrecognized. Floats format as the shortest text
//! that reads back to the same value.

use cnv_api::config::{Configure, ParamKind, Settings};
use cnv_api::converter::Converter;
use cnv_api::text;
use cnv_api::value::{Kind, Repr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexicalCast {
    settings: Settings,
}

impl LexicalCast {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Configure for LexicalCast {
    const NAME: &'static str = "lexical";
    const PARAMS: &'static [ParamKind] = &[];

    fn settings(&self) -> &Settings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}

impl Converter for LexicalCast {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn try_parse(&self, text: &str, kind: Kind) -> Option<Repr> {
        match kind {
            Kind::Int { .. } => text
                .parse::<i128>()
                .ok()
                .filter(|v| kind.contains(*v))
                .map(Repr::Int),
            Kind::Float { bits } => text::parse_float(text, bits).map(Repr::Float),
            Kind::Named(_) => kind.lookup(text).map(Repr::Named),
        }
    }

    fn try_format(&self, value: Repr, kind: Kind) -> Option<String> {
        match (value, kind) {
            (Repr::Int(v), Kind::Int { .. }) if kind.contains(v) => Some(v.to_string()),
            (Repr::Float(v), Kind::Float { bits }) => Some(text::format_float(
                v,
                bits,
                None,
                Default::default(),
                false,
            )),
            (Repr::Named(i), Kind::Named(_)) => kind.name_at(i).map(str::to_string),
            _ => None,
        }
    }
}
