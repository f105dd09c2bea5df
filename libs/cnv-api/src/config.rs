use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest accepted `precision`.
pub const MAX_PRECISION: u32 = 100;

/// Value type of a parameter, used by config loaders to check raw values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    Bool,
    U64,
    Char,
    /// One of a fixed set of lowercase words.
    Word,
}

/// Every parameter a strategy may recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Base,
    Precision,
    Width,
    Fill,
    Adjust,
    Uppercase,
    SkipWs,
    Notation,
}

impl ParamKind {
    pub const ALL: &'static [ParamKind] = &[
        ParamKind::Base,
        ParamKind::Precision,
        ParamKind::Width,
        ParamKind::Fill,
        ParamKind::Adjust,
        ParamKind::Uppercase,
        ParamKind::SkipWs,
        ParamKind::Notation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ParamKind::Base => "base",
            ParamKind::Precision => "precision",
            ParamKind::Width => "field_width",
            ParamKind::Fill => "fill_char",
            ParamKind::Adjust => "adjust",
            ParamKind::Uppercase => "uppercase",
            ParamKind::SkipWs => "skipws",
            ParamKind::Notation => "notation",
        }
    }

    /// Look a parameter up by name. `width` and `fill` are accepted as
    /// short aliases of `field_width` and `fill_char`.
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "width" => return Ok(ParamKind::Width),
            "fill" => return Ok(ParamKind::Fill),
            _ => {}
        }
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name() == name)
            .ok_or_else(|| ConfigError::UnknownParam(name.to_string()))
    }

    pub fn param_type(&self) -> ParamType {
        match self {
            ParamKind::Base | ParamKind::Precision | ParamKind::Width => ParamType::U64,
            ParamKind::Fill => ParamType::Char,
            ParamKind::Uppercase | ParamKind::SkipWs => ParamType::Bool,
            ParamKind::Adjust | ParamKind::Notation => ParamType::Word,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ParamKind::Base => "integer radix: 2, 8, 10 or 16",
            ParamKind::Precision => "digits after the decimal point for floats",
            ParamKind::Width => "minimum field width of formatted text",
            ParamKind::Fill => "padding character",
            ParamKind::Adjust => "padding side: left, right or center",
            ParamKind::Uppercase => "uppercase hex digits and exponent marker",
            ParamKind::SkipWs => "ignore whitespace around parsed text",
            ParamKind::Notation => "float notation: fixed or scientific",
        }
    }
}

/// Integer radix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Base {
    Binary,
    Octal,
    #[default]
    Decimal,
    Hex,
}

impl Base {
    pub fn radix(&self) -> u32 {
        match self {
            Base::Binary => 2,
            Base::Octal => 8,
            Base::Decimal => 10,
            Base::Hex => 16,
        }
    }
}

impl TryFrom<u8> for Base {
    type Error = ConfigError;

    fn try_from(radix: u8) -> Result<Self, Self::Error> {
        match radix {
            2 => Ok(Base::Binary),
            8 => Ok(Base::Octal),
            10 => Ok(Base::Decimal),
            16 => Ok(Base::Hex),
            other => Err(ConfigError::out_of_domain(
                "base",
                format!("expected 2, 8, 10 or 16, got {other}"),
            )),
        }
    }
}

impl From<Base> for u8 {
    fn from(base: Base) -> Self {
        base.radix() as u8
    }
}

/// Side on which formatted text is padded to `width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Adjust {
    /// Text on the left, fill on the right.
    Left,
    #[default]
    Right,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    #[default]
    Fixed,
    Scientific,
}

/// A single typed configuration option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    Base(Base),
    Precision(u32),
    Width(usize),
    Fill(char),
    Adjust(Adjust),
    Uppercase(bool),
    SkipWs(bool),
    Notation(Notation),
}

impl Param {
    /// `Param::Base` from a raw radix.
    pub fn base(radix: u8) -> Result<Self, ConfigError> {
        Base::try_from(radix).map(Param::Base)
    }

    pub fn kind(&self) -> ParamKind {
        match self {
            Param::Base(_) => ParamKind::Base,
            Param::Precision(_) => ParamKind::Precision,
            Param::Width(_) => ParamKind::Width,
            Param::Fill(_) => ParamKind::Fill,
            Param::Adjust(_) => ParamKind::Adjust,
            Param::Uppercase(_) => ParamKind::Uppercase,
            Param::SkipWs(_) => ParamKind::SkipWs,
            Param::Notation(_) => ParamKind::Notation,
        }
    }

    /// Domain checks shared by all strategies.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Param::Precision(p) if p > MAX_PRECISION => Err(ConfigError::out_of_domain(
                "precision",
                format!("must be at most {MAX_PRECISION}, got {p}"),
            )),
            Param::Fill(c) if c.is_control() => Err(ConfigError::out_of_domain(
                "fill_char",
                format!("control character {c:?} cannot be used for padding"),
            )),
            _ => Ok(()),
        }
    }
}

/// Resolved configuration carried by a strategy.
///
/// Every field has a default; strategies override some defaults in their
/// constructors (printf starts with precision 6, stream with skipws on).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub base: Base,
    /// `None` means shortest text that parses back to the same float.
    pub precision: Option<u32>,
    pub width: usize,
    pub fill: char,
    pub adjust: Adjust,
    pub uppercase: bool,
    pub skip_ws: bool,
    pub notation: Notation,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base: Base::Decimal,
            precision: None,
            width: 0,
            fill: ' ',
            adjust: Adjust::Right,
            uppercase: false,
            skip_ws: false,
            notation: Notation::Fixed,
        }
    }
}

impl Settings {
    pub fn apply(&mut self, param: Param) {
        match param {
            Param::Base(v) => self.base = v,
            Param::Precision(v) => self.precision = Some(v),
            Param::Width(v) => self.width = v,
            Param::Fill(v) => self.fill = v,
            Param::Adjust(v) => self.adjust = v,
            Param::Uppercase(v) => self.uppercase = v,
            Param::SkipWs(v) => self.skip_ws = v,
            Param::Notation(v) => self.notation = v,
        }
    }

    /// Pad `text` to `width` characters with `fill` on the `adjust` side.
    pub fn pad(&self, text: String) -> String {
        let len = text.chars().count();
        if len >= self.width {
            return text;
        }
        let gap = self.width - len;
        let (before, after) = match self.adjust {
            Adjust::Left => (0, gap),
            Adjust::Right => (gap, 0),
            Adjust::Center => (gap / 2, gap - gap / 2),
        };
        let mut out = String::with_capacity(text.len() + gap * self.fill.len_utf8());
        out.extend(std::iter::repeat_n(self.fill, before));
        out.push_str(&text);
        out.extend(std::iter::repeat_n(self.fill, after));
        out
    }
}

/// Builder-style configuration shared by every strategy.
///
/// ```
/// use cnv_api::config::{Configure, Param, ParamKind, Settings};
///
/// #[derive(Clone, Default)]
/// struct Upper(Settings);
///
/// impl Configure for Upper {
///     const NAME: &'static str = "upper";
///     const PARAMS: &'static [ParamKind] = &[ParamKind::Uppercase];
///
///     fn settings(&self) -> &Settings { &self.0 }
///     fn settings_mut(&mut self) -> &mut Settings { &mut self.0 }
/// }
///
/// let cnv = Upper::default().with(Param::Uppercase(true)).unwrap();
/// assert!(cnv.settings().uppercase);
/// assert!(Upper::default().with(Param::Width(4)).is_err());
/// ```
pub trait Configure: Sized {
    /// Strategy name used in error messages and registries.
    const NAME: &'static str;

    /// Parameters this strategy accepts. Anything else is rejected.
    const PARAMS: &'static [ParamKind];

    fn settings(&self) -> &Settings;

    fn settings_mut(&mut self) -> &mut Settings;

    /// Strategy-specific domain restrictions, checked after the generic ones.
    fn check(&self, _param: &Param) -> Result<(), ConfigError> {
        Ok(())
    }

    fn with(mut self, param: Param) -> Result<Self, ConfigError> {
        let kind = param.kind();
        if !Self::PARAMS.contains(&kind) {
            return Err(ConfigError::Unrecognized {
                strategy: Self::NAME,
                param: kind.name(),
            });
        }
        param.validate()?;
        self.check(&param)?;
        self.settings_mut().apply(param);
        Ok(self)
    }

    fn with_all(self, params: impl IntoIterator<Item = Param>) -> Result<Self, ConfigError> {
        params.into_iter().try_fold(self, Self::with)
    }
}
