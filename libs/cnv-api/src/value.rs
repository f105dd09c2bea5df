/// Shape of a conversion target, as seen by a strategy.
///
/// Strategies never see the concrete Rust type. They see its `Kind`, produce
/// a [`Repr`], and the facade narrows that back with [`Convertible::from_repr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Fixed-width integer. `bits` is 8, 16, 32, 64 or 128.
    Int { signed: bool, bits: u32 },
    /// IEEE float. `bits` is 32 or 64.
    Float { bits: u32 },
    /// Closed set of named members (user enumerations).
    Named(&'static [&'static str]),
}

impl Kind {
    /// Inclusive value range of an integer kind.
    ///
    /// Unsigned 128-bit integers are not representable in `Repr::Int` and
    /// have no `Kind`.
    pub fn int_range(&self) -> Option<(i128, i128)> {
        match *self {
            Kind::Int { signed: true, bits } if bits >= 128 => Some((i128::MIN, i128::MAX)),
            Kind::Int { signed: true, bits } => {
                let max = (1i128 << (bits - 1)) - 1;
                Some((-max - 1, max))
            }
            Kind::Int { signed: false, bits } => Some((0, (1i128 << bits.min(127)) - 1)),
            _ => None,
        }
    }

    /// Whether `value` fits an integer kind.
    pub fn contains(&self, value: i128) -> bool {
        self.int_range()
            .is_some_and(|(min, max)| (min..=max).contains(&value))
    }

    pub fn is_signed(&self) -> bool {
        matches!(self, Kind::Int { signed: true, .. } | Kind::Float { .. })
    }

    /// Position of `name` in a named kind's table.
    pub fn lookup(&self, name: &str) -> Option<usize> {
        match self {
            Kind::Named(names) => names.iter().position(|n| *n == name),
            _ => None,
        }
    }

    /// Name stored at `index` in a named kind's table.
    pub fn name_at(&self, index: usize) -> Option<&'static str> {
        match self {
            Kind::Named(names) => names.get(index).copied(),
            _ => None,
        }
    }
}

/// Type-erased value exchanged between the facade and a strategy.
///
/// A `Float` produced for `Kind::Float { bits: 32 }` holds an `f32` widened
/// without loss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Repr {
    Int(i128),
    Float(f64),
    /// Index into the `Kind::Named` table.
    Named(usize),
}

/// A type the facade can convert to and from text.
///
/// Implemented for the primitive integers (except `u128`), `f32`, `f64`, and
/// every [`NamedValues`] type.
pub trait Convertible: Copy + Send + Sync + 'static {
    fn kind() -> Kind;

    fn into_repr(self) -> Repr;

    /// Narrow a strategy's output back to `Self`.
    ///
    /// Returns `None` when the value does not fit (out of range, wrong repr,
    /// unknown table index).
    fn from_repr(repr: Repr) -> Option<Self>;
}

macro_rules! int_convertible {
    ($($ty:ty => $signed:expr),* $(,)?) => {
        $(
            impl Convertible for $ty {
                fn kind() -> Kind {
                    Kind::Int { signed: $signed, bits: <$ty>::BITS }
                }

                fn into_repr(self) -> Repr {
                    Repr::Int(self as i128)
                }

                fn from_repr(repr: Repr) -> Option<Self> {
                    match repr {
                        Repr::Int(v) => <$ty>::try_from(v).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

int_convertible! {
    i8 => true, i16 => true, i32 => true, i64 => true, i128 => true, isize => true,
    u8 => false, u16 => false, u32 => false, u64 => false, usize => false,
}

impl Convertible for f32 {
    fn kind() -> Kind {
        Kind::Float { bits: 32 }
    }

    fn into_repr(self) -> Repr {
        Repr::Float(self as f64)
    }

    fn from_repr(repr: Repr) -> Option<Self> {
        match repr {
            // Strategies parse 32-bit floats directly, so the narrowing is exact.
            Repr::Float(v) => Some(v as f32),
            _ => None,
        }
    }
}

impl Convertible for f64 {
    fn kind() -> Kind {
        Kind::Float { bits: 64 }
    }

    fn into_repr(self) -> Repr {
        Repr::Float(self)
    }

    fn from_repr(repr: Repr) -> Option<Self> {
        match repr {
            Repr::Float(v) => Some(v),
            _ => None,
        }
    }
}

/// Bidirectional name table for a closed enumeration.
///
/// `NAMES[i]` is the text of `VALUES[i]`. Both tables must have the same
/// length and no duplicates. Usually derived:
///
/// ```
/// use cnv_api::NamedValues;
///
/// #[derive(Debug, Clone, Copy, PartialEq, NamedValues)]
/// enum Change {
///     No,
///     Up,
///     #[cnv(name = "dn")]
///     Down,
/// }
///
/// assert_eq!(Change::NAMES, &["no", "up", "dn"]);
/// ```
pub trait NamedValues: Copy + PartialEq + Send + Sync + 'static {
    const NAMES: &'static [&'static str];
    const VALUES: &'static [Self];

    fn from_name(name: &str) -> Option<Self> {
        let index = Self::NAMES.iter().position(|n| *n == name)?;
        Self::VALUES.get(index).copied()
    }

    fn name(&self) -> Option<&'static str> {
        let index = Self::VALUES.iter().position(|v| v == self)?;
        Self::NAMES.get(index).copied()
    }
}

impl<T: NamedValues> Convertible for T {
    fn kind() -> Kind {
        Kind::Named(T::NAMES)
    }

    fn into_repr(self) -> Repr {
        // Unlisted values map past the end so every strategy rejects them.
        let index = T::VALUES
            .iter()
            .position(|v| *v == self)
            .unwrap_or(T::NAMES.len());
        Repr::Named(index)
    }

    fn from_repr(repr: Repr) -> Option<Self> {
        match repr {
            Repr::Named(index) => T::VALUES.get(index).copied(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Change {
        No,
        Up,
        Dn,
    }

    impl NamedValues for Change {
        const NAMES: &'static [&'static str] = &["no", "up", "dn"];
        const VALUES: &'static [Self] = &[Change::No, Change::Up, Change::Dn];
    }

    #[test]
    fn int_ranges_match_primitive_bounds() {
        assert_eq!(i8::kind().int_range(), Some((-128, 127)));
        assert_eq!(u8::kind().int_range(), Some((0, 255)));
        assert_eq!(
            i64::kind().int_range(),
            Some((i64::MIN as i128, i64::MAX as i128))
        );
        assert_eq!(u64::kind().int_range(), Some((0, u64::MAX as i128)));
        assert_eq!(i128::kind().int_range(), Some((i128::MIN, i128::MAX)));
        assert_eq!(f64::kind().int_range(), None);
    }

    #[test]
    fn from_repr_rejects_out_of_range() {
        assert_eq!(i8::from_repr(Repr::Int(127)), Some(127));
        assert_eq!(i8::from_repr(Repr::Int(128)), None);
        assert_eq!(u32::from_repr(Repr::Int(-1)), None);
        assert_eq!(i32::from_repr(Repr::Float(1.0)), None);
    }

    #[test]
    fn f32_survives_widening() {
        let v = 0.1f32;
        assert_eq!(f32::from_repr(v.into_repr()), Some(v));
    }

    #[test]
    fn named_table_lookup_both_ways() {
        assert_eq!(Change::from_name("up"), Some(Change::Up));
        assert_eq!(Change::from_name("UP"), None);
        assert_eq!(Change::Dn.name(), Some("dn"));
        assert_eq!(Change::kind().lookup("dn"), Some(2));
        assert_eq!(Change::kind().name_at(0), Some("no"));
        assert_eq!(Change::Up.into_repr(), Repr::Named(1));
        assert_eq!(Change::from_repr(Repr::Named(3)), None);
    }
}
