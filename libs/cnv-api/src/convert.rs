use crate::converter::{Converter, ConverterExt};
use crate::result::ConversionResult;
use crate::value::Convertible;

/// Something `convert` can start from when producing a `T`.
///
/// - Text (`&str`, `&String`, `String`) is a source for every
///   [`Convertible`] target.
/// - Every [`Convertible`] value is a source for `String`.
pub trait Source<T> {
    fn convert_with<C: Converter + ?Sized>(self, cnv: &C) -> Option<T>;
}

impl<T: Convertible> Source<T> for &str {
    fn convert_with<C: Converter + ?Sized>(self, cnv: &C) -> Option<T> {
        cnv.parse(self)
    }
}

impl<T: Convertible> Source<T> for &String {
    fn convert_with<C: Converter + ?Sized>(self, cnv: &C) -> Option<T> {
        cnv.parse(self.as_str())
    }
}

impl<T: Convertible> Source<T> for String {
    fn convert_with<C: Converter + ?Sized>(self, cnv: &C) -> Option<T> {
        cnv.parse(self.as_str())
    }
}

impl<S: Convertible> Source<String> for S {
    fn convert_with<C: Converter + ?Sized>(self, cnv: &C) -> Option<String> {
        cnv.format(self)
    }
}

/// Convert `source` to `T` with the given strategy.
///
/// The strategy is invoked exactly once. Malformed text, trailing garbage,
/// out-of-range values and type pairs the strategy does not handle all come
/// back as [`ConversionResult::Empty`].
///
/// ```
/// use cnv_api::converter::Converter;
/// use cnv_api::value::{Kind, Repr};
/// use cnv_api::convert;
///
/// /// Decimal integers only.
/// struct Decimal;
///
/// impl Converter for Decimal {
///     fn name(&self) -> &'static str { "decimal" }
///
///     fn try_parse(&self, text: &str, kind: Kind) -> Option<Repr> {
///         let v: i128 = text.parse().ok()?;
///         kind.contains(v).then_some(Repr::Int(v))
///     }
///
///     fn try_format(&self, value: Repr, _kind: Kind) -> Option<String> {
///         match value {
///             Repr::Int(v) => Some(v.to_string()),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(convert::<i32>("42", &Decimal).value(), 42);
/// assert_eq!(convert::<i32>("42x", &Decimal).value_or(-1), -1);
/// assert_eq!(convert::<String>(7u8, &Decimal).value(), "7");
/// ```
pub fn convert<T>(source: impl Source<T>, cnv: &(impl Converter + ?Sized)) -> ConversionResult<T> {
    source.convert_with(cnv).into()
}

/// [`convert`] with an inline fallback.
pub fn convert_or<T>(source: impl Source<T>, cnv: &(impl Converter + ?Sized), fallback: T) -> T {
    convert(source, cnv).value_or(fallback)
}

/// Convert every item of `sources`, lazily, one result per item.
pub fn convert_all<T, I, C>(sources: I, cnv: &C) -> impl Iterator<Item = ConversionResult<T>>
where
    I: IntoIterator,
    I::Item: Source<T>,
    C: Converter + ?Sized,
{
    sources.into_iter().map(move |s| convert(s, cnv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Kind, NamedValues, Repr};

    /// Counts calls so the facade's single-invocation rule can be checked.
    #[derive(Default)]
    struct Counting {
        calls: std::sync::atomic::AtomicUsize,
    }

    impl Converter for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn try_parse(&self, text: &str, kind: Kind) -> Option<Repr> {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            if let Some(index) = kind.lookup(text) {
                return Some(Repr::Named(index));
            }
            let v: i128 = text.parse().ok()?;
            Some(Repr::Int(v))
        }

        fn try_format(&self, value: Repr, kind: Kind) -> Option<String> {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            match value {
                Repr::Int(v) => Some(v.to_string()),
                Repr::Named(i) => kind.name_at(i).map(str::to_string),
                Repr::Float(_) => None,
            }
        }
    }

    impl Counting {
        fn calls(&self) -> usize {
            self.calls.load(std::sync::atomic::Ordering::Relaxed)
        }
    }

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
    fn strategy_is_called_once_per_conversion() {
        let cnv = Counting::default();
        assert_eq!(convert::<i32>("12", &cnv).value(), 12);
        assert!(convert::<i32>("zz", &cnv).is_empty());
        assert_eq!(cnv.calls(), 2);
    }

    #[test]
    fn facade_narrows_out_of_range_values() {
        let cnv = Counting::default();
        assert!(convert::<u8>("256", &cnv).is_empty());
        assert!(convert::<u8>("-1", &cnv).is_empty());
        assert_eq!(convert::<u8>("255", &cnv).value(), 255);
    }

    #[test]
    fn both_directions_for_named_values() {
        let cnv = Counting::default();
        assert_eq!(convert::<Change>("up", &cnv).value(), Change::Up);
        assert_eq!(convert::<String>(Change::Dn, &cnv).value(), "dn");
        assert!(convert::<Change>("sideways", &cnv).is_empty());
        assert_eq!(convert::<Change>("no", &cnv).value_or(Change::Up), Change::No);
    }

    #[test]
    fn works_through_trait_objects() {
        let boxed: Box<dyn Converter> = Box::new(Counting::default());
        assert_eq!(convert::<i64>(&String::from("-5"), boxed.as_ref()).value(), -5);
        assert_eq!(convert::<String>(-5i64, &boxed).value(), "-5");
    }

    #[test]
    fn convert_or_and_convert_all() {
        let cnv = Counting::default();
        assert_eq!(convert_or::<i32>("x", &cnv, 9), 9);
        let got: Vec<i32> = convert_all::<i32, _, _>(["1", "x", "3"], &cnv)
            .map(|r| r.value_or(-1))
            .collect();
        assert_eq!(got, vec![1, -1, 3]);
    }
}
