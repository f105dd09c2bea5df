use crate::value::{Convertible, Kind, Repr};

/// Conversion strategy: one backend algorithm for text ↔ value.
///
/// Solves one task: turn text into a value of a given [`Kind`], or a value
/// back into text. A strategy never panics on bad input; it answers `None`,
/// which the facade reports as an empty result.
///
/// Rules every implementation follows:
/// - same input and settings give the same output;
/// - a parse consumes the whole input or fails;
/// - a kind the backend does not handle is a failure, not a panic.
///
/// The trait is object safe so strategies can be picked at runtime and held
/// as `Arc<dyn Converter>`.
pub trait Converter: Send + Sync {
    fn name(&self) -> &'static str;

    fn try_parse(&self, text: &str, kind: Kind) -> Option<Repr>;

    fn try_format(&self, value: Repr, kind: Kind) -> Option<String>;
}

impl<C: Converter + ?Sized> Converter for &C {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn try_parse(&self, text: &str, kind: Kind) -> Option<Repr> {
        (**self).try_parse(text, kind)
    }

    fn try_format(&self, value: Repr, kind: Kind) -> Option<String> {
        (**self).try_format(value, kind)
    }
}

impl<C: Converter + ?Sized> Converter for Box<C> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn try_parse(&self, text: &str, kind: Kind) -> Option<Repr> {
        (**self).try_parse(text, kind)
    }

    fn try_format(&self, value: Repr, kind: Kind) -> Option<String> {
        (**self).try_format(value, kind)
    }
}

impl<C: Converter + ?Sized> Converter for std::sync::Arc<C> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn try_parse(&self, text: &str, kind: Kind) -> Option<Repr> {
        (**self).try_parse(text, kind)
    }

    fn try_format(&self, value: Repr, kind: Kind) -> Option<String> {
        (**self).try_format(value, kind)
    }
}

/// Typed helpers over any [`Converter`].
pub trait ConverterExt: Converter {
    fn parse<T: Convertible>(&self, text: &str) -> Option<T> {
        T::from_repr(self.try_parse(text, T::kind())?)
    }

    fn format<T: Convertible>(&self, value: T) -> Option<String> {
        self.try_format(value.into_repr(), T::kind())
    }
}

impl<C: Converter + ?Sized> ConverterExt for C {}
