/// Outcome of a single conversion: a value or nothing.
///
/// Failed conversions are not errors. The caller picks a fallback with
/// [`value_or`](Self::value_or) and friends, or asserts success with
/// [`value`](Self::value), which panics on `Empty`.
#[must_use = "a conversion result does nothing unless its value is read"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionResult<T> {
    Value(T),
    Empty,
}

impl<T> ConversionResult<T> {
    pub fn has_value(&self) -> bool {
        matches!(self, ConversionResult::Value(_))
    }

    pub fn is_empty(&self) -> bool {
        !self.has_value()
    }

    /// The converted value.
    ///
    /// # Panics
    ///
    /// Panics if the conversion failed. Reading an empty result without a
    /// fallback is a logic error in the caller.
    #[track_caller]
    pub fn value(self) -> T {
        match self {
            ConversionResult::Value(v) => v,
            ConversionResult::Empty => panic!("value() called on an empty conversion result"),
        }
    }

    pub fn value_or(self, default: T) -> T {
        match self {
            ConversionResult::Value(v) => v,
            ConversionResult::Empty => default,
        }
    }

    /// Like [`value_or`](Self::value_or), but the fallback is computed only
    /// when needed.
    pub fn value_or_else(self, f: impl FnOnce() -> T) -> T {
        match self {
            ConversionResult::Value(v) => v,
            ConversionResult::Empty => f(),
        }
    }

    pub fn value_or_default(self) -> T
    where
        T: Default,
    {
        self.value_or_else(T::default)
    }

    pub fn as_ref(&self) -> ConversionResult<&T> {
        match self {
            ConversionResult::Value(v) => ConversionResult::Value(v),
            ConversionResult::Empty => ConversionResult::Empty,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ConversionResult<U> {
        match self {
            ConversionResult::Value(v) => ConversionResult::Value(f(v)),
            ConversionResult::Empty => ConversionResult::Empty,
        }
    }

    pub fn into_option(self) -> Option<T> {
        self.into()
    }

    /// Turn an empty result into a caller-chosen error.
    pub fn ok_or_else<E>(self, err: impl FnOnce() -> E) -> Result<T, E> {
        self.into_option().ok_or_else(err)
    }
}

impl<T> Default for ConversionResult<T> {
    fn default() -> Self {
        ConversionResult::Empty
    }
}

impl<T> From<Option<T>> for ConversionResult<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => ConversionResult::Value(v),
            None => ConversionResult::Empty,
        }
    }
}

impl<T> From<ConversionResult<T>> for Option<T> {
    fn from(value: ConversionResult<T>) -> Self {
        match value {
            ConversionResult::Value(v) => Some(v),
            ConversionResult::Empty => None,
        }
    }
}
