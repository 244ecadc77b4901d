use core::fmt;

/// The container kind of an introspected value.
///
/// Indexed tokens (`name[3]`) require a [`Sequence`](Shape::Sequence) or an
/// [`Array`](Shape::Array), mapped tokens (`name(key)`) require a
/// [`Mapping`](Shape::Mapping).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A plain object or scalar, only reachable through named accessors.
    Object,
    /// A fixed-size array, e.g. `[T; N]` or `Box<[T]>`.
    Array,
    /// A growable ordered sequence, e.g. `Vec<T>`.
    Sequence,
    /// An associative container keyed by strings, e.g. `HashMap<String, V>`.
    Mapping,
}

impl Shape {
    /// Folds [`Array`](Shape::Array) into [`Sequence`](Shape::Sequence).
    ///
    /// Arrays and sequences expose the same element accessor,
    /// so after normalization they are handled identically.
    ///
    /// ```
    /// use ix_introspect::introspection::Shape;
    ///
    /// assert_eq!(Shape::Array.normalize(), Shape::Sequence);
    /// assert_eq!(Shape::Mapping.normalize(), Shape::Mapping);
    /// ```
    #[inline]
    pub const fn normalize(self) -> Self {
        match self {
            Shape::Array => Shape::Sequence,
            other => other,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::Object => "object",
            Shape::Array => "array",
            Shape::Sequence => "sequence",
            Shape::Mapping => "mapping",
        })
    }
}
