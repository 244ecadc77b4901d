use alloc::boxed::Box;
use alloc::string::String;
use core::error::Error;

use thiserror::Error;

/// An error raised while invoking an [`Accessor`](super::Accessor).
#[derive(Debug, Error)]
pub enum InvokeError {
    /// An element accessor was called with an index past the end.
    ///
    /// Path evaluation treats this as "no value" rather than a failure.
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    /// The accessor was invoked on a value of another type.
    #[error("accessor expects a receiver of type `{expected}`, found `{actual}`")]
    ReceiverMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    /// The argument has a type the accessor cannot handle.
    #[error("accessor expects an argument of type `{expected}`, found `{actual}`")]
    ArgumentMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    /// The accessor was invoked with the wrong number of arguments.
    #[error("accessor takes {expected} argument(s), {actual} given")]
    ArgumentCount { expected: usize, actual: usize },
    /// A borrowed value had to be detached from an owned intermediate,
    /// but its type does not support cloning.
    #[error("values of type `{type_name}` cannot be cloned")]
    NotCloneable { type_name: &'static str },
    /// The accessor itself failed.
    #[error("accessor raised an error: {0}")]
    Failed(#[source] Box<dyn Error + Send + Sync>),
}

impl InvokeError {
    /// Wraps an error raised inside an accessor.
    ///
    /// ```
    /// use ix_introspect::catalog::InvokeError;
    ///
    /// let err = InvokeError::failed("disk unavailable");
    /// assert_eq!(err.to_string(), "accessor raised an error: disk unavailable");
    /// ```
    #[inline]
    pub fn failed(err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Failed(err.into())
    }

    /// Returns `true` for [`IndexOutOfBounds`](Self::IndexOutOfBounds).
    #[inline]
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, Self::IndexOutOfBounds { .. })
    }
}

/// Two or more accessors match a lookup equally well.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "ambiguous accessor `{accessor}` on `{type_name}`: {candidates} candidates match equally well"
)]
pub struct AmbiguousError {
    /// The type the lookup ran against.
    pub type_name: &'static str,
    /// The requested accessor name.
    pub accessor: String,
    /// Number of candidates tied for most specific.
    pub candidates: usize,
}
