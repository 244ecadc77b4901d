use alloc::string::{String, ToString};
use core::error::Error;
use core::fmt;

use thiserror::Error;

use crate::catalog::{AmbiguousError, InvokeError};
use crate::introspection::Shape;

/// The kind of [`EvaluationError`], along with some kind-specific information.
#[derive(Debug, Error)]
pub enum EvaluationErrorKind {
    /// Two or more accessors match equally well.
    #[error(transparent)]
    Ambiguous(#[from] AmbiguousError),
    /// An indexed or mapped token met a container of the wrong shape.
    #[error("expected a {expected}, found an instance of `{actual}`")]
    TypeMismatch {
        expected: Shape,
        actual: &'static str,
    },
    /// The accessor failed while being invoked.
    #[error("accessor `{accessor}` failed: {source}")]
    InvocationFailed {
        accessor: String,
        #[source]
        source: InvokeError,
    },
    /// The result exists but is not of the requested type.
    #[error("expected a value of type `{expected}`, found `{actual}`")]
    InvalidDowncast {
        expected: &'static str,
        actual: &'static str,
    },
}

/// A hard failure while evaluating a path expression.
///
/// Soft failures (a missing accessor, a `null` on the way, an index past the
/// end) are not errors, they make the evaluation return `Ok(None)`.
///
/// Use the `Display` impl of this type to get information on the error.
#[derive(Debug)]
pub struct EvaluationError {
    expression: String,
    token: String,
    kind: EvaluationErrorKind,
}

impl EvaluationError {
    pub(crate) fn new(expression: &str, token: impl fmt::Display, kind: EvaluationErrorKind) -> Self {
        Self {
            expression: expression.to_string(),
            token: token.to_string(),
            kind,
        }
    }

    /// Returns the kind of [`EvaluationError`].
    #[inline]
    pub fn kind(&self) -> &EvaluationErrorKind {
        &self.kind
    }

    /// Consumes the error, returning its kind.
    ///
    /// ```
    /// use ix_introspect::access::{EvaluationErrorKind, PathWalker};
    ///
    /// let counts = vec![3_u8];
    /// let err = PathWalker::new().evaluate_as::<u64>("counts.size", &counts).unwrap_err();
    /// assert!(matches!(
    ///     err.into_kind(),
    ///     EvaluationErrorKind::InvalidDowncast { expected: "u64", actual: "usize" },
    /// ));
    /// ```
    #[inline]
    pub fn into_kind(self) -> EvaluationErrorKind {
        self.kind
    }

    /// Returns the evaluated expression.
    #[inline]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Returns the token that failed, in its source form.
    #[inline]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns `true` if the error comes from an ambiguous accessor lookup.
    #[inline]
    pub fn is_ambiguous(&self) -> bool {
        matches!(self.kind, EvaluationErrorKind::Ambiguous(_))
    }

    /// Returns `true` if a container had the wrong shape.
    #[inline]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self.kind, EvaluationErrorKind::TypeMismatch { .. })
    }
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error evaluating `{}` at token `{}`: {}",
            self.expression, self.token, self.kind
        )
    }
}

impl Error for EvaluationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.kind.source()
    }
}
