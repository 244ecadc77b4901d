//! Pre-parsed, reusable path expressions.

use alloc::boxed::Box;
use core::fmt;

use ix_utils::vec::FastVec;

use crate::access::{EvaluationError, PathWalker, Token, tokenize, trim_root_token};
use crate::introspection::{Introspect, Value};

/// A path expression tokenized and classified once, evaluated many times.
///
/// [`PathWalker::evaluate`] classifies every segment on each call. When the
/// same expression is evaluated repeatedly, parse it once into a
/// `PropertyPath` instead.
///
/// # Examples
///
/// ```
/// use ix_introspect::access::{PathWalker, PropertyPath};
///
/// let path = PropertyPath::parse("list.size", true);
/// assert_eq!(path.len(), 1);
///
/// let walker = PathWalker::new();
/// let mut list = vec![1_u8, 2, 3];
///
/// let size = path.evaluate(&walker, &list).unwrap().unwrap();
/// assert_eq!(size.downcast_ref::<usize>(), Some(&3));
///
/// list.push(4);
/// let size = path.evaluate(&walker, &list).unwrap().unwrap();
/// assert_eq!(size.downcast_ref::<usize>(), Some(&4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    expression: Box<str>,
    trim_root: bool,
    tokens: Box<[Token<'static>]>,
}

impl PropertyPath {
    /// Parses `expression`, copying every segment.
    ///
    /// With `trim_root` the leading segment naming the root is dropped, see
    /// [`trim_root_token`].
    pub fn parse(expression: &str, trim_root: bool) -> Self {
        let mut vec: FastVec<Token<'static>, 8> = FastVec::new();
        let data = vec.get();

        for segment in tokenize(Self::walked(expression, trim_root)) {
            data.push(Token::classify(segment).into_owned());
        }

        Self {
            expression: expression.into(),
            trim_root,
            tokens: vec.into_boxed_slice(),
        }
    }

    /// Parses a `'static` expression without copying its segments.
    ///
    /// ```
    /// # use ix_introspect::access::{PropertyPath, Token};
    /// let path = PropertyPath::parse_static("user.addresses(home).street", true);
    /// assert_eq!(
    ///     path.tokens()[0],
    ///     Token::Mapped { name: "addresses".into(), key: "home".into() },
    /// );
    /// ```
    pub fn parse_static(expression: &'static str, trim_root: bool) -> Self {
        let mut vec: FastVec<Token<'static>, 8> = FastVec::new();
        let data = vec.get();

        for segment in tokenize(Self::walked(expression, trim_root)) {
            data.push(Token::classify(segment));
        }

        Self {
            expression: expression.into(),
            trim_root,
            tokens: vec.into_boxed_slice(),
        }
    }

    #[inline]
    fn walked(expression: &str, trim_root: bool) -> &str {
        if trim_root {
            trim_root_token(expression)
        } else {
            expression
        }
    }

    /// Returns the number of tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the path has no tokens and evaluates to the root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the classified tokens.
    #[inline]
    pub fn tokens(&self) -> &[Token<'static>] {
        &self.tokens
    }

    /// Returns the expression this path was parsed from.
    #[inline]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Evaluates the path against `root` through `walker`'s cache.
    ///
    /// The walker's trim option is ignored, trimming was decided at parse time.
    pub fn evaluate<'a>(
        &self,
        walker: &PathWalker,
        root: &'a dyn Introspect,
    ) -> Result<Option<Value<'a>>, EvaluationError> {
        let segments = tokenize(Self::walked(&self.expression, self.trim_root));
        let mut current = Value::Ref(root);
        for (segment, token) in segments.zip(self.tokens.iter()) {
            current = match walker.advance(&self.expression, segment, current, token)? {
                Some(value) => value,
                None => return Ok(None),
            };
        }
        Ok(Some(current))
    }
}

impl fmt::Display for PropertyPath {
    /// Renders the normalized path, segments joined by `.`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            fmt::Display::fmt(token, f)?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests
