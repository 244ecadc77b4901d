//! Tokenizing and classifying path segments.

use alloc::borrow::Cow;
use core::fmt;
use std::sync::LazyLock;

use regex::Regex;

static INDEXED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9_]+)\[([0-9]+)\]").expect("indexed token pattern should compile")
});

static MAPPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z0-9_]+)\((.+)\)").expect("mapped token pattern should compile")
});

// -----------------------------------------------------------------------------
// Tokenizer

/// Splits `expression` on `.`, skipping empty segments.
///
/// Leading, trailing and repeated delimiters never produce a segment.
///
/// ```
/// use ix_introspect::access::tokenize;
///
/// let segments: Vec<_> = tokenize("..a..b[1].").collect();
/// assert_eq!(segments, ["a", "b[1]"]);
/// assert_eq!(tokenize("").count(), 0);
/// ```
#[inline]
pub fn tokenize(expression: &str) -> impl Iterator<Item = &str> {
    expression.split('.').filter(|segment| !segment.is_empty())
}

/// Removes the leading segment naming the root object.
///
/// Everything up to and including the first `.` is dropped. An expression
/// without any `.` is returned unchanged.
///
/// ```
/// use ix_introspect::access::trim_root_token;
///
/// assert_eq!(trim_root_token("project.build.sourceDirectory"), "build.sourceDirectory");
/// assert_eq!(trim_root_token("project"), "project");
/// ```
#[inline]
pub fn trim_root_token(expression: &str) -> &str {
    match expression.find('.') {
        Some(index) => &expression[index + 1..],
        None => expression,
    }
}

// -----------------------------------------------------------------------------
// Token

/// A classified path segment.
///
/// # Syntax
///
/// - Plain: `name`, read through `getName` (or `isName`).
/// - Indexed: `name[3]`, element `3` of the sequence or array returned by `getName`.
/// - Mapped: `name(key)`, entry `key` of the mapping returned by `getName`.
///
/// Names consist of ASCII letters, digits and `_`. Mapped keys are taken
/// verbatim up to the last `)`, parentheses inside the key are not escaped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token<'a> {
    /// Simple property access.
    Plain(Cow<'a, str>),
    /// Element access on a sequence or array property.
    Indexed { name: Cow<'a, str>, index: usize },
    /// Key lookup on a mapping property.
    Mapped { name: Cow<'a, str>, key: Cow<'a, str> },
}

impl<'a> Token<'a> {
    /// Classifies a raw segment. The first matching form wins:
    /// indexed, then mapped, then plain.
    ///
    /// ```
    /// use ix_introspect::access::Token;
    ///
    /// assert_eq!(
    ///     Token::classify("addresses[1]"),
    ///     Token::Indexed { name: "addresses".into(), index: 1 },
    /// );
    /// assert_eq!(
    ///     Token::classify("addresses(home)"),
    ///     Token::Mapped { name: "addresses".into(), key: "home".into() },
    /// );
    /// assert_eq!(Token::classify("street"), Token::Plain("street".into()));
    /// ```
    pub fn classify(segment: &'a str) -> Self {
        if let Some(caps) = INDEXED.captures(segment) {
            let (_, [name, digits]) = caps.extract();
            // Digits only, so parsing can only fail on overflow.
            let index = digits.parse().unwrap_or(usize::MAX);
            return Token::Indexed {
                name: Cow::Borrowed(name),
                index,
            };
        }

        if let Some(caps) = MAPPED.captures(segment) {
            let (_, [name, key]) = caps.extract();
            return Token::Mapped {
                name: Cow::Borrowed(name),
                key: Cow::Borrowed(key),
            };
        }

        Token::Plain(Cow::Borrowed(segment))
    }

    /// Returns the property name of the token.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Token::Plain(name) | Token::Indexed { name, .. } | Token::Mapped { name, .. } => name,
        }
    }

    /// Converts this into an "owned" value.
    pub fn into_owned(self) -> Token<'static> {
        match self {
            Token::Plain(name) => Token::Plain(Cow::Owned(name.into_owned())),
            Token::Indexed { name, index } => Token::Indexed {
                name: Cow::Owned(name.into_owned()),
                index,
            },
            Token::Mapped { name, key } => Token::Mapped {
                name: Cow::Owned(name.into_owned()),
                key: Cow::Owned(key.into_owned()),
            },
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Plain(name) => f.write_str(name),
            Token::Indexed { name, index } => write!(f, "{name}[{index}]"),
            Token::Mapped { name, key } => write!(f, "{name}({key})"),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
