//! Literal leaf values.

use std::fmt;
use std::sync::Arc;

/// A literal constant at a leaf of an expression tree.
///
/// Equality is structural and derived, so floats compare with IEEE
/// semantics: a `NaN` literal is unequal to itself and therefore matches
/// nothing, not even an identical `NaN` pattern.
#[derive(Clone, Debug, PartialEq)]
pub enum Lit {
    /// Signed integer.
    Int(i64),
    /// Double-precision float.
    Float(f64),
    /// String contents, shared.
    Str(Arc<str>),
    /// Boolean.
    Bool(bool),
    /// Single character.
    Char(char),
}

impl Lit {
    /// Build a string literal.
    #[inline]
    #[must_use]
    pub fn str(s: impl AsRef<str>) -> Self {
        Self::Str(Arc::from(s.as_ref()))
    }

    /// Whether this is an integer literal.
    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Self::Int(_))
    }

    /// Whether this is a float literal.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    /// Whether this is a string literal.
    #[inline]
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Self::Str(_))
    }

    /// Whether this is a boolean literal.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// Whether this is a character literal.
    #[inline]
    #[must_use]
    pub const fn is_char(&self) -> bool {
        matches!(self, Self::Char(_))
    }

    /// Whether this is an integer or float literal.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// The kind name, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Bool(_) => "boolean",
            Self::Char(_) => "character",
        }
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) if x.is_finite() && *x == x.trunc() => write!(f, "{x:.1}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Char(c) => write!(f, "{c:?}"),
        }
    }
}

impl From<i64> for Lit {
    #[inline]
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Lit {
    #[inline]
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for Lit {
    #[inline]
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<char> for Lit {
    #[inline]
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<&str> for Lit {
    #[inline]
    fn from(s: &str) -> Self {
        Self::str(s)
    }
}

impl From<String> for Lit {
    #[inline]
    fn from(s: String) -> Self {
        Self::Str(s.into())
    }
}
