use std::fmt;
use std::rc::Rc;

use ordered_float::OrderedFloat;

/// A dynamic scalar value.
///
/// Scalars are the values that can appear as collection keys, and the leaf
/// values inside any collection. Strings are `Rc`-backed so cloning a scalar
/// is cheap.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// The absent value.
    Null,
    Boolean(bool),
    Integer(i64),
    /// Stored as [`OrderedFloat`] so floats can participate in hashing and
    /// total ordering alongside the other variants.
    Float(OrderedFloat<f64>),
    String(Rc<str>),
}

impl Scalar {
    /// Whether this scalar counts as present. `Null` is the only absent
    /// scalar; group derivation drops rows whose derived value is absent.
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// The truth value of the scalar.
    ///
    /// - `Null` is false.
    /// - A boolean is its own value.
    /// - A number is true unless it is zero or NaN.
    /// - A string is true unless it is empty.
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Null => false,
            Scalar::Boolean(b) => *b,
            Scalar::Integer(i) => *i != 0,
            Scalar::Float(OrderedFloat(f)) => *f != 0.0 && !f.is_nan(),
            Scalar::String(s) => !s.is_empty(),
        }
    }

    /// The numeric reading of the scalar, if it has one. Only integers and
    /// floats read as numbers; loose comparison bridges exactly those two.
    pub(crate) fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Integer(i) => Some(*i as f64),
            Scalar::Float(OrderedFloat(f)) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, "null"),
            Scalar::Boolean(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(OrderedFloat(v)) => write!(f, "{}", v),
            Scalar::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Boolean(b)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Integer(i)
    }
}

impl From<i32> for Scalar {
    fn from(i: i32) -> Self {
        Scalar::Integer(i as i64)
    }
}

impl From<usize> for Scalar {
    fn from(i: usize) -> Self {
        Scalar::Integer(i as i64)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Float(OrderedFloat(f))
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.into())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s.into())
    }
}

impl From<Rc<str>> for Scalar {
    fn from(s: Rc<str>) -> Self {
        Scalar::String(s)
    }
}
