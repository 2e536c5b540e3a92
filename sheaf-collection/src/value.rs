use std::fmt;
use std::rc::Rc;

use sheaf_value::Scalar;

use crate::collection::Collection;
use crate::object::ObjectRef;

/// A value held by a collection: a scalar leaf, a nested collection, or an
/// object reference.
///
/// Keys are values too: an index-sequence yields integer scalar keys, a
/// key-value map scalar keys, an identity-object map object keys.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Collection(Collection),
    Object(ObjectRef),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Scalar(s) if s.is_null())
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Value::Collection(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// The null scalar, the sentinel of empty fixed-capacity slots.
    pub fn null() -> Value {
        Value::Scalar(Scalar::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(s) => write!(f, "{}", s),
            Value::Collection(_) => write!(f, "collection"),
            Value::Object(o) => write!(f, "object@{:#x}", o.address()),
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<Collection> for Value {
    fn from(c: Collection) -> Self {
        Value::Collection(c)
    }
}

impl From<ObjectRef> for Value {
    fn from(o: ObjectRef) -> Self {
        Value::Object(o)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(b.into())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Scalar(i.into())
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Scalar(i.into())
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Scalar(i.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Scalar(f.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s.into())
    }
}

impl From<Rc<str>> for Value {
    fn from(s: Rc<str>) -> Self {
        Value::Scalar(s.into())
    }
}
