use std::rc::Rc;

use ordered_float::OrderedFloat;

use crate::scalar::Scalar;

// A canonical key is constructed so that any two scalars that compare
// loosely equal as numbers produce the same key. Integral floats collapse
// into integer keys; NaN and the infinities get their own variants so that
// every float is keyable.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScalarKey {
    Null,
    Boolean(bool),
    Integer(i64),
    /// A finite, non-integral float.
    Float(OrderedFloat<f64>),
    PositiveInfinity,
    NegativeInfinity,
    NaN,
    String(Rc<str>),
}

impl ScalarKey {
    pub fn new(scalar: &Scalar) -> ScalarKey {
        match scalar {
            Scalar::Null => ScalarKey::Null,
            Scalar::Boolean(b) => ScalarKey::Boolean(*b),
            Scalar::Integer(i) => ScalarKey::Integer(*i),
            Scalar::Float(OrderedFloat(f)) => {
                if f.is_nan() {
                    ScalarKey::NaN
                } else if f.is_infinite() {
                    if f.is_sign_positive() {
                        ScalarKey::PositiveInfinity
                    } else {
                        ScalarKey::NegativeInfinity
                    }
                } else if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    // integral floats are stored as integers, so they have
                    // the same key
                    ScalarKey::Integer(*f as i64)
                } else {
                    ScalarKey::Float(OrderedFloat(*f))
                }
            }
            Scalar::String(s) => ScalarKey::String(s.clone()),
        }
    }

    /// The scalar this key stands for. Keys that collapsed (integral floats)
    /// come back in their canonical integer form.
    pub fn to_scalar(&self) -> Scalar {
        match self {
            ScalarKey::Null => Scalar::Null,
            ScalarKey::Boolean(b) => Scalar::Boolean(*b),
            ScalarKey::Integer(i) => Scalar::Integer(*i),
            ScalarKey::Float(f) => Scalar::Float(*f),
            ScalarKey::PositiveInfinity => Scalar::Float(OrderedFloat(f64::INFINITY)),
            ScalarKey::NegativeInfinity => Scalar::Float(OrderedFloat(f64::NEG_INFINITY)),
            ScalarKey::NaN => Scalar::Float(OrderedFloat(f64::NAN)),
            ScalarKey::String(s) => Scalar::String(s.clone()),
        }
    }
}

impl From<&Scalar> for ScalarKey {
    fn from(scalar: &Scalar) -> Self {
        ScalarKey::new(scalar)
    }
}
