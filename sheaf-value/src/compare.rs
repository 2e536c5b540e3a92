use std::cmp::Ordering;

use ordered_float::OrderedFloat;

use crate::scalar::Scalar;

impl Scalar {
    /// Three-way comparison between two scalars.
    ///
    /// Numbers order numerically across the integer and float variants,
    /// strings lexicographically, booleans false-before-true. Floats use
    /// the [`OrderedFloat`] total order, so NaN is comparable and sorts
    /// above every other number. Any other cross-variant pair is
    /// incomparable and yields `None`.
    pub fn compare(&self, other: &Scalar) -> Option<Ordering> {
        use Scalar::*;

        match (self, other) {
            (Null, Null) => Some(Ordering::Equal),
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (Integer(a), Integer(b)) => Some(a.cmp(b)),
            (Float(a), Float(b)) => Some(a.cmp(b)),
            (String(a), String(b)) => Some(a.as_ref().cmp(b.as_ref())),
            _ => {
                let a = self.as_number()?;
                let b = other.as_number()?;
                Some(OrderedFloat(a).cmp(&OrderedFloat(b)))
            }
        }
    }

    /// Loose equality: numeric across the integer and float variants,
    /// same-variant equality otherwise.
    pub fn loose_eq(&self, other: &Scalar) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }

    /// Strict equality: same variant, equal value.
    pub fn strict_eq(&self, other: &Scalar) -> bool {
        self == other
    }
}

/// The fixed operator set of the boolean query layer.
///
/// `Eq`/`Ne` are the loose forms, `StrictEq`/`StrictNe` additionally require
/// the same scalar variant. The ordering operators and `Cmp` all go through
/// [`Scalar::compare`]; an incomparable pair never matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    Eq,
    StrictEq,
    Ne,
    StrictNe,
    Lt,
    Le,
    Gt,
    Ge,
    /// Three-way compare used as a truth value: matches when the operands
    /// are comparable and unequal.
    Cmp,
}

impl Comparator {
    pub fn evaluate(&self, left: &Scalar, right: &Scalar) -> bool {
        use Comparator::*;

        match self {
            Eq => left.loose_eq(right),
            StrictEq => left.strict_eq(right),
            Ne => !left.loose_eq(right),
            StrictNe => !left.strict_eq(right),
            Lt => matches!(left.compare(right), Some(Ordering::Less)),
            Le => matches!(
                left.compare(right),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Gt => matches!(left.compare(right), Some(Ordering::Greater)),
            Ge => matches!(
                left.compare(right),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Cmp => matches!(
                left.compare(right),
                Some(Ordering::Less | Ordering::Greater)
            ),
        }
    }
}
