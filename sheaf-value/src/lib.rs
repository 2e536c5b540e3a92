//! Scalar values for sheaf collections.
//!
//! A scalar is the leaf value of the collection system: null, a boolean, an
//! integer, a float or a string. This crate also carries the canonical
//! hashable key form for scalars and the comparator evaluator used by the
//! matrix query layer. It knows nothing about collections themselves.

mod compare;
mod key;
mod scalar;

pub use compare::Comparator;
pub use key::ScalarKey;
pub use scalar::Scalar;
