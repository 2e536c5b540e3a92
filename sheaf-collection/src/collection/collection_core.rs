// The Collection enum wires the variant structs up behind one type. The
// dispatch is spelled out per variant so each arm keeps its concrete type;
// only the pair iterators are boxed.

use sheaf_value::{Scalar, ScalarKey};

use crate::error::{Error, Result};
use crate::object::ObjectRef;
use crate::value::Value;

use super::traits::{BoxedPairIter, CollectionCore, OwnedPairIter};
use super::variant::{
    FixedCapacityArray, IdentityObjectMap, IndexSequence, KeyValueMap, LazySequence,
};

/// A collection: an ordered or identity-keyed mapping from key to value.
///
/// The eager variants own their storage and are mutated in place by their
/// owner (through the `as_*_mut` accessors); the derived operation library
/// never mutates a source, it reads and returns new instances.
#[derive(Debug, Clone, PartialEq)]
pub enum Collection {
    Sequence(IndexSequence),
    Map(KeyValueMap),
    ObjectMap(IdentityObjectMap),
    Fixed(FixedCapacityArray),
    Lazy(LazySequence),
}

impl Default for Collection {
    fn default() -> Self {
        Self::Sequence(IndexSequence::default())
    }
}

// How a functional operation rebuilds its result from selected pairs:
// index-like sources renumber from 0, keyed sources keep their keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rebuild {
    Renumber,
    Keyed,
    IdentityKeyed,
}

impl Collection {
    /// An index-sequence over the given values.
    pub fn from_values(values: Vec<Value>) -> Collection {
        Collection::Sequence(IndexSequence::new(values))
    }

    /// A key-value map over the given entries, in order, last write wins.
    pub fn from_entries(entries: Vec<(Scalar, Value)>) -> Collection {
        Collection::Map(KeyValueMap::new(entries))
    }

    /// An identity-object map over the given entries, in order.
    pub fn from_object_entries(entries: Vec<(ObjectRef, Value)>) -> Collection {
        Collection::ObjectMap(IdentityObjectMap::new(entries))
    }

    /// A fixed-capacity array of `size` sentinel slots.
    pub fn fixed(size: usize) -> Collection {
        Collection::Fixed(FixedCapacityArray::new(size))
    }

    /// A lazy sequence over a production routine.
    pub fn lazy<F>(produce: F) -> Collection
    where
        F: Fn() -> OwnedPairIter + 'static,
    {
        Collection::Lazy(LazySequence::new(produce))
    }

    pub fn as_sequence(&self) -> Option<&IndexSequence> {
        match self {
            Collection::Sequence(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut IndexSequence> {
        match self {
            Collection::Sequence(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&KeyValueMap> {
        match self {
            Collection::Map(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut KeyValueMap> {
        match self {
            Collection::Map(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn as_object_map(&self) -> Option<&IdentityObjectMap> {
        match self {
            Collection::ObjectMap(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn as_object_map_mut(&mut self) -> Option<&mut IdentityObjectMap> {
        match self {
            Collection::ObjectMap(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn as_fixed(&self) -> Option<&FixedCapacityArray> {
        match self {
            Collection::Fixed(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn as_fixed_mut(&mut self) -> Option<&mut FixedCapacityArray> {
        match self {
            Collection::Fixed(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn as_lazy(&self) -> Option<&LazySequence> {
        match self {
            Collection::Lazy(inner) => Some(inner),
            _ => None,
        }
    }

    /// Non-throwing subscript. Absence is `Ok(None)`; a key of the wrong
    /// kind for the variant is a type violation, and a fixed-capacity index
    /// outside its bounds is out of range.
    pub fn get(&self, key: &Value) -> Result<Option<Value>> {
        match self {
            Collection::Sequence(inner) => {
                Ok(inner.get(integer_key(key)?).cloned())
            }
            Collection::Map(inner) => Ok(inner.get(scalar_key(key)?).cloned()),
            Collection::ObjectMap(inner) => Ok(inner.get(key)?.cloned()),
            Collection::Fixed(inner) => inner.get(integer_key(key)?).map(|v| Some(v.clone())),
            Collection::Lazy(inner) => Ok(inner
                .iterate()
                .find(|(k, _)| key_matches(k, key))
                .map(|(_, v)| v)),
        }
    }

    /// Throwing subscript.
    pub fn require(&self, key: &Value) -> Result<Value> {
        match self {
            Collection::Sequence(inner) => Ok(inner.require(integer_key(key)?)?.clone()),
            Collection::Map(inner) => Ok(inner.require(scalar_key(key)?)?.clone()),
            Collection::ObjectMap(inner) => Ok(inner.require(key)?.clone()),
            Collection::Fixed(inner) => Ok(inner.get(integer_key(key)?)?.clone()),
            Collection::Lazy(_) => self
                .get(key)?
                .ok_or_else(|| Error::KeyNotFound(key.to_string())),
        }
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        matches!(self.get(key), Ok(Some(_)))
    }

    /// An owned pair iterator over a snapshot of this collection. For a
    /// lazy source this is a fresh invocation of the production routine,
    /// so nothing is materialized up front.
    pub(crate) fn into_pair_iter(self) -> OwnedPairIter {
        match self {
            Collection::Sequence(inner) => Box::new(
                inner
                    .into_values()
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (Value::from(i), v)),
            ),
            Collection::Map(inner) => Box::new(
                inner
                    .into_entries()
                    .into_iter()
                    .map(|(k, v)| (Value::Scalar(k), v)),
            ),
            Collection::ObjectMap(inner) => Box::new(
                inner
                    .into_entries()
                    .into_iter()
                    .map(|(k, v)| (Value::Object(k), v)),
            ),
            Collection::Fixed(inner) => Box::new(
                inner
                    .into_slots()
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (Value::from(i), v)),
            ),
            Collection::Lazy(inner) => inner.iterate(),
        }
    }

    pub(crate) fn rebuild_kind(&self) -> Rebuild {
        match self {
            Collection::Sequence(_) | Collection::Fixed(_) | Collection::Lazy(_) => {
                Rebuild::Renumber
            }
            Collection::Map(_) => Rebuild::Keyed,
            Collection::ObjectMap(_) => Rebuild::IdentityKeyed,
        }
    }

    /// Build the result collection of a functional operation from the
    /// pairs it selected, renumbering or preserving keys per the source
    /// variant.
    pub(crate) fn rebuild(&self, pairs: Vec<(Value, Value)>) -> Collection {
        rebuild_pairs(self.rebuild_kind(), pairs)
    }
}

pub(crate) fn rebuild_pairs(kind: Rebuild, pairs: Vec<(Value, Value)>) -> Collection {
    match kind {
        Rebuild::Renumber => {
            Collection::from_values(pairs.into_iter().map(|(_, v)| v).collect())
        }
        Rebuild::Keyed => Collection::from_entries(
            pairs
                .into_iter()
                .filter_map(|(k, v)| match k {
                    // map iteration yields scalar keys
                    Value::Scalar(s) => Some((s, v)),
                    _ => None,
                })
                .collect(),
        ),
        Rebuild::IdentityKeyed => Collection::from_object_entries(
            pairs
                .into_iter()
                .filter_map(|(k, v)| match k {
                    Value::Object(o) => Some((o, v)),
                    _ => None,
                })
                .collect(),
        ),
    }
}

// Keys compare the way their variant stores them: scalars under their
// canonical form, objects by identity.
fn key_matches(stored: &Value, wanted: &Value) -> bool {
    match (stored, wanted) {
        (Value::Scalar(a), Value::Scalar(b)) => ScalarKey::new(a) == ScalarKey::new(b),
        (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
        _ => false,
    }
}

fn scalar_key(key: &Value) -> Result<&Scalar> {
    key.as_scalar()
        .ok_or(Error::InvalidKeyType { expected: "scalar" })
}

fn integer_key(key: &Value) -> Result<i64> {
    let scalar = key
        .as_scalar()
        .ok_or(Error::InvalidKeyType {
            expected: "integer",
        })?;
    match ScalarKey::new(scalar) {
        ScalarKey::Integer(i) => Ok(i),
        _ => Err(Error::InvalidKeyType {
            expected: "integer",
        }),
    }
}

impl CollectionCore for Collection {
    fn count(&self) -> usize {
        match self {
            Collection::Sequence(inner) => inner.count(),
            Collection::Map(inner) => inner.count(),
            Collection::ObjectMap(inner) => inner.count(),
            Collection::Fixed(inner) => inner.count(),
            Collection::Lazy(inner) => inner.count(),
        }
    }

    fn iter(&self) -> BoxedPairIter<'_> {
        match self {
            Collection::Sequence(inner) => inner.iter(),
            Collection::Map(inner) => inner.iter(),
            Collection::ObjectMap(inner) => inner.iter(),
            Collection::Fixed(inner) => inner.iter(),
            Collection::Lazy(inner) => inner.iter(),
        }
    }

    fn pairs(&self) -> Vec<(Value, Value)> {
        match self {
            Collection::Sequence(inner) => inner.pairs(),
            Collection::Map(inner) => inner.pairs(),
            Collection::ObjectMap(inner) => inner.pairs(),
            Collection::Fixed(inner) => inner.pairs(),
            Collection::Lazy(inner) => inner.pairs(),
        }
    }
}

impl From<IndexSequence> for Collection {
    fn from(inner: IndexSequence) -> Self {
        Collection::Sequence(inner)
    }
}

impl From<KeyValueMap> for Collection {
    fn from(inner: KeyValueMap) -> Self {
        Collection::Map(inner)
    }
}

impl From<IdentityObjectMap> for Collection {
    fn from(inner: IdentityObjectMap) -> Self {
        Collection::ObjectMap(inner)
    }
}

impl From<FixedCapacityArray> for Collection {
    fn from(inner: FixedCapacityArray) -> Self {
        Collection::Fixed(inner)
    }
}

impl From<LazySequence> for Collection {
    fn from(inner: LazySequence) -> Self {
        Collection::Lazy(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_subscript_via_canonical_integer() {
        let c = Collection::from_values(vec![Value::from("a"), Value::from("b")]);
        // 1.0 collapses to the integer key 1
        assert_eq!(c.get(&Value::from(1.0)), Ok(Some(Value::from("b"))));
        assert_eq!(c.get(&Value::from(5)), Ok(None));
        assert_eq!(
            c.get(&Value::from("x")),
            Err(Error::InvalidKeyType {
                expected: "integer"
            })
        );
    }

    #[test]
    fn test_fixed_subscript_is_strict() {
        let c = Collection::fixed(2);
        assert!(matches!(
            c.get(&Value::from(2)),
            Err(Error::OutOfRange { index: 2, size: 2 })
        ));
    }

    #[test]
    fn test_map_require_and_get() {
        let c = Collection::from_entries(vec![(Scalar::from("a"), Value::from(1))]);
        assert_eq!(c.require(&Value::from("a")), Ok(Value::from(1)));
        assert_eq!(c.get(&Value::from("b")), Ok(None));
        assert_eq!(
            c.require(&Value::from("b")),
            Err(Error::KeyNotFound("b".to_string()))
        );
    }

    #[test]
    fn test_lazy_subscript_scans_a_fresh_traversal() {
        let c = Collection::Lazy(LazySequence::from_values(vec![
            Value::from("x"),
            Value::from("y"),
        ]));
        assert_eq!(c.get(&Value::from(1)), Ok(Some(Value::from("y"))));
        assert!(!c.contains_key(&Value::from(2)));
    }

    #[test]
    fn test_rebuild_renumbers_index_like_sources() {
        let c = Collection::from_values(vec![Value::from(1), Value::from(2)]);
        let rebuilt = c.rebuild(vec![(Value::from(7), Value::from(2))]);
        assert_eq!(rebuilt.pairs(), vec![(Value::from(0), Value::from(2))]);
    }
}
