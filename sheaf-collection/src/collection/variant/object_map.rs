use ahash::HashMap;

use crate::collection::traits::{BoxedPairIter, CollectionCore};
use crate::error::{Error, Result};
use crate::object::ObjectRef;
use crate::value::Value;

/// The identity-keyed eager collection.
///
/// Keys are object identities: two structurally equal but distinct objects
/// occupy independent entries. Iteration order is key-insertion order. The
/// side table maps the object address to its slot in the ordered entry
/// list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IdentityObjectMap {
    entries: Vec<(ObjectRef, Value)>,
    // object address -> slot in entries
    index: HashMap<usize, usize>,
}

impl IdentityObjectMap {
    pub fn new(entries: Vec<(ObjectRef, Value)>) -> Self {
        let mut map = Self::default();
        for (key, value) in entries {
            map.set(key, value);
        }
        map
    }

    pub fn entries(&self) -> &[(ObjectRef, Value)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(ObjectRef, Value)> {
        self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &ObjectRef> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Non-throwing lookup. The key must still be an object; a scalar or
    /// collection key is a type violation, not an absence.
    pub fn get(&self, key: &Value) -> Result<Option<&Value>> {
        let object = Self::object_key(key)?;
        Ok(self
            .index
            .get(&object.address())
            .map(|slot| &self.entries[*slot].1))
    }

    /// Throwing lookup.
    pub fn require(&self, key: &Value) -> Result<&Value> {
        let object = Self::object_key(key)?;
        self.get_object(object)
            .ok_or_else(|| Error::KeyNotFound(format!("object@{:#x}", object.address())))
    }

    /// Lookup with an already-typed key.
    pub fn get_object(&self, key: &ObjectRef) -> Option<&Value> {
        self.index
            .get(&key.address())
            .map(|slot| &self.entries[*slot].1)
    }

    pub fn contains_key(&self, key: &ObjectRef) -> bool {
        self.index.contains_key(&key.address())
    }

    /// Insert or update. An update keeps the entry's original position.
    pub fn set(&mut self, key: ObjectRef, value: Value) {
        match self.index.get(&key.address()) {
            Some(slot) => {
                self.entries[*slot].1 = value;
            }
            None => {
                self.index.insert(key.address(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Remove an entry; later slots in the side table shift down.
    pub fn remove(&mut self, key: &ObjectRef) -> Option<Value> {
        let slot = self.index.remove(&key.address())?;
        let (_, value) = self.entries.remove(slot);
        for s in self.index.values_mut() {
            if *s > slot {
                *s -= 1;
            }
        }
        Some(value)
    }

    fn object_key(key: &Value) -> Result<&ObjectRef> {
        key.as_object()
            .ok_or(Error::InvalidKeyType { expected: "object" })
    }
}

impl CollectionCore for IdentityObjectMap {
    fn count(&self) -> usize {
        self.entries.len()
    }

    fn iter(&self) -> BoxedPairIter<'_> {
        Box::new(
            self.entries
                .iter()
                .map(|(k, v)| (Value::Object(k.clone()), v.clone())),
        )
    }
}

impl FromIterator<(ObjectRef, Value)> for IdentityObjectMap {
    fn from_iter<T: IntoIterator<Item = (ObjectRef, Value)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
