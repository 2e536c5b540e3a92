use ahash::HashMap;

use sheaf_value::{Scalar, ScalarKey};

use crate::collection::traits::{BoxedPairIter, CollectionCore};
use crate::error::{Error, Result};
use crate::value::Value;

/// The scalar-keyed eager collection.
///
/// Keys are unique under their canonical form (so `1` and `1.0` are the
/// same key), insertion order is preserved across mutation, and a write to
/// an existing key updates the value in place: last write wins, first
/// insertion keeps the position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyValueMap {
    entries: Vec<(Scalar, Value)>,
    // canonical key -> slot in entries
    index: HashMap<ScalarKey, usize>,
}

impl KeyValueMap {
    pub fn new(entries: Vec<(Scalar, Value)>) -> Self {
        let mut map = Self::default();
        for (key, value) in entries {
            map.set(key, value);
        }
        map
    }

    pub fn entries(&self) -> &[(Scalar, Value)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(Scalar, Value)> {
        self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &Scalar> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Non-throwing lookup.
    pub fn get(&self, key: &Scalar) -> Option<&Value> {
        let slot = self.index.get(&ScalarKey::new(key))?;
        Some(&self.entries[*slot].1)
    }

    /// Throwing lookup.
    pub fn require(&self, key: &Scalar) -> Result<&Value> {
        self.get(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    pub fn contains_key(&self, key: &Scalar) -> bool {
        self.index.contains_key(&ScalarKey::new(key))
    }

    /// Insert or update. An update keeps the entry's original position.
    pub fn set(&mut self, key: Scalar, value: Value) {
        let canonical = ScalarKey::new(&key);
        match self.index.get(&canonical) {
            Some(slot) => {
                self.entries[*slot].1 = value;
            }
            None => {
                self.index.insert(canonical, self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Remove an entry. Later entries keep their keys; only their slots in
    /// the side table shift down.
    pub fn remove(&mut self, key: &Scalar) -> Option<Value> {
        let slot = self.index.remove(&ScalarKey::new(key))?;
        let (_, value) = self.entries.remove(slot);
        for s in self.index.values_mut() {
            if *s > slot {
                *s -= 1;
            }
        }
        Some(value)
    }
}

impl CollectionCore for KeyValueMap {
    fn count(&self) -> usize {
        self.entries.len()
    }

    fn iter(&self) -> BoxedPairIter<'_> {
        Box::new(
            self.entries
                .iter()
                .map(|(k, v)| (Value::Scalar(k.clone()), v.clone())),
        )
    }
}

impl FromIterator<(Scalar, Value)> for KeyValueMap {
    fn from_iter<T: IntoIterator<Item = (Scalar, Value)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, i64)]) -> KeyValueMap {
        entries
            .iter()
            .map(|(k, v)| (Scalar::from(*k), Value::from(*v)))
            .collect()
    }

    #[test]
    fn test_insertion_order_preserved() {
        let m = map(&[("b", 1), ("a", 2), ("c", 3)]);
        let keys: Vec<String> = m.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_last_write_wins_in_place() {
        let mut m = map(&[("a", 1), ("b", 2)]);
        m.set(Scalar::from("a"), Value::from(9));
        assert_eq!(m.count(), 2);
        assert_eq!(m.get(&Scalar::from("a")), Some(&Value::from(9)));
        // position of the first insertion is kept
        let keys: Vec<String> = m.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_canonical_keys_unify_integer_and_float() {
        let mut m = KeyValueMap::default();
        m.set(Scalar::from(1), Value::from("int"));
        m.set(Scalar::from(1.0), Value::from("float"));
        assert_eq!(m.count(), 1);
        assert_eq!(m.get(&Scalar::from(1)), Some(&Value::from("float")));
    }

    #[test]
    fn test_require_absent_key() {
        let m = map(&[("a", 1)]);
        assert_eq!(
            m.require(&Scalar::from("missing")),
            Err(Error::KeyNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_remove_keeps_order_and_lookups() {
        let mut m = map(&[("a", 1), ("b", 2), ("c", 3)]);
        assert_eq!(m.remove(&Scalar::from("b")), Some(Value::from(2)));
        assert_eq!(m.count(), 2);
        assert_eq!(m.get(&Scalar::from("c")), Some(&Value::from(3)));
        let keys: Vec<String> = m.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "c"]);
        assert_eq!(m.remove(&Scalar::from("b")), None);
    }

    #[test]
    fn test_mixed_scalar_keys() {
        let mut m = KeyValueMap::default();
        m.set(Scalar::from("firstname"), Value::from("John"));
        m.set(Scalar::from("lastname"), Value::from("Doe"));
        m.set(Scalar::from("age"), Value::from(25));
        m.set(Scalar::from(10), Value::from(2));
        assert_eq!(m.count(), 4);
        assert!(m.contains_key(&Scalar::from(10)));
    }
}
