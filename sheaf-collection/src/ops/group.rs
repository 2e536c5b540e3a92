use std::fmt;
use std::rc::Rc;

use ahash::{HashMap, HashMapExt};

use sheaf_value::{Scalar, ScalarKey};

use crate::collection::variant::KeyValueMap;
use crate::collection::{rebuild_pairs, Collection, CollectionCore, Rebuild};
use crate::value::Value;

/// One grouping criterion: a column to look up in each row, or a routine
/// deriving the group value from `(row, row_key)`.
#[derive(Clone)]
pub enum GroupKey {
    Column(Scalar),
    Derive(Rc<dyn Fn(&Value, &Value) -> Value>),
}

impl GroupKey {
    pub fn column(name: impl Into<Scalar>) -> Self {
        GroupKey::Column(name.into())
    }

    pub fn derive<F>(routine: F) -> Self
    where
        F: Fn(&Value, &Value) -> Value + 'static,
    {
        GroupKey::Derive(Rc::new(routine))
    }

    fn derive_value(&self, row: &Value, row_key: &Value) -> Value {
        match self {
            GroupKey::Column(name) => row
                .as_collection()
                .and_then(|c| c.get(&Value::Scalar(name.clone())).ok().flatten())
                .unwrap_or_else(Value::null),
            GroupKey::Derive(routine) => routine(row, row_key),
        }
    }
}

impl fmt::Debug for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Column(name) => f.debug_tuple("Column").field(name).finish(),
            GroupKey::Derive(_) => f.debug_struct("Derive").finish_non_exhaustive(),
        }
    }
}

impl From<&str> for GroupKey {
    fn from(name: &str) -> Self {
        GroupKey::column(name)
    }
}

impl From<Scalar> for GroupKey {
    fn from(name: Scalar) -> Self {
        GroupKey::Column(name)
    }
}

impl Collection {
    /// Group a matrix by one or more keys.
    ///
    /// The first key derives a group value per row; rows whose derived
    /// value is absent are dropped, every other row is filed under its
    /// group with its original row key. Remaining keys re-group each
    /// bucket recursively, so the result nests one level per key and the
    /// original row keys survive at the leaves. Group values bucket under
    /// their canonical scalar form; a non-scalar derived value counts as
    /// absent.
    pub fn group_by(&self, keys: &[GroupKey]) -> Collection {
        let Some((first, rest)) = keys.split_first() else {
            return self.clone();
        };

        let mut order: Vec<ScalarKey> = Vec::new();
        let mut buckets: HashMap<ScalarKey, (Scalar, Vec<(Value, Value)>)> = HashMap::new();
        for (row_key, row) in self.iter() {
            let group = match first.derive_value(&row, &row_key) {
                Value::Scalar(s) if !s.is_null() => s,
                _ => continue,
            };
            let canonical = ScalarKey::new(&group);
            match buckets.get_mut(&canonical) {
                Some((_, rows)) => rows.push((row_key, row)),
                None => {
                    order.push(canonical.clone());
                    buckets.insert(canonical, (group, vec![(row_key, row)]));
                }
            }
        }

        let mut result = KeyValueMap::default();
        for canonical in order {
            if let Some((group, rows)) = buckets.remove(&canonical) {
                let bucket = bucket_from_rows(rows);
                let bucket = if rest.is_empty() {
                    bucket
                } else {
                    bucket.group_by(rest)
                };
                result.set(group, Value::Collection(bucket));
            }
        }
        Collection::Map(result)
    }

    /// Occurrence counts of the values themselves.
    pub fn count_by(&self) -> Collection {
        self.count_by_with(|value, _| value.clone())
    }

    /// Occurrence counts of a derived key per element. Elements whose
    /// derived key is absent (or not a scalar) are dropped.
    pub fn count_by_with<F>(&self, mut derive: F) -> Collection
    where
        F: FnMut(&Value, &Value) -> Value,
    {
        let mut order: Vec<ScalarKey> = Vec::new();
        let mut counts: HashMap<ScalarKey, (Scalar, i64)> = HashMap::new();
        for (key, value) in self.iter() {
            let group = match derive(&value, &key) {
                Value::Scalar(s) if !s.is_null() => s,
                _ => continue,
            };
            let canonical = ScalarKey::new(&group);
            match counts.get_mut(&canonical) {
                Some((_, n)) => *n += 1,
                None => {
                    order.push(canonical.clone());
                    counts.insert(canonical, (group, 1));
                }
            }
        }

        let mut result = KeyValueMap::default();
        for canonical in order {
            if let Some((group, n)) = counts.remove(&canonical) {
                result.set(group, Value::from(n));
            }
        }
        Collection::Map(result)
    }
}

// Leaf buckets preserve the original row keys: scalar row keys rebuild as
// a key-value map, object row keys as an identity map.
fn bucket_from_rows(rows: Vec<(Value, Value)>) -> Collection {
    if rows.iter().any(|(k, _)| matches!(k, Value::Object(_))) {
        rebuild_pairs(Rebuild::IdentityKeyed, rows)
    } else {
        rebuild_pairs(Rebuild::Keyed, rows)
    }
}
