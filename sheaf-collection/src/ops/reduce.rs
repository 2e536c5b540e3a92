use sheaf_value::Scalar;

use crate::collection::{Collection, CollectionCore};
use crate::error::{Error, Result};
use crate::ops::Verdict;
use crate::value::Value;

impl Collection {
    /// Left-fold over the collection in iteration order, seeding the
    /// accumulator with `initial`. The combiner sees `(accumulator, value,
    /// key)` per element.
    ///
    /// Array-backed sources fold straight over their slice; every other
    /// source goes through the generic pair loop. The two paths are
    /// observably identical.
    pub fn reduce<F>(&self, mut combiner: F, initial: Value) -> Value
    where
        F: FnMut(Value, &Value, &Value) -> Value,
    {
        match self {
            Collection::Sequence(inner) => {
                let mut accumulator = initial;
                for (i, value) in inner.values().iter().enumerate() {
                    accumulator = combiner(accumulator, value, &Value::from(i));
                }
                accumulator
            }
            Collection::Fixed(inner) => {
                let mut accumulator = initial;
                for (i, value) in inner.slots().iter().enumerate() {
                    accumulator = combiner(accumulator, value, &Value::from(i));
                }
                accumulator
            }
            _ => {
                let mut accumulator = initial;
                for (key, value) in self.iter() {
                    accumulator = combiner(accumulator, &value, &key);
                }
                accumulator
            }
        }
    }

    /// Pair this collection's values (as keys) with another's values,
    /// positionally. Fails when the value lists differ in length, or when
    /// one of the would-be keys is not a scalar.
    pub fn combine(&self, other: &Collection) -> Result<Collection> {
        let keys: Vec<Value> = self.iter().map(|(_, v)| v).collect();
        let values: Vec<Value> = other.iter().map(|(_, v)| v).collect();
        if keys.len() != values.len() {
            return Err(Error::CountMismatch {
                left: keys.len(),
                right: values.len(),
            });
        }

        let mut entries: Vec<(Scalar, Value)> = Vec::with_capacity(keys.len());
        for (key, value) in keys.into_iter().zip(values) {
            match key {
                Value::Scalar(s) => entries.push((s, value)),
                _ => return Err(Error::InvalidKeyType { expected: "scalar" }),
            }
        }
        Ok(Collection::from_entries(entries))
    }

    /// All values as an index-sequence, discarding the original keys.
    pub fn values(&self) -> Collection {
        Collection::from_values(self.iter().map(|(_, v)| v).collect())
    }

    /// The values passing `predicate(value, key)`, renumbered from 0.
    /// `Stop` halts the scan like any other predicate-driven operation.
    pub fn values_where<R, F>(&self, mut predicate: F) -> Collection
    where
        R: Into<Verdict>,
        F: FnMut(&Value, &Value) -> R,
    {
        let mut kept = Vec::new();
        for (key, value) in self.iter() {
            match predicate(&value, &key).into() {
                Verdict::Continue(true) => kept.push(value),
                Verdict::Continue(false) => {}
                Verdict::Stop => break,
            }
        }
        Collection::from_values(kept)
    }
}
