use std::rc::Rc;

use crate::collection::{Collection, CollectionCore};
use crate::value::Value;

/// The outcome of one predicate invocation during a scan.
///
/// `Continue(bool)` keeps or drops the current element and moves on;
/// `Stop` halts the scan immediately, excluding every remaining element
/// regardless of what the predicate would have said about them. A plain
/// `bool` converts into the `Continue` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Continue(bool),
    Stop,
}

impl From<bool> for Verdict {
    fn from(keep: bool) -> Self {
        Verdict::Continue(keep)
    }
}

impl Collection {
    /// The elements for which `predicate(value, key)` holds, in source
    /// order. Index-like sources renumber from 0, keyed sources keep
    /// their keys.
    pub fn filter<R, F>(&self, mut predicate: F) -> Collection
    where
        R: Into<Verdict>,
        F: FnMut(&Value, &Value) -> R,
    {
        let mut kept = Vec::new();
        for (key, value) in self.iter() {
            match predicate(&value, &key).into() {
                Verdict::Continue(true) => kept.push((key, value)),
                Verdict::Continue(false) => {}
                Verdict::Stop => break,
            }
        }
        self.rebuild(kept)
    }

    /// The elements for which `predicate(value, key)` does not hold.
    /// `Stop` still halts the scan: the remaining elements land in
    /// neither the filtered nor the rejected result.
    pub fn reject<R, F>(&self, mut predicate: F) -> Collection
    where
        R: Into<Verdict>,
        F: FnMut(&Value, &Value) -> R,
    {
        self.filter(|value, key| match predicate(value, key).into() {
            Verdict::Continue(keep) => Verdict::Continue(!keep),
            Verdict::Stop => Verdict::Stop,
        })
    }

    /// A lazy pair of collections: the filtered elements, then the
    /// rejected ones, over the same source. Each half is computed only
    /// when it is actually consumed.
    pub fn partition<R, F>(&self, predicate: F) -> Collection
    where
        R: Into<Verdict>,
        F: Fn(&Value, &Value) -> R + 'static,
    {
        let predicate: Rc<dyn Fn(&Value, &Value) -> Verdict> =
            Rc::new(move |value, key| predicate(value, key).into());
        let source = self.clone();
        Collection::lazy(move || {
            let source = source.clone();
            let predicate = predicate.clone();
            let mut emitted = 0usize;
            Box::new(std::iter::from_fn(move || {
                let half = match emitted {
                    0 => source.filter(|v: &Value, k: &Value| predicate(v, k)),
                    1 => source.reject(|v: &Value, k: &Value| predicate(v, k)),
                    _ => return None,
                };
                let pair = (Value::from(emitted), Value::Collection(half));
                emitted += 1;
                Some(pair)
            }))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    use sheaf_value::Scalar;

    fn seq(values: std::ops::Range<i64>) -> Collection {
        Collection::from_values(values.map(Value::from).collect())
    }

    fn ints(c: &Collection) -> Vec<i64> {
        c.pairs()
            .into_iter()
            .map(|(_, v)| match v {
                Value::Scalar(Scalar::Integer(i)) => i,
                other => panic!("unexpected value {other:?}"),
            })
            .collect()
    }

    fn is_even(v: &Value) -> bool {
        matches!(v, Value::Scalar(Scalar::Integer(i)) if i % 2 == 0)
    }

    #[test]
    fn test_filter_and_reject_are_complements() {
        let source = seq(0..7);
        assert_eq!(ints(&source.filter(|v, _| is_even(v))), vec![0, 2, 4, 6]);
        assert_eq!(ints(&source.reject(|v, _| is_even(v))), vec![1, 3, 5]);
    }

    #[test]
    fn test_stop_excludes_the_rest_of_the_scan() {
        let source = seq(0..8);
        let kept = source.filter(|v, _| match v {
            Value::Scalar(Scalar::Integer(4)) => Verdict::Stop,
            v => Verdict::Continue(is_even(v)),
        });
        // 4 itself and everything after it is excluded, even though 4 and
        // 6 are even
        assert_eq!(ints(&kept), vec![0, 2]);
    }

    #[test]
    fn test_stop_differs_from_a_false_verdict() {
        let source = seq(0..4);
        let without_two = source.filter(|v, _| !matches!(v, Value::Scalar(Scalar::Integer(2))));
        assert_eq!(ints(&without_two), vec![0, 1, 3]);
    }

    #[test]
    fn test_filter_preserves_map_keys() {
        let map = Collection::from_entries(vec![
            (Scalar::from("a"), Value::from(1)),
            (Scalar::from("b"), Value::from(2)),
        ]);
        let kept = map.filter(|v, _| matches!(v, Value::Scalar(Scalar::Integer(2))));
        assert_eq!(kept.pairs(), vec![(Value::from("b"), Value::from(2))]);
    }

    #[test]
    fn test_partition_covers_the_source_disjointly() {
        let source = seq(0..9);
        let parts = source.partition(|v: &Value, _: &Value| is_even(v));
        let pairs = parts.pairs();
        assert_eq!(pairs.len(), 2);
        let evens = pairs[0].1.as_collection().unwrap();
        let odds = pairs[1].1.as_collection().unwrap();
        assert_eq!(ints(evens), vec![0, 2, 4, 6, 8]);
        assert_eq!(ints(odds), vec![1, 3, 5, 7]);
        assert_eq!(evens.count() + odds.count(), source.count());
    }

    #[test]
    fn test_partition_computes_each_half_on_demand() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let source = seq(0..3);
        let parts = source.partition(move |v: &Value, _: &Value| {
            seen.set(seen.get() + 1);
            is_even(v)
        });

        // nothing has been pulled yet
        assert_eq!(calls.get(), 0);

        let mut traversal = parts.as_lazy().unwrap().iterate();
        let _filtered = traversal.next();
        // one scan so far: the filtered half only
        assert_eq!(calls.get(), 3);
        let _rejected = traversal.next();
        assert_eq!(calls.get(), 6);
    }
}
