use std::fmt;
use std::rc::Rc;

use crate::collection::traits::{BoxedPairIter, CollectionCore, OwnedPairIter};
use crate::value::Value;

/// The lazy collection: a stored zero-argument production routine.
///
/// Every call to [`LazySequence::iterate`] re-invokes the routine and hands
/// back a fresh, independent, single-pass iterator. The sequence as a whole
/// is therefore restartable even though each traversal is forward-only and
/// exhausted after one pass. Nothing is ever cached: `count()` and
/// `pairs()` both drive a fresh traversal.
#[derive(Clone)]
pub struct LazySequence {
    produce: Rc<dyn Fn() -> OwnedPairIter>,
}

impl LazySequence {
    pub fn new<F>(produce: F) -> Self
    where
        F: Fn() -> OwnedPairIter + 'static,
    {
        Self {
            produce: Rc::new(produce),
        }
    }

    /// A lazy sequence over a snapshot of values, keyed like an
    /// index-sequence. Mostly useful as a source in tests and demos.
    pub fn from_values(values: Vec<Value>) -> Self {
        Self::new(move || {
            let values = values.clone();
            Box::new(
                values
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (Value::from(i), v)),
            )
        })
    }

    /// Invoke the production routine: a fresh single-pass traversal.
    pub fn iterate(&self) -> OwnedPairIter {
        (self.produce)()
    }
}

impl CollectionCore for LazySequence {
    // O(n) time, O(1) extra memory: drain and discard
    fn count(&self) -> usize {
        self.iterate().count()
    }

    fn iter(&self) -> BoxedPairIter<'_> {
        self.iterate()
    }
}

impl fmt::Debug for LazySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySequence").finish_non_exhaustive()
    }
}

impl PartialEq for LazySequence {
    // two lazy sequences are the same only when they share a routine
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.produce, &other.produce)
    }
}
