use crate::collection::{Collection, CollectionCore};
use crate::range::SequenceRange;

impl Collection {
    /// The window selected by one sequence-range evaluation. Negative
    /// offsets and lengths count from the end; out-of-range inputs clamp.
    /// Index-like sources renumber from 0, keyed sources keep their keys.
    pub fn slice(&self, offset: i64, length: Option<i64>) -> Collection {
        self.window(SequenceRange::new(self.count(), offset, length))
    }

    /// The first `count` elements, or for a negative `count` the last
    /// `|count|`.
    pub fn take(&self, count: i64) -> Collection {
        if count < 0 {
            self.slice(count, None)
        } else {
            self.slice(0, Some(count))
        }
    }

    /// Everything after the first `count` elements.
    pub fn skip(&self, count: i64) -> Collection {
        self.slice(count, None)
    }

    /// Every `step`-th element, starting at `offset`. The step is clamped
    /// to at least 1; the offset goes through the usual range
    /// normalization.
    pub fn nth(&self, step: i64, offset: i64) -> Collection {
        let step = step.max(1) as usize;
        let start = SequenceRange::new(self.count(), offset, None).start();
        let pairs = self
            .iter()
            .enumerate()
            .filter(|(position, _)| *position >= start && (position - start) % step == 0)
            .map(|(_, pair)| pair)
            .collect();
        self.rebuild(pairs)
    }

    pub(crate) fn window(&self, range: SequenceRange) -> Collection {
        let pairs = self
            .iter()
            .skip(range.start())
            .take(range.number_of_items())
            .collect();
        self.rebuild(pairs)
    }
}
