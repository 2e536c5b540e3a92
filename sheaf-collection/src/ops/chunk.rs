use crate::collection::{rebuild_pairs, Collection, CollectionCore, OwnedPairIter, Rebuild};
use crate::value::Value;

// Pulls pairs from the source and emits a boundary every `size` elements:
// the counter fills toward the boundary, resets, and the tail group may be
// shorter. One ChunkingIter is one single-pass traversal; restartability
// comes from the production routine building a fresh one per invocation.
struct ChunkingIter {
    inner: OwnedPairIter,
    size: usize,
    kind: Rebuild,
    next_index: usize,
}

impl Iterator for ChunkingIter {
    type Item = (Value, Value);

    fn next(&mut self) -> Option<Self::Item> {
        let mut window = Vec::with_capacity(self.size);
        let mut counter = 0;
        for pair in self.inner.by_ref() {
            window.push(pair);
            counter += 1;
            if counter == self.size {
                break;
            }
        }
        if window.is_empty() {
            return None;
        }
        let group = rebuild_pairs(self.kind, window);
        let key = Value::from(self.next_index);
        self.next_index += 1;
        Some((key, Value::Collection(group)))
    }
}

impl Collection {
    /// Lazily partition into fixed-size contiguous windows; the final
    /// group may be shorter. The group size is clamped to at least 1.
    pub fn chunk(&self, size_of_group: i64) -> Collection {
        let size = size_of_group.max(1) as usize;
        let kind = self.rebuild_kind();
        let source = self.clone();
        Collection::lazy(move || {
            Box::new(ChunkingIter {
                inner: source.clone().into_pair_iter(),
                size,
                kind,
                next_index: 0,
            })
        })
    }

    /// Exactly `number_of_groups` contiguous slices sized
    /// `floor(count / number_of_groups)`, the first `count mod
    /// number_of_groups` of them one element larger; zero-sized groups are
    /// omitted. Computed by repeated slicing with a running start offset.
    pub fn split(&self, number_of_groups: i64) -> Collection {
        let n = number_of_groups.max(1) as usize;
        let count = self.count();
        let base = count / n;
        let remainder = count % n;

        let mut groups: Vec<Value> = Vec::new();
        let mut start: i64 = 0;
        for i in 0..n {
            let size = base + usize::from(i < remainder);
            if size == 0 {
                continue;
            }
            groups.push(Value::Collection(self.slice(start, Some(size as i64))));
            start += size as i64;
        }
        Collection::from_values(groups)
    }

    /// Up to `number_of_groups` groups of uniform ceiling size, the
    /// trailing group possibly smaller: `ceil(count / number_of_groups)`
    /// handed to [`Collection::chunk`]. Contrast with [`Collection::split`],
    /// which balances the remainder across the leading groups instead.
    pub fn split_in(&self, number_of_groups: i64) -> Collection {
        let n = number_of_groups.max(1);
        let count = self.count() as i64;
        self.chunk((count + n - 1) / n)
    }
}
