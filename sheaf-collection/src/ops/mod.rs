/// The derived operation library. Every operation reads its source and
/// returns a new collection; none of them mutate.
mod chunk;
mod group;
mod partition;
mod query;
mod reduce;
mod slice;

pub use group::GroupKey;
pub use partition::Verdict;
pub use query::{Condition, Query};
