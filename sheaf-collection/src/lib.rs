//! Generic collections and lazy sequences.
//!
//! Four eager collection variants (index-sequence, key-value map,
//! identity-object map, fixed-capacity array) and a restartable,
//! single-pass-per-invocation lazy sequence share one count/iterate/
//! subscript protocol, with a derived operation library on top: slicing
//! with uniform negative-index semantics, chunking, remainder-balanced
//! splitting, partitioning, recursive multi-key grouping, boolean matrix
//! querying, and reduction.
//!
//! ```
//! use sheaf_collection::{Collection, CollectionCore, Value};
//!
//! let letters = Collection::from_values(
//!     ["a", "b", "c", "d", "e"].iter().map(|s| Value::from(*s)).collect(),
//! );
//! let chunks = letters.chunk(2);
//! assert_eq!(chunks.count(), 3);
//! ```

mod codec;
mod collection;
pub mod error;
mod object;
mod ops;
mod range;
mod value;

pub use collection::variant::{
    FixedCapacityArray, IdentityObjectMap, IndexSequence, KeyValueMap, LazySequence,
};
pub use collection::{BoxedPairIter, Collection, CollectionCore, OwnedPairIter};
pub use error::{Error, Result};
pub use object::ObjectRef;
pub use ops::{Condition, GroupKey, Query, Verdict};
pub use range::SequenceRange;
pub use value::Value;

pub use sheaf_value::{Comparator, Scalar, ScalarKey};
