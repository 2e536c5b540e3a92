/// A collection is an ordered or identity-keyed mapping from key to value.
/// The variants share the count/iterate/subscript protocol through
/// [`CollectionCore`]; the derived operation library lives in `ops`.
mod collection_core;
mod traits;
pub mod variant;

pub(crate) use collection_core::{rebuild_pairs, Rebuild};
pub use collection_core::Collection;
pub use traits::{BoxedPairIter, CollectionCore, OwnedPairIter};
