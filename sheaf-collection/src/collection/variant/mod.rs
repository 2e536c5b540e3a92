mod fixed;
mod lazy;
mod map;
mod object_map;
mod sequence;

pub use fixed::FixedCapacityArray;
pub use lazy::LazySequence;
pub use map::KeyValueMap;
pub use object_map::IdentityObjectMap;
pub use sequence::IndexSequence;
