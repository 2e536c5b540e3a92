use thiserror::Error;

/// The failure taxonomy of the collection subsystem.
///
/// Pure query, slice, chunk and group operations never fail on well-typed
/// input: out-of-range offsets and lengths are clamped by the sequence
/// range, not rejected. Only identity and type violations surface here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A fixed-capacity index outside `[0, size)`, or an index-sequence
    /// index outside `[0, count)` on the throwing path.
    #[error("index {index} out of range for size {size}")]
    OutOfRange { index: i64, size: usize },

    /// Throwing-get on an absent map or object-map key. The non-throwing
    /// path returns an absent result instead.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// Combine's value lists differ in length.
    #[error("cannot combine {left} values with {right} values")]
    CountMismatch { left: usize, right: usize },

    /// A decoded payload whose shape does not match the target collection
    /// type.
    #[error("malformed payload: {0}")]
    MalformedInput(String),

    /// A key of the wrong kind, such as a scalar key on an identity-keyed
    /// lookup.
    #[error("invalid key type: expected {expected}")]
    InvalidKeyType { expected: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
