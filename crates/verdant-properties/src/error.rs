//! Error types for the `verdant-properties` crate.
//!
//! Construction never fails (out-of-range values are clamped), so every
//! variant here comes from decoding a key-value store.

/// Errors that can occur while decoding a property set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    /// The stored type tag names a different archetype than the caller
    /// asked for. The decoded object must not be used.
    #[error("serialization mismatch: expected type {expected:?}, found {found:?}")]
    SerializationMismatch {
        /// Tag the caller expected.
        expected: String,
        /// Tag found in the store.
        found: String,
    },

    /// A key was missing, held the wrong value type, or held a value that
    /// cannot be represented.
    #[error("malformed data at key {key:?}: {reason}")]
    MalformedData {
        /// The offending key.
        key: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl PropertyError {
    /// Shorthand for a [`PropertyError::MalformedData`].
    pub fn malformed(key: &str, reason: impl Into<String>) -> Self {
        Self::MalformedData {
            key: key.to_owned(),
            reason: reason.into(),
        }
    }
}
