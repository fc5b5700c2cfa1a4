//! Error types for the `verdant-propagation` crate.

/// Errors that can occur while registering plant sets.
///
/// None of these are fatal: the rejected registration is ignored and the
/// registry keeps its previous contents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A plant set with this name is already registered.
    #[error("plant set {name:?} is already registered")]
    DuplicateRegistration {
        /// The repeated name.
        name: String,
    },

    /// Plant set names must not be empty.
    #[error("plant set name is empty")]
    EmptyName,
}
