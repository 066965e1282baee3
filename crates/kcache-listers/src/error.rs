//! Error types for lister and resolver operations.

use kcache_store::StoreError;
use kcache_types::{LabelSet, ResourceKind};
use thiserror::Error;

/// Errors returned by listers and the relationship resolver.
#[derive(Debug, Error)]
pub enum ListerError {
    /// The underlying store failed to serve the request.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// No object is stored under the requested key.
    #[error("{kind} {name:?} not found")]
    NotFound { kind: ResourceKind, name: String },

    /// The store holds an object of another kind under the requested key.
    #[error("object {key:?} has kind {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: ResourceKind,
        found: ResourceKind,
    },

    /// Owner resolution was asked about a subject without labels.
    #[error("no owners found for {name:?} in namespace {namespace:?} because it has no labels")]
    NoLabelsOnSubject { name: String, namespace: String },

    /// Owner resolution found no candidate selecting the subject.
    #[error("could not find owner for {name:?} in namespace {namespace:?} with labels: {labels}")]
    NoMatchingOwner {
        name: String,
        namespace: String,
        labels: LabelSet,
    },
}

impl ListerError {
    /// Returns `true` for [`ListerError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Convenience type alias for lister operations.
pub type Result<T> = std::result::Result<T, ListerError>;
