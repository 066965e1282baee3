//! Read-side access to the kcache object mirror.
//!
//! This crate binds the generic [`kcache_store::Indexer`] to concrete
//! resource kinds and resolves selection/ownership relationships between
//! cached objects by label.
//!
//! # Architecture
//!
//! - **Listers** ([`Lister`], [`ScopedLister`]) are kind-safe views over
//!   the store. Whole-store listing, namespace-scoped listing through the
//!   namespace index, and point lookup by `namespace/name`.
//! - **The resolver** ([`RelationshipResolver`]) finds the grouping objects
//!   whose selector matches a subject's labels. Two relationship kinds exist:
//!   *selecting* (service → pod), where zero matches is a normal result, and
//!   *owning* (controller → pod), where zero matches is an error.
//! - **Match policy** ([`MatchPolicy`]) decides what a present-but-empty
//!   selector means. Absent selectors always match nothing.
//!
//! Every operation is a synchronous, stateless read of the store's current
//! contents. Nothing here mutates the store.
//!
//! # Modules
//!
//! - [`error`] — [`ListerError`] and the [`Result`] alias
//! - [`lister`] — [`Lister`] / [`ScopedLister`] and per-kind aliases
//! - [`policy`] — [`MatchPolicy`]
//! - [`resolver`] — [`RelationshipResolver`]

pub mod error;
pub mod lister;
pub mod policy;
pub mod resolver;

pub use error::{ListerError, Result};
pub use lister::{
    LimitRangeLister, Lister, NamespaceLister, PersistentVolumeClaimLister, PodLister,
    ReplicationControllerLister, ScopedLister, ServiceAccountLister, ServiceLister,
};
pub use policy::MatchPolicy;
pub use resolver::RelationshipResolver;
