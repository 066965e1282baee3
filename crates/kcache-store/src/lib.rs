//! Local object store for the kcache mirror.
//!
//! The store (the *indexer*) maps composite keys (`namespace/name`) to cached
//! objects and maintains secondary indexes over them. It is populated by an
//! external synchronization component; the listers in `kcache-listers` only
//! read from it.
//!
//! # Object Model
//!
//! - [`CachedObject`] -- a closed enum over every [`kcache_types::ResourceKind`]
//! - [`StoredResource`] -- conversion between a concrete kind and [`CachedObject`]
//!
//! # Storage Backends
//!
//! All backends implement the [`Indexer`] trait:
//!
//! - [`InMemoryIndexer`] -- `HashMap`-based store behind a `RwLock`
//!
//! # Design Rules
//!
//! 1. Cached objects are shared, immutable snapshots (`Arc`); updates replace
//!    them wholesale.
//! 2. Every read (`get_by_key`, `list`, `index`) observes one coherent state.
//! 3. Secondary indexes are updated under the same lock as the primary map.
//! 4. Lock poisoning surfaces as [`StoreError::Unavailable`], never a panic.

pub mod config;
pub mod error;
pub mod index;
pub mod listing;
pub mod memory;
pub mod object;
pub mod traits;

pub use config::IndexerConfig;
pub use error::{StoreError, StoreResult};
pub use index::{namespace_index_func, IndexFunc, Indexers, NAMESPACE_INDEX};
pub use listing::{list_all, list_all_by_namespace, NAMESPACE_ALL};
pub use memory::InMemoryIndexer;
pub use object::{CachedObject, StoredResource};
pub use traits::Indexer;
