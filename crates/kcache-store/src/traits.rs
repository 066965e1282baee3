use crate::error::StoreResult;
use crate::object::CachedObject;

/// Thread-safe, key-addressed and index-aware object store.
///
/// All implementations must satisfy these invariants:
/// - Each call observes a single coherent state of the store; consecutive
///   calls may observe different states if a writer runs in between.
/// - Returned objects are snapshots. Later writes never mutate them.
/// - Index lookups cost time proportional to the matched set, not to the
///   size of the store.
/// - Failures are propagated, never silently turned into empty results.
pub trait Indexer: Send + Sync {
    /// Look up an object by composite key.
    ///
    /// Returns `Ok(None)` if no object is stored under `key`.
    fn get_by_key(&self, key: &str) -> StoreResult<Option<CachedObject>>;

    /// Snapshot every object in the store, in no particular order.
    fn list(&self) -> StoreResult<Vec<CachedObject>>;

    /// Snapshot every key in the store, in no particular order.
    fn list_keys(&self) -> StoreResult<Vec<String>>;

    /// Objects whose `index_name` values include `indexed_value`.
    ///
    /// Fails with [`crate::StoreError::IndexNotFound`] if the index is not
    /// registered.
    fn by_index(&self, index_name: &str, indexed_value: &str) -> StoreResult<Vec<CachedObject>>;

    /// Objects sharing at least one `index_name` value with `probe`.
    ///
    /// `probe` need not be stored; only the fields read by the index
    /// function matter.
    fn index(&self, index_name: &str, probe: &CachedObject) -> StoreResult<Vec<CachedObject>>;

    /// Whether `index_name` is registered.
    fn has_index(&self, index_name: &str) -> bool;

    /// Look up the stored version of `obj` by its key.
    fn get(&self, obj: &CachedObject) -> StoreResult<Option<CachedObject>> {
        self.get_by_key(&obj.key()?)
    }
}
