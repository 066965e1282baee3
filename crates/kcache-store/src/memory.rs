use std::collections::{BTreeSet, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::config::IndexerConfig;
use crate::error::{StoreError, StoreResult};
use crate::index::Indexers;
use crate::object::CachedObject;
use crate::traits::Indexer;

/// index value → keys
type Index = HashMap<String, BTreeSet<String>>;

#[derive(Default)]
struct State {
    items: HashMap<String, CachedObject>,
    /// index name → index
    indices: HashMap<String, Index>,
}

impl State {
    fn index_object(&mut self, indexers: &Indexers, key: &str, obj: &CachedObject) {
        for (name, func) in indexers.iter() {
            let index = self.indices.entry(name.clone()).or_default();
            for value in func(obj) {
                index.entry(value).or_default().insert(key.to_string());
            }
        }
    }

    fn unindex_object(&mut self, indexers: &Indexers, key: &str, obj: &CachedObject) {
        for (name, func) in indexers.iter() {
            let Some(index) = self.indices.get_mut(name) else {
                continue;
            };
            for value in func(obj) {
                if let Some(keys) = index.get_mut(&value) {
                    keys.remove(key);
                    if keys.is_empty() {
                        index.remove(&value);
                    }
                }
            }
        }
    }

    fn collect(&self, keys: impl IntoIterator<Item = impl AsRef<str>>) -> Vec<CachedObject> {
        keys.into_iter()
            .filter_map(|k| self.items.get(k.as_ref()).cloned())
            .collect()
    }
}

/// In-memory, HashMap-based indexer.
///
/// The primary map and every secondary index live behind one `RwLock`, so a
/// reader never sees an object without its index entries or vice versa.
/// Objects are `Arc`-backed; reads clone handles, not payloads.
pub struct InMemoryIndexer {
    state: RwLock<State>,
    indexers: Indexers,
}

impl InMemoryIndexer {
    /// Create an empty indexer with [`NAMESPACE_INDEX`](crate::NAMESPACE_INDEX)
    /// registered.
    pub fn new() -> Self {
        Self::with_indexers(Indexers::with_namespace_index())
    }

    /// Create an empty indexer with a custom set of indexes.
    pub fn with_indexers(indexers: Indexers) -> Self {
        Self::with_capacity(indexers, 0)
    }

    /// Create an empty indexer from configuration.
    pub fn with_config(config: &IndexerConfig) -> Self {
        let indexers = if config.namespace_index {
            Indexers::with_namespace_index()
        } else {
            Indexers::new()
        };
        Self::with_capacity(indexers, config.initial_capacity)
    }

    fn with_capacity(indexers: Indexers, capacity: usize) -> Self {
        Self {
            state: RwLock::new(State {
                items: HashMap::with_capacity(capacity),
                indices: HashMap::new(),
            }),
            indexers,
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {e}")))
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.items.len())
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.read()?.items.is_empty())
    }

    /// Insert or replace an object.
    pub fn add(&self, obj: CachedObject) -> StoreResult<()> {
        let key = obj.key()?;
        let mut state = self.write()?;
        if let Some(old) = state.items.remove(&key) {
            state.unindex_object(&self.indexers, &key, &old);
        }
        state.index_object(&self.indexers, &key, &obj);
        state.items.insert(key, obj);
        Ok(())
    }

    /// Same as [`add`](Self::add); provided for readability at call sites
    /// that apply modification events.
    pub fn update(&self, obj: CachedObject) -> StoreResult<()> {
        self.add(obj)
    }

    /// Remove the object stored under `obj`'s key. Returns `true` if it existed.
    pub fn delete(&self, obj: &CachedObject) -> StoreResult<bool> {
        self.delete_by_key(&obj.key()?)
    }

    /// Remove the object stored under `key`. Returns `true` if it existed.
    pub fn delete_by_key(&self, key: &str) -> StoreResult<bool> {
        let mut state = self.write()?;
        match state.items.remove(key) {
            Some(old) => {
                state.unindex_object(&self.indexers, key, &old);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Atomically swap the whole contents for `objects`.
    ///
    /// Readers observe either the old or the new contents, never a mix.
    pub fn replace(&self, objects: Vec<CachedObject>) -> StoreResult<()> {
        let mut next = State {
            items: HashMap::with_capacity(objects.len()),
            indices: HashMap::new(),
        };
        for obj in objects {
            let key = obj.key()?;
            if let Some(old) = next.items.remove(&key) {
                next.unindex_object(&self.indexers, &key, &old);
            }
            next.index_object(&self.indexers, &key, &obj);
            next.items.insert(key, obj);
        }
        let count = next.items.len();
        *self.write()? = next;
        debug!(count, "indexer contents replaced");
        Ok(())
    }

    /// Index values currently present for `index_name`, sorted.
    pub fn index_values(&self, index_name: &str) -> StoreResult<Vec<String>> {
        if !self.indexers.contains(index_name) {
            return Err(StoreError::IndexNotFound(index_name.to_string()));
        }
        let state = self.read()?;
        let mut values: Vec<String> = state
            .indices
            .get(index_name)
            .map(|index| index.keys().cloned().collect())
            .unwrap_or_default();
        values.sort();
        Ok(values)
    }
}

impl Default for InMemoryIndexer {
    fn default() -> Self {
        Self::new()
    }
}

impl Indexer for InMemoryIndexer {
    fn get_by_key(&self, key: &str) -> StoreResult<Option<CachedObject>> {
        Ok(self.read()?.items.get(key).cloned())
    }

    fn list(&self) -> StoreResult<Vec<CachedObject>> {
        Ok(self.read()?.items.values().cloned().collect())
    }

    fn list_keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.read()?.items.keys().cloned().collect())
    }

    fn by_index(&self, index_name: &str, indexed_value: &str) -> StoreResult<Vec<CachedObject>> {
        if !self.indexers.contains(index_name) {
            return Err(StoreError::IndexNotFound(index_name.to_string()));
        }
        let state = self.read()?;
        let objects = state
            .indices
            .get(index_name)
            .and_then(|index| index.get(indexed_value))
            .map(|keys| state.collect(keys))
            .unwrap_or_default();
        Ok(objects)
    }

    fn index(&self, index_name: &str, probe: &CachedObject) -> StoreResult<Vec<CachedObject>> {
        let func = self
            .indexers
            .get(index_name)
            .ok_or_else(|| StoreError::IndexNotFound(index_name.to_string()))?;
        let values = func(probe);

        let state = self.read()?;
        let Some(index) = state.indices.get(index_name) else {
            return Ok(Vec::new());
        };
        let keys: BTreeSet<&String> = values
            .iter()
            .filter_map(|value| index.get(value))
            .flatten()
            .collect();
        Ok(state.collect(keys))
    }

    fn has_index(&self, index_name: &str) -> bool {
        self.indexers.contains(index_name)
    }
}

impl std::fmt::Debug for InMemoryIndexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.read().map(|s| s.items.len()).ok();
        f.debug_struct("InMemoryIndexer")
            .field("object_count", &count)
            .field("indexers", &self.indexers)
            .finish()
    }
}
