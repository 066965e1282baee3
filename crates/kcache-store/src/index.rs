//! Secondary index functions.
//!
//! An index function maps an object to zero or more index values. The store
//! keeps, per registered index, a map from index value to the set of keys
//! that produced it, so that lookups by value never scan the whole store.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{StoreError, StoreResult};
use crate::object::CachedObject;

/// Name of the built-in index keyed on `metadata.namespace`.
pub const NAMESPACE_INDEX: &str = "namespace";

/// Computes the index values for an object.
pub type IndexFunc = Arc<dyn Fn(&CachedObject) -> Vec<String> + Send + Sync>;

/// Index function for [`NAMESPACE_INDEX`].
///
/// Cluster-scoped objects index under the empty string.
pub fn namespace_index_func() -> IndexFunc {
    Arc::new(|obj: &CachedObject| vec![obj.meta().namespace.clone()])
}

/// Registry of named index functions.
#[derive(Clone, Default)]
pub struct Indexers {
    funcs: HashMap<String, IndexFunc>,
}

impl Indexers {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding only [`NAMESPACE_INDEX`].
    pub fn with_namespace_index() -> Self {
        let mut funcs: HashMap<String, IndexFunc> = HashMap::new();
        funcs.insert(NAMESPACE_INDEX.to_string(), namespace_index_func());
        Self { funcs }
    }

    /// Register a new index. Fails if the name is taken.
    pub fn add(&mut self, name: impl Into<String>, func: IndexFunc) -> StoreResult<()> {
        let name = name.into();
        if self.funcs.contains_key(&name) {
            return Err(StoreError::IndexExists(name));
        }
        self.funcs.insert(name, func);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&IndexFunc> {
        self.funcs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.funcs.contains_key(name)
    }

    /// Registered index names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.funcs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &IndexFunc)> {
        self.funcs.iter()
    }
}

impl fmt::Debug for Indexers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Indexers")
            .field("names", &self.names())
            .finish()
    }
}
