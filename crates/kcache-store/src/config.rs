use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Configuration for an [`InMemoryIndexer`](crate::InMemoryIndexer).
///
/// Loadable from TOML:
///
/// ```toml
/// initial_capacity = 4096
/// namespace_index = true
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Number of objects to reserve space for up front.
    pub initial_capacity: usize,
    /// Register [`NAMESPACE_INDEX`](crate::NAMESPACE_INDEX).
    ///
    /// Owner resolution requires it; namespace listings fall back to a full
    /// scan without it.
    pub namespace_index: bool,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            namespace_index: true,
        }
    }
}

impl IndexerConfig {
    /// Parse a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> StoreResult<Self> {
        toml::from_str(s).map_err(|e| StoreError::Config(e.to_string()))
    }
}
