use kcache_types::TypeError;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not serve the request (e.g. its lock is poisoned).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A lookup named an index that was never registered.
    #[error("index with name {0} does not exist")]
    IndexNotFound(String),

    /// An index with this name is already registered.
    #[error("index with name {0} already exists")]
    IndexExists(String),

    /// The object cannot be keyed (e.g. it has no name).
    #[error("invalid object: {0}")]
    InvalidObject(String),

    /// A key or selector string failed to parse.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// A payload could not be decoded into its kind.
    #[error("decode error: {0}")]
    Decode(String),

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
