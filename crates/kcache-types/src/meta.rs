//! Object identity and composite cache keys.
//!
//! Namespaced objects are keyed as `namespace/name`; cluster-scoped objects
//! (empty namespace) are keyed by their bare name.

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::labels::LabelSet;

/// Metadata common to every cached object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectMeta {
    /// Object name, unique within its namespace.
    pub name: String,
    /// Owning namespace. Empty for cluster-scoped objects.
    pub namespace: String,
    /// Labels used for selection.
    pub labels: LabelSet,
    /// Server-assigned unique identifier, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Opaque version of the object as last observed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,
}

impl ObjectMeta {
    /// Metadata for a namespaced object.
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    /// Metadata for a cluster-scoped object.
    pub fn cluster(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Builder-style label setter.
    pub fn with_labels(mut self, labels: LabelSet) -> Self {
        self.labels = labels;
        self
    }

    /// The composite key for this object.
    pub fn key(&self) -> String {
        object_key(&self.namespace, &self.name)
    }
}

/// Build a composite key from a namespace and a name.
///
/// An empty namespace produces the bare name.
///
/// # Examples
///
/// ```
/// use kcache_types::object_key;
///
/// assert_eq!(object_key("ns1", "web"), "ns1/web");
/// assert_eq!(object_key("", "kube-system"), "kube-system");
/// ```
pub fn object_key(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}/{name}")
    }
}

/// Split a composite key into `(namespace, name)`.
///
/// Cluster-scoped keys yield an empty namespace. Keys with more than one `/`
/// or with an empty name are rejected.
pub fn split_key(key: &str) -> Result<(&str, &str), TypeError> {
    let invalid = |reason: &str| TypeError::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    };

    let (namespace, name) = match key.split_once('/') {
        Some((ns, name)) => {
            if name.contains('/') {
                return Err(invalid("unexpected extra '/'"));
            }
            if ns.is_empty() {
                return Err(invalid("namespace must not be empty"));
            }
            (ns, name)
        }
        None => ("", key),
    };
    if name.is_empty() {
        return Err(invalid("name must not be empty"));
    }
    Ok((namespace, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaced_key() {
        let meta = ObjectMeta::namespaced("ns1", "web");
        assert_eq!(meta.key(), "ns1/web");
    }

    #[test]
    fn cluster_key_is_bare_name() {
        let meta = ObjectMeta::cluster("default");
        assert_eq!(meta.key(), "default");
    }

    #[test]
    fn split_namespaced_key() {
        assert_eq!(split_key("ns1/web").unwrap(), ("ns1", "web"));
    }

    #[test]
    fn split_cluster_key() {
        assert_eq!(split_key("default").unwrap(), ("", "default"));
    }

    #[test]
    fn split_rejects_malformed_keys() {
        assert!(split_key("a/b/c").is_err());
        assert!(split_key("/web").is_err());
        assert!(split_key("ns1/").is_err());
        assert!(split_key("").is_err());
    }

    #[test]
    fn meta_deserializes_camel_case() {
        let json = r#"{"name":"p","namespace":"ns","labels":{"app":"x"},"resourceVersion":"42"}"#;
        let meta: ObjectMeta = serde_json::from_str(json).unwrap();
        assert_eq!(meta.resource_version.as_deref(), Some("42"));
        assert_eq!(meta.labels.get("app"), Some("x"));
        assert!(meta.uid.is_none());
    }
}
