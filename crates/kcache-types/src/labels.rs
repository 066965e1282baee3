//! Label mappings attached to cached objects.
//!
//! A [`LabelSet`] is an ordered `BTreeMap` so that its display form and
//! serialized form are deterministic. Keys are unique by construction.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::selector::Selector;

/// Characters that may not appear in a label key or value.
///
/// They are reserved by the selector string syntax.
const FORBIDDEN_CHARS: &[char] = &[' ', '\t', '\n', '\r', ',', '=', '!', '(', ')'];

/// A string→string label mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet(BTreeMap<String, String>);

impl LabelSet {
    /// Create an empty label set.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert, convenient in fixtures.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert a label, returning the previous value for `key` if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Look up the value of a label.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns `true` if a label with this key is present.
    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns `true` if every pair in `self` is also present in `other`.
    pub fn is_subset_of(&self, other: &LabelSet) -> bool {
        self.iter().all(|(k, v)| other.get(k) == Some(v))
    }

    /// Treat this set as an equality selector.
    ///
    /// The set is assumed to be valid already (it came from a stored object),
    /// so no validation is performed. An empty set yields a selector that
    /// matches everything.
    pub fn as_selector(&self) -> Selector {
        Selector::from_set(self.clone())
    }

    /// Check that every key and value is usable in the selector syntax.
    pub fn validate(&self) -> Result<(), TypeError> {
        for (key, value) in self.iter() {
            validate_label_key(key)?;
            validate_label_value(value)?;
        }
        Ok(())
    }
}

/// Validate a label key: non-empty and free of reserved characters.
pub fn validate_label_key(key: &str) -> Result<(), TypeError> {
    if key.is_empty() {
        return Err(TypeError::InvalidLabel {
            label: key.to_string(),
            reason: "label key must not be empty".into(),
        });
    }
    check_forbidden(key)
}

/// Validate a label value. Empty values are allowed.
pub fn validate_label_value(value: &str) -> Result<(), TypeError> {
    check_forbidden(value)
}

fn check_forbidden(s: &str) -> Result<(), TypeError> {
    if let Some(ch) = s.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(TypeError::InvalidLabel {
            label: s.to_string(),
            reason: format!("contains forbidden character: {ch:?}"),
        });
    }
    Ok(())
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (k, v) in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{k}={v}")?;
            first = false;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<BTreeMap<String, String>> for LabelSet {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}
