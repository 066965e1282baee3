//! Equality-based label selectors.
//!
//! A [`Selector`] is a value type with two states:
//!
//! - [`Selector::Nothing`] — matches no label set at all. Used for objects
//!   that declare no selection criteria.
//! - [`Selector::Equals`] — a set of `key=value` requirements, all of which
//!   must hold. Zero requirements match everything.
//!
//! Set-based and inequality requirements (`in`, `notin`, `!=`, `!key`) are
//! not supported and are rejected by [`Selector::parse`].

use std::fmt;

use crate::error::TypeError;
use crate::labels::{validate_label_key, validate_label_value, LabelSet};

/// An immutable predicate over a [`LabelSet`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Matches nothing.
    Nothing,
    /// Matches label sets containing every listed pair.
    Equals(LabelSet),
}

impl Selector {
    /// A selector with zero requirements. Matches every label set.
    pub fn everything() -> Self {
        Self::Equals(LabelSet::new())
    }

    /// A selector that matches no label set.
    pub fn nothing() -> Self {
        Self::Nothing
    }

    /// Build a selector requiring every pair in `set`.
    pub fn from_set(set: LabelSet) -> Self {
        Self::Equals(set)
    }

    /// Returns `true` iff the selector has zero requirements.
    ///
    /// [`Selector::Nothing`] is not empty: it is a distinct state that
    /// rejects everything.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Equals(set) if set.is_empty())
    }

    /// Test the selector against a label set.
    pub fn matches(&self, labels: &LabelSet) -> bool {
        match self {
            Self::Nothing => false,
            Self::Equals(required) => required.is_subset_of(labels),
        }
    }

    /// The equality requirements, or `None` for [`Selector::Nothing`].
    pub fn requirements(&self) -> Option<&LabelSet> {
        match self {
            Self::Nothing => None,
            Self::Equals(set) => Some(set),
        }
    }

    /// Parse a selector string such as `app=web,tier==frontend`.
    ///
    /// Whitespace around terms is ignored and blank input yields
    /// [`Selector::everything`]. Repeating a key with the same value is
    /// accepted; repeating it with a different value is an error.
    pub fn parse(input: &str) -> Result<Self, TypeError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::everything());
        }

        let invalid = |reason: String| TypeError::InvalidSelector {
            input: input.to_string(),
            reason,
        };

        let mut set = LabelSet::new();
        for term in trimmed.split(',') {
            let term = term.trim();
            if term.is_empty() {
                return Err(invalid("empty requirement".into()));
            }
            if term.contains("!=") {
                return Err(invalid(format!("inequality is not supported: {term:?}")));
            }
            if term.contains('(') || term.contains(" in ") || term.contains(" notin ") {
                return Err(invalid(format!(
                    "set-based requirement is not supported: {term:?}"
                )));
            }

            let (key, value) = term
                .split_once("==")
                .or_else(|| term.split_once('='))
                .ok_or_else(|| invalid(format!("existence requirement is not supported: {term:?}")))?;
            let (key, value) = (key.trim(), value.trim());

            validate_label_key(key).map_err(|e| invalid(e.to_string()))?;
            validate_label_value(value).map_err(|e| invalid(e.to_string()))?;

            if let Some(previous) = set.insert(key, value) {
                if previous != value {
                    return Err(invalid(format!(
                        "conflicting values for {key:?}: {previous:?} and {value:?}"
                    )));
                }
            }
        }
        Ok(Self::Equals(set))
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::everything()
    }
}

impl From<LabelSet> for Selector {
    fn from(set: LabelSet) -> Self {
        Self::from_set(set)
    }
}

impl std::str::FromStr for Selector {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // There is no selector string that selects nothing.
            Self::Nothing => f.write_str("<nothing>"),
            Self::Equals(set) => write!(f, "{set}"),
        }
    }
}
