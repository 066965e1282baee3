//! What a candidate's declared selector means.

use kcache_types::{LabelSet, Selector};

/// How a present-but-empty selector is interpreted.
///
/// An absent selector matches nothing under either policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchPolicy {
    /// `{}` has zero requirements and so matches every subject.
    EmptyMatchesAll,
    /// `{}` matches nothing, so a zero-criteria candidate never claims a
    /// subject.
    EmptyMatchesNone,
}

impl MatchPolicy {
    /// The effective selector for a candidate declaring `declared`.
    pub fn selector_for(self, declared: Option<&LabelSet>) -> Selector {
        match declared {
            None => Selector::nothing(),
            Some(set) if set.is_empty() && self == Self::EmptyMatchesNone => Selector::nothing(),
            Some(set) => set.as_selector(),
        }
    }

    /// Whether a candidate declaring `declared` selects a subject labelled
    /// `labels`.
    pub fn selects(self, declared: Option<&LabelSet>, labels: &LabelSet) -> bool {
        self.selector_for(declared).matches(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(pairs: &[(&str, &str)]) -> LabelSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn absent_matches_nothing_under_both_policies() {
        let labels = set(&[("app", "x")]);
        assert!(!MatchPolicy::EmptyMatchesAll.selects(None, &labels));
        assert!(!MatchPolicy::EmptyMatchesNone.selects(None, &labels));
        assert!(!MatchPolicy::EmptyMatchesAll.selects(None, &LabelSet::new()));
    }

    #[test]
    fn empty_depends_on_policy() {
        let empty = LabelSet::new();
        let labels = set(&[("app", "x")]);
        assert!(MatchPolicy::EmptyMatchesAll.selects(Some(&empty), &labels));
        assert!(MatchPolicy::EmptyMatchesAll.selects(Some(&empty), &LabelSet::new()));
        assert!(!MatchPolicy::EmptyMatchesNone.selects(Some(&empty), &labels));
    }

    #[test]
    fn non_empty_is_plain_equality_match() {
        let declared = set(&[("app", "x")]);
        for policy in [MatchPolicy::EmptyMatchesAll, MatchPolicy::EmptyMatchesNone] {
            assert!(policy.selects(Some(&declared), &set(&[("app", "x"), ("v", "1")])));
            assert!(!policy.selects(Some(&declared), &set(&[("app", "y")])));
        }
    }

    #[test]
    fn effective_selector_states() {
        let empty = LabelSet::new();
        assert_eq!(MatchPolicy::EmptyMatchesAll.selector_for(None), Selector::nothing());
        assert!(MatchPolicy::EmptyMatchesAll.selector_for(Some(&empty)).is_empty());
        assert_eq!(
            MatchPolicy::EmptyMatchesNone.selector_for(Some(&empty)),
            Selector::nothing()
        );
    }

    proptest! {
        #[test]
        fn empty_never_selects_under_none_policy(
            labels in prop::collection::btree_map("[a-c]", "[x-z]", 0..4).prop_map(LabelSet::from),
        ) {
            prop_assert!(!MatchPolicy::EmptyMatchesNone.selects(Some(&LabelSet::new()), &labels));
            prop_assert!(!MatchPolicy::EmptyMatchesNone.selects(None, &labels));
            prop_assert!(!MatchPolicy::EmptyMatchesAll.selects(None, &labels));
        }
    }
}
