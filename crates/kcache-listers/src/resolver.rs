//! Label-selector relationship resolution.
//!
//! Given a subject (e.g. a pod), find the grouping objects in the subject's
//! namespace whose selector matches the subject's labels. Two relationship
//! kinds are supported and deliberately differ:
//!
//! | | empty selector `{}` | zero matches |
//! |---|---|---|
//! | selecting (service → pod) | matches everything | `Ok(vec![])` |
//! | owning (controller → pod) | matches nothing | [`ListerError::NoMatchingOwner`] |
//!
//! An absent selector matches nothing in both. Results are unordered and may
//! hold several candidates; no uniqueness is enforced.

use std::sync::Arc;

use kcache_store::{Indexer, StoredResource, NAMESPACE_INDEX};
use kcache_types::{LabelSet, Pod, ReplicationController, Resource, Selecting, Selector, Service};
use tracing::debug;

use crate::error::{ListerError, Result};
use crate::lister::{downcast_all, Lister};
use crate::policy::MatchPolicy;

/// Resolves which candidates of kind `C` select a given subject.
pub struct RelationshipResolver<C> {
    lister: Lister<C>,
}

impl<C: StoredResource + Selecting> RelationshipResolver<C> {
    pub fn new(indexer: Arc<dyn Indexer>) -> Self {
        Self::from_lister(Lister::new(indexer))
    }

    pub fn from_lister(lister: Lister<C>) -> Self {
        Self { lister }
    }

    /// Candidates selecting `subject`, service-style.
    ///
    /// A candidate with no selector is skipped; an empty selector matches
    /// every subject. Finding nothing is a normal, successful result.
    pub fn resolve_selecting_candidates<S: Resource>(&self, subject: &S) -> Result<Vec<Arc<C>>> {
        let candidates = self
            .lister
            .namespace(subject.namespace())
            .list(&Selector::everything())?;
        let selected = matching(candidates, MatchPolicy::EmptyMatchesAll, subject.labels());

        debug!(
            subject = %subject.key(),
            candidate_kind = %C::KIND,
            count = selected.len(),
            "resolved selecting candidates"
        );
        Ok(selected)
    }

    /// Candidates owning `subject`, controller-style.
    ///
    /// Fails with [`ListerError::NoLabelsOnSubject`] before touching the
    /// store if `subject` has no labels, and with
    /// [`ListerError::NoMatchingOwner`] if no candidate matches. Absent and
    /// empty selectors never match. Candidates are read through the
    /// namespace index, which must be registered.
    pub fn resolve_owning_candidates<S: Resource>(&self, subject: &S) -> Result<Vec<Arc<C>>> {
        if subject.labels().is_empty() {
            return Err(ListerError::NoLabelsOnSubject {
                name: subject.name().to_string(),
                namespace: subject.namespace().to_string(),
            });
        }

        let probe = C::namespace_probe(subject.namespace());
        let items = self.lister.indexer().index(NAMESPACE_INDEX, &probe)?;
        let candidates = downcast_all::<C>(items);
        let owners = matching(candidates, MatchPolicy::EmptyMatchesNone, subject.labels());

        if owners.is_empty() {
            return Err(ListerError::NoMatchingOwner {
                name: subject.name().to_string(),
                namespace: subject.namespace().to_string(),
                labels: subject.labels().clone(),
            });
        }

        debug!(
            subject = %subject.key(),
            candidate_kind = %C::KIND,
            count = owners.len(),
            "resolved owning candidates"
        );
        Ok(owners)
    }
}

impl<C> Clone for RelationshipResolver<C> {
    fn clone(&self) -> Self {
        Self {
            lister: self.lister.clone(),
        }
    }
}

fn matching<C: Selecting>(
    candidates: Vec<Arc<C>>,
    policy: MatchPolicy,
    labels: &LabelSet,
) -> Vec<Arc<C>> {
    candidates
        .into_iter()
        .filter(|candidate| policy.selects(candidate.selector(), labels))
        .collect()
}

impl Lister<Service> {
    /// Services in `pod`'s namespace whose selector matches it.
    pub fn pod_services(&self, pod: &Pod) -> Result<Vec<Arc<Service>>> {
        RelationshipResolver::from_lister(self.clone()).resolve_selecting_candidates(pod)
    }
}

impl Lister<ReplicationController> {
    /// Replication controllers managing `pod`. Errors if there are none.
    pub fn pod_controllers(&self, pod: &Pod) -> Result<Vec<Arc<ReplicationController>>> {
        RelationshipResolver::from_lister(self.clone()).resolve_owning_candidates(pod)
    }
}
