//! Selector-filtered listing over any [`Indexer`].

use kcache_types::Selector;
use tracing::warn;

use crate::error::{StoreError, StoreResult};
use crate::index::NAMESPACE_INDEX;
use crate::object::CachedObject;
use crate::traits::Indexer;

/// The namespace value meaning "every namespace".
pub const NAMESPACE_ALL: &str = "";

/// Snapshot the whole store, keeping objects whose labels satisfy `selector`.
pub fn list_all(indexer: &dyn Indexer, selector: &Selector) -> StoreResult<Vec<CachedObject>> {
    let items = indexer.list()?;
    if selector.is_empty() {
        return Ok(items);
    }
    Ok(items
        .into_iter()
        .filter(|obj| selector.matches(&obj.meta().labels))
        .collect())
}

/// Like [`list_all`], restricted to one namespace.
///
/// Uses [`NAMESPACE_INDEX`] so the cost is bounded by the namespace's size.
/// [`NAMESPACE_ALL`] lists every namespace. If the store has no namespace
/// index this logs a warning and falls back to a filtered full scan.
pub fn list_all_by_namespace(
    indexer: &dyn Indexer,
    namespace: &str,
    selector: &Selector,
) -> StoreResult<Vec<CachedObject>> {
    if namespace == NAMESPACE_ALL {
        return list_all(indexer, selector);
    }

    let items = match indexer.by_index(NAMESPACE_INDEX, namespace) {
        Ok(items) => items,
        Err(StoreError::IndexNotFound(name)) => {
            warn!(index = %name, namespace, "namespace index missing; scanning whole store");
            return Ok(indexer
                .list()?
                .into_iter()
                .filter(|obj| {
                    let meta = obj.meta();
                    meta.namespace == namespace && selector.matches(&meta.labels)
                })
                .collect());
        }
        Err(e) => return Err(e),
    };

    Ok(items
        .into_iter()
        .filter(|obj| selector.matches(&obj.meta().labels))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Indexers;
    use crate::memory::InMemoryIndexer;
    use kcache_types::{LabelSet, ObjectMeta, Pod};
    use proptest::prelude::*;

    fn pod(ns: &str, name: &str, app: &str) -> CachedObject {
        CachedObject::new(Pod::new(
            ObjectMeta::namespaced(ns, name).with_labels(LabelSet::new().with("app", app)),
        ))
    }

    fn sorted_keys(objects: &[CachedObject]) -> Vec<String> {
        let mut keys: Vec<String> = objects.iter().map(|o| o.meta().key()).collect();
        keys.sort();
        keys
    }

    fn seeded(indexer: InMemoryIndexer) -> InMemoryIndexer {
        indexer.add(pod("ns1", "a", "x")).unwrap();
        indexer.add(pod("ns1", "b", "y")).unwrap();
        indexer.add(pod("ns2", "c", "x")).unwrap();
        indexer
    }

    #[test]
    fn list_all_filters_by_selector() {
        let store = seeded(InMemoryIndexer::new());
        let x = Selector::parse("app=x").unwrap();
        assert_eq!(
            sorted_keys(&list_all(&store, &x).unwrap()),
            vec!["ns1/a", "ns2/c"]
        );
        assert_eq!(list_all(&store, &Selector::everything()).unwrap().len(), 3);
        assert!(list_all(&store, &Selector::nothing()).unwrap().is_empty());
    }

    #[test]
    fn by_namespace_restricts_and_filters() {
        let store = seeded(InMemoryIndexer::new());
        let x = Selector::parse("app=x").unwrap();
        assert_eq!(
            sorted_keys(&list_all_by_namespace(&store, "ns1", &x).unwrap()),
            vec!["ns1/a"]
        );
        assert!(list_all_by_namespace(&store, "ns3", &x).unwrap().is_empty());
    }

    #[test]
    fn namespace_all_lists_everything() {
        let store = seeded(InMemoryIndexer::new());
        let all = list_all_by_namespace(&store, NAMESPACE_ALL, &Selector::everything()).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn falls_back_to_scan_without_index() {
        let store = seeded(InMemoryIndexer::with_indexers(Indexers::new()));
        let got = list_all_by_namespace(&store, "ns1", &Selector::everything()).unwrap();
        assert_eq!(sorted_keys(&got), vec!["ns1/a", "ns1/b"]);
    }

    proptest! {
        #[test]
        fn namespace_listing_is_restriction_of_full_listing(
            pods in prop::collection::vec(("ns[1-3]", "[a-f]", "[x-z]"), 0..20),
            ns in "ns[1-3]",
            app in "[x-z]",
        ) {
            let store = InMemoryIndexer::new();
            for (pns, name, papp) in &pods {
                store.add(pod(pns, name, papp)).unwrap();
            }
            let selector = Selector::from_set(LabelSet::new().with("app", app));

            let full = list_all(&store, &selector).unwrap();
            let scoped = list_all_by_namespace(&store, &ns, &selector).unwrap();

            let expected: Vec<CachedObject> = full
                .iter()
                .filter(|o| o.meta().namespace == ns)
                .cloned()
                .collect();
            prop_assert_eq!(sorted_keys(&scoped), sorted_keys(&expected));
            prop_assert!(scoped.iter().all(|o| selector.matches(&o.meta().labels)));

            let again = list_all_by_namespace(&store, &ns, &selector).unwrap();
            prop_assert_eq!(sorted_keys(&again), sorted_keys(&scoped));
        }
    }
}
