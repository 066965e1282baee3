//! Kind-safe listers over the shared store.
//!
//! The store holds objects of every kind side by side. A [`Lister<K>`] only
//! ever yields `K`: objects of another kind are skipped during listing and
//! reported as [`ListerError::TypeMismatch`] on point lookup.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use kcache_store::{list_all, list_all_by_namespace, CachedObject, Indexer, StoredResource};
use kcache_types::{
    object_key, LimitRange, Namespace, PersistentVolumeClaim, Pod, ReplicationController,
    Selector, Service, ServiceAccount,
};
use tracing::{debug, warn};

use crate::error::{ListerError, Result};

pub type PodLister = Lister<Pod>;
pub type ServiceLister = Lister<Service>;
pub type ReplicationControllerLister = Lister<ReplicationController>;
pub type ServiceAccountLister = Lister<ServiceAccount>;
pub type LimitRangeLister = Lister<LimitRange>;
pub type PersistentVolumeClaimLister = Lister<PersistentVolumeClaim>;
pub type NamespaceLister = Lister<Namespace>;

/// Lists objects of kind `K` across the whole store.
pub struct Lister<K> {
    indexer: Arc<dyn Indexer>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: StoredResource> Lister<K> {
    pub fn new(indexer: Arc<dyn Indexer>) -> Self {
        Self {
            indexer,
            _kind: PhantomData,
        }
    }

    /// Every `K` in the store whose labels satisfy `selector`.
    pub fn list(&self, selector: &Selector) -> Result<Vec<Arc<K>>> {
        let items = list_all(self.indexer.as_ref(), selector)?;
        let objects = downcast_all::<K>(items);
        debug!(kind = %K::KIND, count = objects.len(), %selector, "listed");
        Ok(objects)
    }

    /// A view restricted to one namespace.
    pub fn namespace(&self, namespace: impl Into<String>) -> ScopedLister<K> {
        ScopedLister {
            indexer: Arc::clone(&self.indexer),
            namespace: namespace.into(),
            _kind: PhantomData,
        }
    }

    /// The store this lister reads from.
    pub fn indexer(&self) -> &Arc<dyn Indexer> {
        &self.indexer
    }
}

impl Lister<Namespace> {
    /// Look up a namespace by name. Namespaces are keyed by bare name.
    pub fn get(&self, name: &str) -> Result<Arc<Namespace>> {
        get_typed(self.indexer.as_ref(), name, name)
    }
}

impl<K> Clone for Lister<K> {
    fn clone(&self) -> Self {
        Self {
            indexer: Arc::clone(&self.indexer),
            _kind: PhantomData,
        }
    }
}

impl<K: StoredResource> fmt::Debug for Lister<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lister").field("kind", &K::KIND).finish()
    }
}

/// Lists and looks up objects of kind `K` within one namespace.
pub struct ScopedLister<K> {
    indexer: Arc<dyn Indexer>,
    namespace: String,
    _kind: PhantomData<fn() -> K>,
}

impl<K: StoredResource> ScopedLister<K> {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Every `K` in this namespace whose labels satisfy `selector`.
    ///
    /// Served from the store's namespace index.
    pub fn list(&self, selector: &Selector) -> Result<Vec<Arc<K>>> {
        let items = list_all_by_namespace(self.indexer.as_ref(), &self.namespace, selector)?;
        let objects = downcast_all::<K>(items);
        debug!(
            kind = %K::KIND,
            namespace = %self.namespace,
            count = objects.len(),
            %selector,
            "listed namespace"
        );
        Ok(objects)
    }

    /// Look up `name` in this namespace.
    pub fn get(&self, name: &str) -> Result<Arc<K>> {
        get_typed(self.indexer.as_ref(), &object_key(&self.namespace, name), name)
    }
}

impl<K> Clone for ScopedLister<K> {
    fn clone(&self) -> Self {
        Self {
            indexer: Arc::clone(&self.indexer),
            namespace: self.namespace.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: StoredResource> fmt::Debug for ScopedLister<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedLister")
            .field("kind", &K::KIND)
            .field("namespace", &self.namespace)
            .finish()
    }
}

/// Keep the objects of kind `K`, skipping anything else.
///
/// A foreign kind in a listing means the store was wired up wrongly; it is
/// logged and dropped so one bad entry cannot fail the whole listing.
pub(crate) fn downcast_all<K: StoredResource>(items: Vec<CachedObject>) -> Vec<Arc<K>> {
    items
        .into_iter()
        .filter_map(|obj| {
            let typed = K::from_cached(&obj);
            if typed.is_none() {
                warn!(
                    key = %obj.meta().key(),
                    expected = %K::KIND,
                    found = %obj.kind(),
                    "skipping object of unexpected kind"
                );
            }
            typed
        })
        .collect()
}

fn get_typed<K: StoredResource>(indexer: &dyn Indexer, key: &str, name: &str) -> Result<Arc<K>> {
    let obj = indexer
        .get_by_key(key)?
        .ok_or_else(|| ListerError::NotFound {
            kind: K::KIND,
            name: name.to_string(),
        })?;
    K::from_cached(&obj).ok_or_else(|| ListerError::TypeMismatch {
        key: key.to_string(),
        expected: K::KIND,
        found: obj.kind(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kcache_store::{Indexers, InMemoryIndexer, StoreError, StoreResult};
    use kcache_types::{LabelSet, ObjectMeta, ResourceKind};
    use proptest::prelude::*;

    fn labeled(ns: &str, name: &str, labels: &[(&str, &str)]) -> ObjectMeta {
        ObjectMeta::namespaced(ns, name).with_labels(labels.iter().copied().collect())
    }

    fn store_with(objects: Vec<CachedObject>) -> Arc<InMemoryIndexer> {
        let store = Arc::new(InMemoryIndexer::new());
        for obj in objects {
            store.add(obj).unwrap();
        }
        store
    }

    fn names<K: StoredResource>(objects: &[Arc<K>]) -> Vec<String> {
        let mut names: Vec<String> = objects.iter().map(|o| o.key()).collect();
        names.sort();
        names
    }

    /// A store whose enumeration always fails.
    struct BrokenIndexer;

    impl Indexer for BrokenIndexer {
        fn get_by_key(&self, _key: &str) -> StoreResult<Option<CachedObject>> {
            Err(StoreError::Unavailable("broken".into()))
        }
        fn list(&self) -> StoreResult<Vec<CachedObject>> {
            Err(StoreError::Unavailable("broken".into()))
        }
        fn list_keys(&self) -> StoreResult<Vec<String>> {
            Err(StoreError::Unavailable("broken".into()))
        }
        fn by_index(&self, _: &str, _: &str) -> StoreResult<Vec<CachedObject>> {
            Err(StoreError::Unavailable("broken".into()))
        }
        fn index(&self, _: &str, _: &CachedObject) -> StoreResult<Vec<CachedObject>> {
            Err(StoreError::Unavailable("broken".into()))
        }
        fn has_index(&self, _: &str) -> bool {
            true
        }
    }

    // -----------------------------------------------------------------------
    // Whole-store listing
    // -----------------------------------------------------------------------

    #[test]
    fn list_filters_by_selector_across_namespaces() {
        let store = store_with(vec![
            CachedObject::new(Pod::new(labeled("ns1", "a", &[("app", "x")]))),
            CachedObject::new(Pod::new(labeled("ns2", "b", &[("app", "x")]))),
            CachedObject::new(Pod::new(labeled("ns2", "c", &[("app", "y")]))),
        ]);
        let pods = PodLister::new(store);

        let x = pods.list(&Selector::parse("app=x").unwrap()).unwrap();
        assert_eq!(names(&x), vec!["ns1/a", "ns2/b"]);
        assert_eq!(pods.list(&Selector::everything()).unwrap().len(), 3);
    }

    #[test]
    fn list_skips_other_kinds() {
        let store = store_with(vec![
            CachedObject::new(Pod::new(labeled("ns1", "a", &[]))),
            CachedObject::new(Service::new(labeled("ns1", "s", &[]), None)),
        ]);
        let pods = PodLister::new(store.clone());
        let services = ServiceLister::new(store);

        assert_eq!(names(&pods.list(&Selector::everything()).unwrap()), vec!["ns1/a"]);
        assert_eq!(
            names(&services.list(&Selector::everything()).unwrap()),
            vec!["ns1/s"]
        );
    }

    #[test]
    fn list_surfaces_store_failure() {
        let pods = PodLister::new(Arc::new(BrokenIndexer));
        let err = pods.list(&Selector::everything()).unwrap_err();
        assert!(matches!(err, ListerError::StoreUnavailable(_)));

        let err = pods.namespace("ns1").list(&Selector::everything()).unwrap_err();
        assert!(matches!(err, ListerError::StoreUnavailable(_)));
    }

    // -----------------------------------------------------------------------
    // Namespace-scoped listing and lookup
    // -----------------------------------------------------------------------

    #[test]
    fn namespace_list_restricts_to_namespace() {
        let store = store_with(vec![
            CachedObject::new(ServiceAccount {
                metadata: labeled("ns1", "default", &[]),
                ..Default::default()
            }),
            CachedObject::new(ServiceAccount {
                metadata: labeled("ns2", "default", &[]),
                ..Default::default()
            }),
        ]);
        let accounts = ServiceAccountLister::new(store);
        let ns1 = accounts.namespace("ns1").list(&Selector::everything()).unwrap();
        assert_eq!(names(&ns1), vec!["ns1/default"]);
    }

    #[test]
    fn get_existing_object() {
        let store = store_with(vec![CachedObject::new(PersistentVolumeClaim {
            metadata: labeled("ns1", "data", &[]),
            ..Default::default()
        })]);
        let claims = PersistentVolumeClaimLister::new(store);
        let claim = claims.namespace("ns1").get("data").unwrap();
        assert_eq!(claim.metadata.name, "data");
    }

    #[test]
    fn get_missing_is_not_found() {
        let pods = PodLister::new(Arc::new(InMemoryIndexer::new()));
        let err = pods.namespace("ns1").get("missing").unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(
            err,
            ListerError::NotFound { kind: ResourceKind::Pod, ref name } if name == "missing"
        ));
    }

    #[test]
    fn get_wrong_kind_is_type_mismatch() {
        let store = store_with(vec![CachedObject::new(Service::new(
            labeled("ns1", "web", &[]),
            None,
        ))]);
        let pods = PodLister::new(store);
        let err = pods.namespace("ns1").get("web").unwrap_err();
        assert!(matches!(
            err,
            ListerError::TypeMismatch {
                expected: ResourceKind::Pod,
                found: ResourceKind::Service,
                ..
            }
        ));
    }

    #[test]
    fn get_surfaces_store_failure() {
        let limits = LimitRangeLister::new(Arc::new(BrokenIndexer));
        let err = limits.namespace("ns1").get("x").unwrap_err();
        assert!(matches!(err, ListerError::StoreUnavailable(_)));
    }

    #[test]
    fn namespace_list_without_index_still_scoped() {
        let store = Arc::new(InMemoryIndexer::with_indexers(Indexers::new()));
        store
            .add(CachedObject::new(Pod::new(labeled("ns1", "a", &[]))))
            .unwrap();
        store
            .add(CachedObject::new(Pod::new(labeled("ns2", "b", &[]))))
            .unwrap();
        let pods = PodLister::new(store);
        let ns1 = pods.namespace("ns1").list(&Selector::everything()).unwrap();
        assert_eq!(names(&ns1), vec!["ns1/a"]);
    }

    // -----------------------------------------------------------------------
    // Cluster-scoped namespaces
    // -----------------------------------------------------------------------

    #[test]
    fn namespaces_are_keyed_by_name() {
        let store = store_with(vec![CachedObject::new(Namespace {
            metadata: ObjectMeta::cluster("kube-system")
                .with_labels(LabelSet::new().with("tier", "system")),
            ..Default::default()
        })]);
        let namespaces = NamespaceLister::new(store);

        assert_eq!(namespaces.get("kube-system").unwrap().metadata.name, "kube-system");
        assert!(namespaces.get("other").unwrap_err().is_not_found());
        assert_eq!(
            namespaces
                .list(&Selector::parse("tier=system").unwrap())
                .unwrap()
                .len(),
            1
        );
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    proptest! {
        #[test]
        fn scoped_list_matches_filtered_full_list(
            pods in prop::collection::vec(("ns[1-2]", "[a-e]", prop::option::of("[x-y]")), 0..16),
            ns in "ns[1-2]",
            app in prop::option::of("[x-y]"),
        ) {
            let store = Arc::new(InMemoryIndexer::new());
            for (pns, name, papp) in &pods {
                let labels: LabelSet = papp.iter().map(|v| ("app", v.as_str())).collect();
                store
                    .add(CachedObject::new(Pod::new(
                        ObjectMeta::namespaced(pns.as_str(), name.as_str()).with_labels(labels),
                    )))
                    .unwrap();
            }
            let selector = match &app {
                Some(v) => Selector::from_set(LabelSet::new().with("app", v.as_str())),
                None => Selector::everything(),
            };
            let lister = PodLister::new(store);

            let full: Vec<Arc<Pod>> = lister
                .list(&selector)
                .unwrap()
                .into_iter()
                .filter(|p| p.metadata.namespace == ns)
                .collect();
            let scoped = lister.namespace(ns.as_str()).list(&selector).unwrap();

            prop_assert_eq!(names(&scoped), names(&full));
            prop_assert!(scoped.iter().all(|p| selector.matches(&p.metadata.labels)));
        }
    }
}
