use std::sync::Arc;

use kcache_types::{
    LimitRange, Namespace, ObjectMeta, PersistentVolumeClaim, Pod, ReplicationController,
    Resource, ResourceKind, Service, ServiceAccount,
};

use crate::error::{StoreError, StoreResult};

/// A cached object of any known kind.
///
/// Payloads are reference-counted so that listings hand out cheap snapshots.
/// Cloning a `CachedObject` never copies the payload.
#[derive(Clone, Debug, PartialEq)]
pub enum CachedObject {
    Pod(Arc<Pod>),
    Service(Arc<Service>),
    ReplicationController(Arc<ReplicationController>),
    ServiceAccount(Arc<ServiceAccount>),
    LimitRange(Arc<LimitRange>),
    PersistentVolumeClaim(Arc<PersistentVolumeClaim>),
    Namespace(Arc<Namespace>),
}

macro_rules! for_each_variant {
    ($obj:expr, $inner:ident => $body:expr) => {
        match $obj {
            CachedObject::Pod($inner) => $body,
            CachedObject::Service($inner) => $body,
            CachedObject::ReplicationController($inner) => $body,
            CachedObject::ServiceAccount($inner) => $body,
            CachedObject::LimitRange($inner) => $body,
            CachedObject::PersistentVolumeClaim($inner) => $body,
            CachedObject::Namespace($inner) => $body,
        }
    };
}

impl CachedObject {
    /// The kind tag of the wrapped object.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Pod(_) => ResourceKind::Pod,
            Self::Service(_) => ResourceKind::Service,
            Self::ReplicationController(_) => ResourceKind::ReplicationController,
            Self::ServiceAccount(_) => ResourceKind::ServiceAccount,
            Self::LimitRange(_) => ResourceKind::LimitRange,
            Self::PersistentVolumeClaim(_) => ResourceKind::PersistentVolumeClaim,
            Self::Namespace(_) => ResourceKind::Namespace,
        }
    }

    pub fn meta(&self) -> &ObjectMeta {
        for_each_variant!(self, inner => inner.meta())
    }

    /// Compute the composite key, rejecting objects without a name.
    pub fn key(&self) -> StoreResult<String> {
        let meta = self.meta();
        if meta.name.is_empty() {
            return Err(StoreError::InvalidObject(format!(
                "{} in namespace {:?} has no name",
                self.kind(),
                meta.namespace
            )));
        }
        Ok(meta.key())
    }

    /// Wrap a concrete object.
    pub fn new<K: StoredResource>(object: K) -> Self {
        K::into_cached(Arc::new(object))
    }

    /// Decode a JSON document of the given kind.
    ///
    /// Used by the synchronization component when applying payloads received
    /// from the origin.
    pub fn from_json(kind: ResourceKind, data: &[u8]) -> StoreResult<Self> {
        fn decode<K: StoredResource + serde::de::DeserializeOwned>(
            data: &[u8],
        ) -> StoreResult<CachedObject> {
            let object: K = serde_json::from_slice(data)
                .map_err(|e| StoreError::Decode(format!("{}: {e}", K::KIND)))?;
            Ok(CachedObject::new(object))
        }

        match kind {
            ResourceKind::Pod => decode::<Pod>(data),
            ResourceKind::Service => decode::<Service>(data),
            ResourceKind::ReplicationController => decode::<ReplicationController>(data),
            ResourceKind::ServiceAccount => decode::<ServiceAccount>(data),
            ResourceKind::LimitRange => decode::<LimitRange>(data),
            ResourceKind::PersistentVolumeClaim => decode::<PersistentVolumeClaim>(data),
            ResourceKind::Namespace => decode::<Namespace>(data),
        }
    }
}

/// Conversion between a concrete resource and [`CachedObject`].
pub trait StoredResource: Resource {
    /// Borrow the payload if `obj` is of this kind.
    fn from_cached(obj: &CachedObject) -> Option<Arc<Self>>;

    fn into_cached(this: Arc<Self>) -> CachedObject;

    /// An object of this kind carrying only `namespace`, for index queries
    /// that key on namespace alone.
    fn namespace_probe(namespace: &str) -> CachedObject;
}

macro_rules! impl_stored_resource {
    ($ty:ident) => {
        impl StoredResource for $ty {
            fn from_cached(obj: &CachedObject) -> Option<Arc<Self>> {
                match obj {
                    CachedObject::$ty(inner) => Some(Arc::clone(inner)),
                    _ => None,
                }
            }

            fn into_cached(this: Arc<Self>) -> CachedObject {
                CachedObject::$ty(this)
            }

            fn namespace_probe(namespace: &str) -> CachedObject {
                CachedObject::$ty(Arc::new($ty {
                    metadata: ObjectMeta {
                        namespace: namespace.to_string(),
                        ..Default::default()
                    },
                    ..Default::default()
                }))
            }
        }
    };
}

impl_stored_resource!(Pod);
impl_stored_resource!(Service);
impl_stored_resource!(ReplicationController);
impl_stored_resource!(ServiceAccount);
impl_stored_resource!(LimitRange);
impl_stored_resource!(PersistentVolumeClaim);
impl_stored_resource!(Namespace);
