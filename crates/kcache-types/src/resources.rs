//! Resource kinds held by the cache.
//!
//! Each kind carries an [`ObjectMeta`] plus a small kind-specific payload.
//! Only the fields the cache's consumers read are modelled; the mirror is
//! decoded from JSON with unknown fields ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::labels::LabelSet;
use crate::meta::ObjectMeta;

/// The closed set of kinds the cache knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Pod,
    Service,
    ReplicationController,
    ServiceAccount,
    LimitRange,
    PersistentVolumeClaim,
    Namespace,
}

impl ResourceKind {
    /// Returns `false` for cluster-scoped kinds.
    pub fn is_namespaced(&self) -> bool {
        !matches!(self, Self::Namespace)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pod => write!(f, "pod"),
            Self::Service => write!(f, "service"),
            Self::ReplicationController => write!(f, "replicationcontroller"),
            Self::ServiceAccount => write!(f, "serviceaccount"),
            Self::LimitRange => write!(f, "limitrange"),
            Self::PersistentVolumeClaim => write!(f, "persistentvolumeclaim"),
            Self::Namespace => write!(f, "namespace"),
        }
    }
}

/// A kind of object that can live in the cache.
pub trait Resource: Clone + Send + Sync + 'static {
    /// The kind tag for this type.
    const KIND: ResourceKind;

    fn meta(&self) -> &ObjectMeta;

    fn name(&self) -> &str {
        &self.meta().name
    }

    fn namespace(&self) -> &str {
        &self.meta().namespace
    }

    fn labels(&self) -> &LabelSet {
        &self.meta().labels
    }

    /// Composite cache key (`namespace/name`, or `name` if cluster-scoped).
    fn key(&self) -> String {
        self.meta().key()
    }
}

/// A kind that picks out other objects by label.
pub trait Selecting: Resource {
    /// The declared selector, or `None` if the object declares no criteria.
    ///
    /// `Some` of an empty set is a distinct state from `None`.
    fn selector(&self) -> Option<&LabelSet>;
}

macro_rules! impl_resource {
    ($ty:ty, $kind:ident) => {
        impl Resource for $ty {
            const KIND: ResourceKind = ResourceKind::$kind;

            fn meta(&self) -> &ObjectMeta {
                &self.metadata
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Pod
// ---------------------------------------------------------------------------

/// Lifecycle phase of a pod.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PodPhase {
    #[default]
    Pending,
    Running,
    Succeeded,
    Failed,
    Unknown,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Container {
    pub name: String,
    pub image: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PodSpec {
    pub containers: Vec<Container>,
    pub node_name: Option<String>,
    pub service_account_name: Option<String>,
}

/// A workload instance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pod {
    pub metadata: ObjectMeta,
    pub spec: PodSpec,
    pub phase: PodPhase,
}

impl Pod {
    pub fn new(metadata: ObjectMeta) -> Self {
        Self {
            metadata,
            ..Default::default()
        }
    }
}

impl_resource!(Pod, Pod);

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServicePort {
    pub name: Option<String>,
    pub port: u16,
    pub target_port: Option<u16>,
    pub protocol: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceSpec {
    /// Pods this service routes to. `None` selects no pods.
    pub selector: Option<LabelSet>,
    pub cluster_ip: Option<String>,
    pub ports: Vec<ServicePort>,
}

/// A stable endpoint selecting a group of pods.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    pub metadata: ObjectMeta,
    pub spec: ServiceSpec,
}

impl Service {
    pub fn new(metadata: ObjectMeta, selector: Option<LabelSet>) -> Self {
        Self {
            metadata,
            spec: ServiceSpec {
                selector,
                ..Default::default()
            },
        }
    }
}

impl_resource!(Service, Service);

impl Selecting for Service {
    fn selector(&self) -> Option<&LabelSet> {
        self.spec.selector.as_ref()
    }
}

// ---------------------------------------------------------------------------
// ReplicationController
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplicationControllerSpec {
    pub replicas: Option<u32>,
    /// Pods this controller owns. Absent or empty owns nothing.
    pub selector: Option<LabelSet>,
}

/// Keeps a fixed number of pod replicas running.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReplicationController {
    pub metadata: ObjectMeta,
    pub spec: ReplicationControllerSpec,
}

impl ReplicationController {
    pub fn new(metadata: ObjectMeta, selector: Option<LabelSet>) -> Self {
        Self {
            metadata,
            spec: ReplicationControllerSpec {
                selector,
                ..Default::default()
            },
        }
    }
}

impl_resource!(ReplicationController, ReplicationController);

impl Selecting for ReplicationController {
    fn selector(&self) -> Option<&LabelSet> {
        self.spec.selector.as_ref()
    }
}

// ---------------------------------------------------------------------------
// ServiceAccount
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceAccount {
    pub metadata: ObjectMeta,
    /// Names of secrets usable by pods running as this account.
    pub secrets: Vec<String>,
}

impl_resource!(ServiceAccount, ServiceAccount);

// ---------------------------------------------------------------------------
// LimitRange
// ---------------------------------------------------------------------------

/// One per-resource constraint, e.g. `{ type: Container, resource: cpu }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LimitRangeItem {
    #[serde(rename = "type")]
    pub limit_type: String,
    pub resource: String,
    pub min: Option<String>,
    pub max: Option<String>,
    pub default: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LimitRange {
    pub metadata: ObjectMeta,
    pub limits: Vec<LimitRangeItem>,
}

impl_resource!(LimitRange, LimitRange);

// ---------------------------------------------------------------------------
// PersistentVolumeClaim
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistentVolumeClaimSpec {
    pub access_modes: Vec<String>,
    pub storage_class_name: Option<String>,
    pub volume_name: Option<String>,
    pub requested_storage: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistentVolumeClaim {
    pub metadata: ObjectMeta,
    pub spec: PersistentVolumeClaimSpec,
}

impl_resource!(PersistentVolumeClaim, PersistentVolumeClaim);

// ---------------------------------------------------------------------------
// Namespace
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamespacePhase {
    #[default]
    Active,
    Terminating,
}

/// A cluster-scoped grouping of namespaced objects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Namespace {
    pub metadata: ObjectMeta,
    pub phase: NamespacePhase,
}

impl_resource!(Namespace, Namespace);
