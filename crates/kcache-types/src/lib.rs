//! Foundation types for the kcache object mirror.
//!
//! Every other kcache crate depends on `kcache-types`. The types here describe
//! the objects held in the local cache and the label predicates used to pick
//! them out.
//!
//! # Key Types
//!
//! - [`ObjectMeta`] — identity (`namespace`, `name`) and labels of a cached object
//! - [`LabelSet`] — string→string label mapping with unique keys
//! - [`Selector`] — equality-based label predicate
//! - [`Resource`] — trait implemented by every cacheable kind
//! - [`ResourceKind`] — closed set of kinds the cache knows about

pub mod error;
pub mod labels;
pub mod meta;
pub mod resources;
pub mod selector;

pub use error::TypeError;
pub use labels::LabelSet;
pub use meta::{object_key, split_key, ObjectMeta};
pub use resources::{
    Container, LimitRange, LimitRangeItem, Namespace, NamespacePhase, PersistentVolumeClaim,
    PersistentVolumeClaimSpec, Pod, PodPhase, PodSpec, ReplicationController,
    ReplicationControllerSpec, Resource, ResourceKind, Selecting, Service, ServiceAccount,
    ServicePort, ServiceSpec,
};
pub use selector::Selector;
