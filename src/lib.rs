#![deny(missing_docs)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Resolve a deployment name to the Kubernetes [Service] that fronts it and
//! the [Pods] currently backing that Service.
//!
//! Resolution is a one-shot, read-only query in two stages:
//!
//! - **Service resolution**: lists the Services in a namespace and picks the
//!   first whose name contains the deployment name fragment
//! - **Pod resolution**: lists the Pods in the same namespace that match the
//!   Service's selector
//!
//! Listing goes through the [`ObjectLister`] capability. [`KubeLister`] is the
//! implementation backed by the Kubernetes API.
//!
//! # Usage
//!
//! ```ignore
//! use std::time::Duration;
//! use svc_pods::{KubeLister, ListContext, ResolveConfig, connect, resolve};
//!
//! let config = ResolveConfig::new("my-app")
//!     .namespace("openfx-fn")
//!     .timeout(Duration::from_secs(10));
//!
//! let (client, namespace) = connect(&config).await?;
//! let lister = KubeLister::new(client);
//!
//! let resolution = resolve(&lister, &config, &namespace, &ListContext::from(&config)).await?;
//! for pod in &resolution.pods {
//!     println!("{}", pod.name);
//! }
//! ```
//!
//! [Service]: https://kubernetes.io/docs/concepts/services-networking/service/
//! [Pods]: https://kubernetes.io/docs/concepts/workloads/pods/

mod config;
mod error;
mod k8s;
mod model;
mod resolve;

pub use config::{EmptySelectorPolicy, ResolveConfig};
pub use error::{BoxError, Error, Result, Stage};
pub use k8s::{KubeLister, ListError, connect};
pub use model::{LabelSelector, PodRecord, ServiceRecord};
pub use resolve::{
    ListContext, ObjectLister, Resolution, resolve, resolve_pods, resolve_service,
};
