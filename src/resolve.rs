//! Two-stage resolution of a deployment name to its Service and Pods.
//!
//! # How It Works
//!
//! 1. Lists every Service in the namespace and picks the first whose name
//!    contains the fragment (case-sensitive, listing order, first match wins)
//! 2. Turns that Service's selector into an equality-based label selector
//! 3. Lists the Pods in the same namespace matching that selector
//!
//! The stages run strictly one after the other. Listing itself is delegated to
//! an [`ObjectLister`], so the resolvers carry no transport behavior.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;

use crate::config::{EmptySelectorPolicy, ResolveConfig};
use crate::error::{Error, Result, Stage};
use crate::model::{LabelSelector, PodRecord, ServiceRecord};

/// Request context forwarded unmodified on every listing call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListContext {
    /// Deadline for a single listing request, if any.
    pub timeout: Option<Duration>,
}

impl ListContext {
    /// Creates a context with a per-request deadline.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}

impl From<&ResolveConfig> for ListContext {
    fn from(config: &ResolveConfig) -> Self {
        config.timeout.map_or_else(Self::default, Self::with_timeout)
    }
}

/// Capability to list cluster objects of one kind in one namespace.
///
/// Implementations must return objects in the order the cluster returned them
/// and report transport failures as errors, never as an empty listing.
pub trait ObjectLister {
    /// Error reported when a listing call fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Lists every Service in `namespace`.
    fn list_services(
        &self,
        namespace: &str,
        ctx: &ListContext,
    ) -> impl Future<Output = std::result::Result<Vec<ServiceRecord>, Self::Error>> + Send;

    /// Lists the Pods in `namespace` matching `selector`.
    fn list_pods(
        &self,
        namespace: &str,
        selector: &LabelSelector,
        ctx: &ListContext,
    ) -> impl Future<Output = std::result::Result<Vec<PodRecord>, Self::Error>> + Send;
}

/// The Service fronting a deployment and the Pods currently backing it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The matched Service.
    pub service: ServiceRecord,
    /// Pods selected by the Service, in listing order.
    pub pods: Vec<PodRecord>,
}

/// Finds the first Service in `namespace` whose name contains `fragment`.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if no Service name contains the fragment, and
/// [`Error::Resolution`] if the Services could not be listed.
pub async fn resolve_service<L>(
    lister: &L,
    namespace: &str,
    fragment: &str,
    ctx: &ListContext,
) -> Result<ServiceRecord>
where
    L: ObjectLister,
{
    let services = lister
        .list_services(namespace, ctx)
        .await
        .map_err(|e| Error::resolution(Stage::Services, namespace, e))?;

    tracing::debug!(
        namespace,
        count = services.len(),
        "looking for service containing {fragment:?}"
    );

    let service = find_service(services, fragment).ok_or_else(|| Error::NotFound {
        namespace: namespace.to_string(),
        fragment: fragment.to_string(),
    })?;

    tracing::info!(namespace, "service name: {}", service.name);
    Ok(service)
}

/// Lists the Pods in `namespace` selected by `service`.
///
/// An empty result is not an error.
///
/// # Errors
///
/// Returns [`Error::Resolution`] if the Pods could not be listed, and
/// [`Error::EmptySelector`] if the selector is empty under
/// [`EmptySelectorPolicy::Reject`].
pub async fn resolve_pods<L>(
    lister: &L,
    namespace: &str,
    service: &ServiceRecord,
    policy: EmptySelectorPolicy,
    ctx: &ListContext,
) -> Result<Vec<PodRecord>>
where
    L: ObjectLister,
{
    let selector = service.label_selector();

    if selector.is_empty() {
        match policy {
            EmptySelectorPolicy::Reject => {
                return Err(Error::EmptySelector {
                    namespace: namespace.to_string(),
                    service: service.name.clone(),
                });
            }

            EmptySelectorPolicy::MatchAll => {
                tracing::warn!(
                    namespace,
                    service = %service.name,
                    "service has an empty selector, listing every pod in the namespace"
                );
            }
        }
    }

    let pods = lister
        .list_pods(namespace, &selector, ctx)
        .await
        .map_err(|e| Error::resolution(Stage::Pods, namespace, e))?;

    for pod in &pods {
        tracing::info!(namespace, "pod name: {}", pod.name);
    }

    tracing::debug!(
        namespace,
        service = %service.name,
        "{} pods match selector [{selector}]",
        pods.len()
    );

    Ok(pods)
}

/// Resolves the configured deployment in `namespace`: Service first, then its Pods.
///
/// # Errors
///
/// Returns the first error from either stage; the Pod stage never runs if the
/// Service stage fails.
pub async fn resolve<L>(
    lister: &L,
    config: &ResolveConfig,
    namespace: &str,
    ctx: &ListContext,
) -> Result<Resolution>
where
    L: ObjectLister,
{
    let service = resolve_service(lister, namespace, &config.name_fragment, ctx).await?;
    let pods = resolve_pods(lister, namespace, &service, config.empty_selector, ctx).await?;
    Ok(Resolution { service, pods })
}

/// Returns the first Service whose name contains `fragment`, in listing order.
fn find_service(services: Vec<ServiceRecord>, fragment: &str) -> Option<ServiceRecord> {
    services.into_iter().find(|svc| svc.name.contains(fragment))
}
