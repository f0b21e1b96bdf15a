//! Kubernetes-backed listing of Services and Pods.
//!
//! This module sets up a kube [`Client`] from a [`ResolveConfig`] and
//! implements [`ObjectLister`] on top of it. Each listing is a single
//! `Api::list` request with no retries and no pagination.
//!
//! # Example
//!
//! ```ignore
//! use svc_pods::{KubeLister, ListContext, ResolveConfig, connect, resolve};
//!
//! let config = ResolveConfig::new("my-app").namespace("openfx-fn");
//! let (client, namespace) = connect(&config).await?;
//!
//! let lister = KubeLister::new(client);
//! let resolution = resolve(&lister, &config, &namespace, &ListContext::from(&config)).await?;
//! ```

use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use k8s_openapi::api::core::v1::{Pod, Service};
use kube::api::ListParams;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};
use serde::de::DeserializeOwned;

use crate::config::ResolveConfig;
use crate::error::{BoxError, Error, Result};
use crate::model::{LabelSelector, PodRecord, ServiceRecord};
use crate::resolve::{ListContext, ObjectLister};

/// Errors reported by [`KubeLister`].
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    /// The API server rejected the request or could not be reached.
    #[error(transparent)]
    Api(#[from] kube::Error),

    /// The request did not complete before the deadline.
    #[error("request timed out after {0:?}")]
    TimedOut(Duration),
}

/// Lists Services and Pods through the Kubernetes API.
#[derive(Clone)]
pub struct KubeLister {
    client: Client,
}

impl KubeLister {
    /// Creates a lister using `client`.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl ObjectLister for KubeLister {
    type Error = ListError;

    fn list_services(
        &self,
        namespace: &str,
        ctx: &ListContext,
    ) -> impl Future<Output = std::result::Result<Vec<ServiceRecord>, ListError>> + Send {
        let services: Api<Service> = Api::namespaced(self.client.clone(), namespace);
        list_records(services, ListParams::default(), ctx.timeout)
    }

    fn list_pods(
        &self,
        namespace: &str,
        selector: &LabelSelector,
        ctx: &ListContext,
    ) -> impl Future<Output = std::result::Result<Vec<PodRecord>, ListError>> + Send {
        let pods: Api<Pod> = Api::namespaced(self.client.clone(), namespace);
        list_records(pods, list_params(selector), ctx.timeout)
    }
}

/// Lists `api` once and converts each item, keeping the server's order.
async fn list_records<K, R>(
    api: Api<K>,
    params: ListParams,
    timeout: Option<Duration>,
) -> std::result::Result<Vec<R>, ListError>
where
    K: Clone + DeserializeOwned + Debug,
    R: for<'a> From<&'a K>,
{
    let list = with_deadline(timeout, api.list(&params)).await?;
    Ok(list.items.iter().map(R::from).collect())
}

/// Builds the list parameters for a Pod listing.
///
/// An empty selector sends no `labelSelector` at all, which the API server
/// treats as "match everything".
fn list_params(selector: &LabelSelector) -> ListParams {
    if selector.is_empty() {
        ListParams::default()
    } else {
        ListParams::default().labels(&selector.to_string())
    }
}

/// Runs `request`, failing with [`ListError::TimedOut`] if `timeout` elapses first.
async fn with_deadline<T, F>(
    timeout: Option<Duration>,
    request: F,
) -> std::result::Result<T, ListError>
where
    F: Future<Output = kube::Result<T>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, request)
            .await
            .map_err(|_| ListError::TimedOut(limit))?
            .map_err(ListError::from),
        None => request.await.map_err(ListError::from),
    }
}

/// Creates a Kubernetes client for `config` and determines the namespace to search.
///
/// With an explicit kubeconfig path or context, the client is built from that
/// kubeconfig. Otherwise the configuration is inferred (in-cluster first, then
/// the default kubeconfig). The namespace falls back to the client's default.
///
/// # Errors
///
/// Returns [`Error::Setup`] if the kubeconfig cannot be read or the client cannot be built.
pub async fn connect(config: &ResolveConfig) -> Result<(Client, String)> {
    let kube_config = load_config(config).await.map_err(Error::Setup)?;
    let client = Client::try_from(kube_config).map_err(|e| Error::Setup(e.into()))?;

    let namespace = config
        .namespace
        .clone()
        .unwrap_or_else(|| client.default_namespace().to_string());

    tracing::debug!(
        namespace,
        credentials = ?config.credentials,
        context = ?config.context,
        "Kubernetes client ready"
    );

    Ok((client, namespace))
}

async fn load_config(config: &ResolveConfig) -> std::result::Result<Config, BoxError> {
    let options = KubeConfigOptions {
        context: config.context.clone(),
        ..Default::default()
    };

    match &config.credentials {
        Some(path) => {
            let kubeconfig = Kubeconfig::read_from(path)?;
            Ok(Config::from_custom_kubeconfig(kubeconfig, &options).await?)
        }

        None if config.context.is_some() => Ok(Config::from_kubeconfig(&options).await?),
        None => Ok(Config::infer().await?),
    }
}
