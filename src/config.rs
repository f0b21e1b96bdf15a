//! Explicit configuration passed into client setup and the resolvers.

use std::path::PathBuf;
use std::time::Duration;

/// What to do when the matched Service has an empty selector.
///
/// An empty equality selector matches every Pod in the namespace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptySelectorPolicy {
    /// List every Pod in the namespace.
    #[default]
    MatchAll,
    /// Fail with [`Error::EmptySelector`](crate::Error::EmptySelector).
    Reject,
}

/// Configuration for resolving a deployment to its Service and Pods.
#[derive(Clone, Debug)]
pub struct ResolveConfig {
    /// Case-sensitive substring matched against Service names.
    pub name_fragment: String,

    /// The Kubernetes namespace to search.
    /// If `None`, uses the current namespace from the kube client.
    pub namespace: Option<String>,

    /// Path to a kubeconfig file.
    /// If `None`, the client is inferred from the environment (in-cluster or default kubeconfig).
    pub credentials: Option<PathBuf>,

    /// Kubeconfig context to use instead of the current one.
    pub context: Option<String>,

    /// Deadline applied to each listing request.
    pub timeout: Option<Duration>,

    /// Handling of Services whose selector is empty.
    pub empty_selector: EmptySelectorPolicy,
}

impl ResolveConfig {
    /// Creates a new configuration matching Service names against `name_fragment`.
    ///
    /// Uses the current namespace and credentials from the kube client configuration.
    #[must_use]
    pub fn new(name_fragment: impl Into<String>) -> Self {
        Self {
            name_fragment: name_fragment.into(),
            namespace: None,
            credentials: None,
            context: None,
            timeout: None,
            empty_selector: EmptySelectorPolicy::default(),
        }
    }

    /// Sets an explicit namespace.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Sets the kubeconfig file to load credentials from.
    #[must_use]
    pub fn credentials(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials = Some(path.into());
        self
    }

    /// Sets the kubeconfig context.
    #[must_use]
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Sets the per-request deadline.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the empty-selector policy.
    #[must_use]
    pub fn empty_selector(mut self, policy: EmptySelectorPolicy) -> Self {
        self.empty_selector = policy;
        self
    }
}
