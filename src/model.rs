//! Read-only snapshots of the cluster objects involved in a resolution.

use std::collections::BTreeMap;
use std::fmt;

use k8s_openapi::api::core::v1::{Pod, Service};
use kube::ResourceExt;
use serde::Serialize;

/// A Service as seen by the resolver: its identity and pod selector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ServiceRecord {
    /// Service name.
    pub name: String,
    /// Namespace the Service lives in.
    pub namespace: String,
    /// Label key/value pairs a Pod must carry to back this Service.
    pub selector: BTreeMap<String, String>,
}

impl ServiceRecord {
    /// Creates a record from its parts.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        selector: BTreeMap<String, String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            selector,
        }
    }

    /// The equality-based selector derived from this Service's selector map.
    #[must_use]
    pub fn label_selector(&self) -> LabelSelector {
        LabelSelector::from(self.selector.clone())
    }
}

impl From<&Service> for ServiceRecord {
    fn from(svc: &Service) -> Self {
        // A Service without spec.selector selects nothing by label, which the
        // API server treats the same as an empty selector.
        let selector = svc
            .spec
            .as_ref()
            .and_then(|spec| spec.selector.clone())
            .unwrap_or_default();

        Self {
            name: svc.name_any(),
            namespace: svc.namespace().unwrap_or_default(),
            selector,
        }
    }
}

/// A Pod that matched a Service's selector.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PodRecord {
    /// Pod name.
    pub name: String,
    /// Namespace the Pod lives in.
    pub namespace: String,
    /// The Pod's labels.
    pub labels: BTreeMap<String, String>,
}

impl PodRecord {
    /// Creates a record from its parts.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        labels: BTreeMap<String, String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            labels,
        }
    }
}

impl From<&Pod> for PodRecord {
    fn from(pod: &Pod) -> Self {
        Self {
            name: pod.name_any(),
            namespace: pod.namespace().unwrap_or_default(),
            labels: pod.labels().clone(),
        }
    }
}

/// An equality-based label selector.
///
/// Every key must be present on an object's labels with exactly the same
/// value. An empty selector matches every object.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelSelector(BTreeMap<String, String>);

impl LabelSelector {
    /// Returns `true` if the selector has no requirements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `labels` satisfies every requirement.
    ///
    /// The API server applies the same rule to `labelSelector` listings.
    #[cfg(test)]
    pub(crate) fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        self.0
            .iter()
            .all(|(key, value)| labels.get(key) == Some(value))
    }
}

impl From<BTreeMap<String, String>> for LabelSelector {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl fmt::Display for LabelSelector {
    /// Renders the selector as `k1=v1,k2=v2` in key order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }

            write!(f, "{key}={value}")?;
        }

        Ok(())
    }
}
