//! Error taxonomy for client setup and the two resolution stages.

use std::fmt;

use thiserror::Error;

/// Boxed source error from the client or a listing collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for resolution operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The resolution stage a listing call belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Listing Services to find the one fronting the deployment.
    Services,
    /// Listing Pods selected by the matched Service.
    Pods,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Services => f.write_str("services"),
            Self::Pods => f.write_str("pods"),
        }
    }
}

/// Errors returned by client setup and resolution.
#[derive(Debug, Error)]
pub enum Error {
    /// The Kubernetes client could not be configured or constructed.
    #[error("failed to set up Kubernetes client: {0}")]
    Setup(#[source] BoxError),

    /// No Service name in the namespace contains the fragment.
    #[error("no service in namespace {namespace} has a name containing {fragment:?}")]
    NotFound {
        /// Namespace that was searched.
        namespace: String,
        /// Fragment that was matched against Service names.
        fragment: String,
    },

    /// A listing call failed at the transport level.
    #[error("failed to list {stage} in namespace {namespace}: {source}")]
    Resolution {
        /// The stage whose listing call failed.
        stage: Stage,
        /// Namespace that was queried.
        namespace: String,
        /// Error reported by the listing collaborator.
        #[source]
        source: BoxError,
    },

    /// The matched Service has an empty selector and empty selectors are rejected.
    #[error("service {namespace}/{service} has an empty selector, which would match every pod")]
    EmptySelector {
        /// Namespace of the Service.
        namespace: String,
        /// Name of the Service.
        service: String,
    },
}

impl Error {
    /// Process exit status for this error.
    ///
    /// `2` is left to the command-line parser for usage errors.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Setup(_) => 1,
            Self::NotFound { .. } => 3,
            Self::Resolution { .. } => 4,
            Self::EmptySelector { .. } => 5,
        }
    }

    pub(crate) fn resolution(
        stage: Stage,
        namespace: &str,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Resolution {
            stage,
            namespace: namespace.to_string(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_error() -> BoxError {
        Box::new(std::io::Error::other("connection refused"))
    }

    #[test]
    fn exit_codes_are_distinct_per_kind() {
        let errors = [
            Error::Setup(io_error()),
            Error::NotFound {
                namespace: "ns".to_string(),
                fragment: "app".to_string(),
            },
            Error::resolution(Stage::Services, "ns", io_error()),
            Error::EmptySelector {
                namespace: "ns".to_string(),
                service: "svc".to_string(),
            },
        ];

        let mut codes: Vec<i32> = errors.iter().map(Error::exit_code).collect();
        codes.sort_unstable();
        codes.dedup();

        assert_eq!(codes, vec![1, 3, 4, 5]);
    }

    #[test]
    fn resolution_errors_share_an_exit_code_across_stages() {
        let services = Error::resolution(Stage::Services, "ns", io_error());
        let pods = Error::resolution(Stage::Pods, "ns", io_error());

        assert_eq!(services.exit_code(), pods.exit_code());
    }

    #[test]
    fn resolution_message_names_the_stage() {
        let err = Error::resolution(Stage::Pods, "openfx-fn", io_error());

        assert_eq!(
            err.to_string(),
            "failed to list pods in namespace openfx-fn: connection refused"
        );
    }

    #[test]
    fn not_found_message_quotes_the_fragment() {
        let err = Error::NotFound {
            namespace: "openfx-fn".to_string(),
            fragment: "APP_NAME".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "no service in namespace openfx-fn has a name containing \"APP_NAME\""
        );
    }

    #[test]
    fn setup_error_exposes_source() {
        let err = Error::Setup(io_error());
        assert!(std::error::Error::source(&err).is_some());
    }
}
