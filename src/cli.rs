use std::path::PathBuf;
use std::time::Duration;

use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, ValueEnum};
use svc_pods::{EmptySelectorPolicy, ResolveConfig};

#[derive(Parser, Debug)]
#[command(name = "svc-pods")]
#[command(author, version, about = "Find the Service and Pods behind a deployment")]
pub struct Args {
    /// Substring of the Service name to look for (case-sensitive)
    #[arg(short, long, env = "SVC_PODS_DEPLOYMENT", value_parser = NonEmptyStringValueParser::new())]
    pub deployment: String,

    /// Namespace to search (default: the kubeconfig's namespace)
    #[arg(short, long, env = "SVC_PODS_NAMESPACE")]
    pub namespace: Option<String>,

    /// Path to a single kubeconfig file (default: `KUBECONFIG` or ~/.kube/config, read by the client)
    #[arg(long, env = "SVC_PODS_KUBECONFIG", value_name = "PATH")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use
    #[arg(long, env = "SVC_PODS_CONTEXT")]
    pub context: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "SVC_PODS_TIMEOUT", value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Fail instead of listing every pod when the service has an empty selector
    #[arg(long)]
    pub reject_empty_selector: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Args {
    pub fn to_config(&self) -> ResolveConfig {
        let mut config = ResolveConfig::new(&self.deployment);

        if let Some(ns) = &self.namespace {
            config = config.namespace(ns);
        }

        if let Some(path) = &self.kubeconfig {
            config = config.credentials(path);
        }

        if let Some(context) = &self.context {
            config = config.context(context);
        }

        if let Some(secs) = self.timeout {
            config = config.timeout(Duration::from_secs(secs));
        }

        if self.reject_empty_selector {
            config = config.empty_selector(EmptySelectorPolicy::Reject);
        }

        config
    }
}
