mod cli;

use std::process::ExitCode;

use clap::Parser;
use svc_pods::{Error, KubeLister, ListContext, Resolution, connect, resolve};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use cli::{Args, OutputFormat};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args).await {
        Ok(resolution) => {
            if let Err(e) = print_resolution(&resolution, args.output) {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }

            ExitCode::SUCCESS
        }

        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}

async fn run(args: &Args) -> Result<Resolution, Error> {
    let config = args.to_config();
    let (client, namespace) = connect(&config).await?;

    tracing::debug!(
        namespace,
        deployment = %config.name_fragment,
        "resolving deployment"
    );

    let lister = KubeLister::new(client);
    resolve(&lister, &config, &namespace, &ListContext::from(&config)).await
}

fn init_logging(verbose: bool) {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(verbose, &directives))
        .init();
}

/// Uses `directives` (from `RUST_LOG`) when given, falling back to `info`, or `debug` when verbose.
fn log_filter(verbose: bool, directives: &str) -> EnvFilter {
    let default = if verbose { Level::DEBUG } else { Level::INFO };

    EnvFilter::builder()
        .with_default_directive(default.into())
        .parse_lossy(directives)
}

fn print_resolution(resolution: &Resolution, format: OutputFormat) -> serde_json::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("service: {}", resolution.service.name);
            for pod in &resolution.pods {
                println!("pod: {}", pod.name);
            }
        }

        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(resolution)?);
        }
    }

    Ok(())
}
