use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use client_core::{AdditionController, HttpAdditionService, SubmitPolicy};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod view;

use config::{load_settings, Settings};

#[derive(Parser, Debug)]
struct Args {
    /// Base URL of the addition service.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Submit once with these operands instead of running interactively.
    #[arg(long, requires = "second")]
    first: Option<String>,
    #[arg(long, requires = "first")]
    second: Option<String>,
    #[arg(long)]
    reject_while_pending: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    apply_overrides(&mut settings, &args);

    let service = Arc::new(HttpAdditionService::new(&settings.server_url)?);
    info!(
        endpoint = %service.endpoint(),
        policy = ?settings.submit_policy,
        "addition terminal ready"
    );
    let controller = AdditionController::with_policy(service, settings.submit_policy);

    match (args.first, args.second) {
        (Some(first), Some(second)) => {
            view::run_once(&controller, first, second, &mut tokio::io::stdout()).await
        }
        _ => view::run_interactive(controller).await,
    }
}

/// Command-line flags take precedence over file and environment settings.
fn apply_overrides(settings: &mut Settings, args: &Args) {
    if let Some(server_url) = &args.server_url {
        settings.server_url = server_url.clone();
    }
    if args.reject_while_pending {
        settings.submit_policy = SubmitPolicy::RejectWhilePending;
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
