//! backend-infra CLI entry point.

use backend_infra::cli::Cli;
use backend_infra::{commands, Config};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.global.is_verbose() {
        "backend_infra=debug,backend_infra_core=debug"
    } else {
        "backend_infra=info,backend_infra_core=info"
    };

    // Logs go to stderr so `show` and `--format json` keep stdout parseable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().with_overrides(&cli.global);
    tracing::debug!(region = %config.region, artifact = %config.artifact.display(), "Loaded configuration");

    commands::run(cli, &config)?;

    Ok(())
}
