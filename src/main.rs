use anyhow::Result;
use clap::Parser;
use autoparts_store::{cli::{Args, CliApp}, utils::Config};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env()?.with_catalog_override(args.catalog.clone())?;

    let filter = if args.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        "Configuration loaded for {} environment",
        config.environment
    );

    let app = CliApp::new(config).await.map_err(|e| {
        tracing::error!("Failed to start: {:#}", e);
        e
    })?;

    app.run(args).await
}
