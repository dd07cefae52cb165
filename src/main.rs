use anyhow::Result;
use clap::Parser;
use market_insight::cli;
use market_insight::generator::workflow::launch;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Args::parse();
    let (config, command) = args.into_config()?;

    // RUST_LOG 优先，其次根据 --verbose 决定日志级别
    let default_level = if config.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("market_insight={}", default_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    launch(&config, command).await
}
