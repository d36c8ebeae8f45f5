use anyhow::Result;
use clap::Parser;
use deepresearch_rs::cli::Args;
use deepresearch_rs::launch;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let topic = args.topic.clone();
    let config = args.into_config()?;

    let default_level = if config.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let report = launch(&config, &topic).await?;
    println!("{}", report);

    Ok(())
}
