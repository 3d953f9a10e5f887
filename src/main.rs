use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use h2c_server::{logging, Server, ServerConfig};

/// HTTP/1.1 keep-alive server with a one-shot h2c upgrade greeting.
#[derive(Debug, Parser)]
#[command(name = "h2c-server", version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides the config file
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_address = bind;
    }

    logging::init(&config.log_level)?;

    let server = Server::bind(config).await.context("starting server")?;
    server.run().await?;
    Ok(())
}
