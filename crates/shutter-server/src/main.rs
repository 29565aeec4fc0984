use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use shutter_server::{AlbumServer, ServerConfig};

/// Shutter photo-album server.
#[derive(Parser)]
#[command(name = "shutterd", version)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the bind address.
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Override the directory committed media is written into.
    #[arg(long)]
    media_root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }
    if let Some(media_root) = cli.media_root {
        config.media_root = media_root;
    }

    AlbumServer::new(config).serve().await?;
    Ok(())
}
