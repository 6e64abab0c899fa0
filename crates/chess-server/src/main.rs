//! Chess session server.

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use chess_protocol::WireFormat;
use chess_server::config::{Config, CONFIG_PATH_ENV};
use chess_server::{logging, server};
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[clap(name = "chess-server")]
#[clap(about = "Two-player chess server with spectators")]
struct Cli {
    /// TOML config file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Address to bind
    #[clap(short, long)]
    bind: Option<String>,

    /// Port to listen on
    #[clap(short, long)]
    port: Option<u16>,

    /// Maximum simultaneous connections
    #[clap(long)]
    max_clients: Option<usize>,

    /// Line encoding: json or text
    #[clap(short, long)]
    format: Option<WireFormat>,

    /// Enable debug logging
    #[clap(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config_path = cli
        .config
        .clone()
        .or_else(|| env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));
    let mut config = Config::load(config_path.as_deref())?;

    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(max_clients) = cli.max_clients {
        config.max_clients = max_clients;
    }
    if let Some(format) = cli.format {
        config.wire_format = format;
    }

    info!(
        addr = %config.socket_addr_string(),
        max_clients = config.max_clients,
        format = %config.wire_format,
        "starting chess-server"
    );

    server::run(config).await
}
