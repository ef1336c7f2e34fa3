//! Command-line entry point for the microserve HTTP server.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use log::{error, info};

use microserve_rs::{HttpServer, ServerConfig, ServerError};

/// Serve echo, user-agent and file endpoints over HTTP/1.1.
#[derive(Parser, Debug)]
#[command(name = "microserve", version, about, long_about = None)]
struct Cli {
    /// Directory to serve files from [default: .]
    #[arg(long)]
    directory: Option<PathBuf>,

    /// Address to listen on [default: 0.0.0.0:4221]
    #[arg(long)]
    addr: Option<SocketAddr>,

    /// Size of the buffer a request is read into [default: 4096]
    #[arg(long)]
    read_buffer_size: Option<usize>,

    /// JSON configuration file; flags given on the command line take precedence
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<ServerConfig, ServerError> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_json_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(directory) = self.directory {
            config.directory = directory;
        }
        if let Some(addr) = self.addr {
            config.addr = addr;
        }
        if let Some(read_buffer_size) = self.read_buffer_size {
            config.read_buffer_size = read_buffer_size;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config().inspect_err(|e| {
        error!("Invalid configuration: {e}");
    })?;

    let server = HttpServer::with_default_routes(config)?;

    info!("Starting server");
    server.start().await.inspect_err(|e| match e {
        ServerError::IoError(_) => error!("Failed to bind to {addr}: {e}", addr = server.config.addr),
        _ => error!("Server error: {e}"),
    })?;

    Ok(())
}
