//! Hiroba lobby relay server.
//!
//! Clients join a channel over WebSocket and exchange messages with its members.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --port 3000 --channel staff:secret --channel random
//! ```

use std::sync::Arc;

use clap::Parser;
use hiroba_server::{
    config::{ChannelConfig, build_channels},
    domain::{BroadcastScope, Registry},
    ui::Server,
};
use hiroba_shared::{logger::setup_logger, time::SystemClock};
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "WebSocket lobby relay with per-channel history", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "80")]
    port: u16,

    /// Extra channel as NAME or NAME:PASSWORD (repeatable; "global" always exists)
    #[arg(
        short = 'c',
        long = "channel",
        env = "HIROBA_CHANNELS",
        value_delimiter = ','
    )]
    channels: Vec<ChannelConfig>,

    /// Only fan out chat and membership events to the triggering channel
    #[arg(long, env = "HIROBA_ISOLATE_CHANNELS")]
    isolate_channels: bool,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(&[env!("CARGO_PKG_NAME"), "tower_http"], &args.log_level);

    // 1. Build the channel set from static configuration
    let channels = match build_channels(args.channels) {
        Ok(channels) => channels,
        Err(e) => {
            tracing::error!("Invalid channel configuration: {}", e);
            std::process::exit(1);
        }
    };
    for channel in &channels {
        tracing::info!(
            "Channel '{}' ({}){}",
            channel.name,
            channel.label,
            if channel.is_protected() { " [password]" } else { "" }
        );
    }

    // 2. Create the registry (in-memory, owned by this process)
    let registry = Arc::new(Mutex::new(Registry::new(channels)));

    // 3. Create and run the server
    let scope = if args.isolate_channels {
        BroadcastScope::Channel
    } else {
        BroadcastScope::ProcessWide
    };
    tracing::info!("Broadcast scope: {:?}", scope);

    let server = Server::new(registry, scope, Arc::new(SystemClock));
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
