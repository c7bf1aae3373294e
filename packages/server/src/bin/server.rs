//! Hanare chat relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hanare-server
//! cargo run --bin hanare-server -- --host 0.0.0.0 --port 3000 --access-code secret
//! ```

use std::{num::NonZeroUsize, sync::Arc};

use clap::Parser;
use hanare_server::{
    bootstrap::build_app_state,
    config::{ChatConfig, DEFAULT_ACCESS_CODE},
    ui::Server,
};
use hanare_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "hanare-server")]
#[command(about = "Access-code protected chat room with ephemeral messages", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Shared code every client must present
    #[arg(long, env = "ACCESS_CODE", default_value = DEFAULT_ACCESS_CODE, hide_env_values = true)]
    access_code: String,

    /// Maximum number of concurrent users
    #[arg(long, env = "MAX_USERS", default_value = "2")]
    max_users: NonZeroUsize,

    /// Keep at most this many messages in history (unbounded if unset)
    #[arg(long, env = "HISTORY_LIMIT")]
    history_limit: Option<NonZeroUsize>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let config = ChatConfig {
        access_code: args.access_code,
        max_users: args.max_users.get(),
        history_limit: args.history_limit.map(NonZeroUsize::get),
        ..ChatConfig::default()
    };
    tracing::info!(
        "Chat room opened (max {} users, text TTL {}s, image TTL {}s)",
        config.max_users,
        config.retention.text_ttl.as_secs(),
        config.retention.image_ttl.as_secs()
    );

    let state = build_app_state(&config, Arc::new(SystemClock));
    let server = Server::new(state, config.sweep_interval);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
