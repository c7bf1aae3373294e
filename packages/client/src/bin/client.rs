//! Terminal chat client with reconnection support.
//!
//! Authenticates with the shared access code, prints the history and live
//! events, and sends each input line as a message.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//! A rejected code or username ends the process with a non-zero exit status.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hanare-client -- --code noel2025 --username alice
//! cargo run --bin hanare-client -- -u ws://192.168.0.10:3000/ws -c noel2025 -n bob
//! ```

use clap::Parser;

use hanare_client::run_client;
use hanare_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hanare-client")]
#[command(about = "Terminal client for the Hanare chat server", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3000/ws")]
    url: String,

    /// Shared access code
    #[arg(short = 'c', long, env = "ACCESS_CODE", hide_env_values = true)]
    code: String,

    /// Name shown to the other user
    #[arg(short = 'n', long)]
    username: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run_client(args.url, args.code, args.username).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
