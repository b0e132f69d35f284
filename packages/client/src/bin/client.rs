//! Hiroba terminal chat client.
//!
//! Connects to a Hiroba relay, sends typed lines and prints relayed ones.
//! Without `--name`, the first line typed is sent as the display name.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client -- 127.0.0.1 9000
//! cargo run --bin hiroba-client -- 127.0.0.1 9000 --name alice
//! ```

use clap::Parser;
use hiroba_shared::{
    cli::{Endpoint, parse_args_or_exit},
    logger::setup_logger,
};

#[derive(Parser, Debug)]
#[command(name = "hiroba-client", version)]
#[command(about = "Terminal client for the Hiroba chat relay", long_about = None)]
struct Args {
    #[command(flatten)]
    endpoint: Endpoint,

    /// Display name to join with (asked for interactively when omitted)
    #[arg(short = 'n', long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args: Args = parse_args_or_exit();

    if let Err(e) = hiroba_client::run_client(args.endpoint.socket_addr(), args.name).await {
        tracing::error!("Client error: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
