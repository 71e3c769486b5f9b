use clap::Parser;

use bookedge::cli::{self, Cli};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = cli::dispatch(cli).await {
        bookedge::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
