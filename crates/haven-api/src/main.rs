//! Haven API standalone binary.

use clap::Parser;
use haven_api::{ApiArgs, cli};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = ApiArgs::parse();
    cli::run(args).await
}
