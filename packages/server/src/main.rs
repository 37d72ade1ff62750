#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! `TickSight` UK web server.
//!
//! ```text
//! ticksight_server                 start with settings from the environment
//! ticksight_server --interactive   prompt for settings first
//! ```

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "ticksight_server",
    about = "Serve the TickSight UK tick sightings map"
)]
struct Cli {
    /// Prompt for bind address, port and API URL before starting
    #[arg(long, short)]
    interactive: bool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    if cli.interactive {
        ticksight_server::interactive::run().await
    } else {
        ticksight_server::run_server().await
    }
}
