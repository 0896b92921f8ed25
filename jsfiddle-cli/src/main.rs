//! JSFiddle CLI - fetch and publish fiddles from the command line

mod cli;
mod config;
mod error;
mod output;

use clap::Parser;
use cli::Args;
use config::{Action, Config};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    setup_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so stdout only carries fiddle content
fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), error::CliError> {
    let config = Config::from_args(args)?;
    debug!(base_url = %config.base_url, timeout = ?config.timeout, "resolved configuration");

    let client = config.client()?;

    match &config.action {
        Action::Get { id, pane } => {
            let fiddle = client.fetch(&id.clone().into())?;
            output::print(&output::render_fiddle(&fiddle, *pane)?)
        }
        Action::Save { payload, .. } => {
            let body = client.publish(payload)?;
            output::print(&body)
        }
    }
}
