//! Command implementations for GWL CLI.
//!
//! Provides subcommands for listing monitored locations, loading one
//! location's dashboard state, and following selections interactively.

use clap::Subcommand;
use gwl_core::fetcher::FetchConfig;

pub mod locations;
pub mod render;
pub mod show;
pub mod watch;

#[derive(Subcommand)]
pub enum Command {
    /// List the monitored locations
    Locations,

    /// Fetch and print the dashboard state for one location
    Show {
        /// Location id (e.g. "jaipur") or service source name
        location: String,

        /// Print the state and chart payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read location ids from stdin and print every state change
    Watch {
        /// Location loaded before the first selection (defaults to the first listed)
        initial: Option<String>,
    },
}

pub async fn run(command: Command, config: FetchConfig) -> anyhow::Result<()> {
    match command {
        Command::Locations => {
            locations::run_locations();
            Ok(())
        }
        Command::Show { location, json } => show::run_show(config, &location, json).await,
        Command::Watch { initial } => watch::run_watch(config, initial.as_deref()).await,
    }
}
