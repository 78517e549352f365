//! GWL CLI - Command line front end for the groundwater level dashboard.

use clap::Parser;
use gwl_core::fetcher::{FetchConfig, DEFAULT_BASE_URL, DEFAULT_HEALTH_PATH, DEFAULT_TIMEOUT};
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "gwl-cli",
    version,
    about = "Groundwater level monitoring dashboard toolkit"
)]
struct Cli {
    /// Base URL of the monitoring service
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Time bound for the probe and each data request, in seconds
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout_secs: u64,

    /// Skip the connectivity probe before each fetch cycle
    #[arg(long, global = true)]
    no_probe: bool,

    /// Probe path relative to the base URL
    #[arg(long, global = true, default_value = DEFAULT_HEALTH_PATH)]
    health_path: String,

    #[command(subcommand)]
    command: gwl_cmd::Command,
}

impl Cli {
    fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            probe: !self.no_probe,
            health_path: self.health_path.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.fetch_config();
    gwl_cmd::run(cli.command, config).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_from_flags() {
        let cli = Cli::try_parse_from([
            "gwl-cli",
            "--base-url",
            "http://10.0.0.5:5000/api",
            "--timeout-secs",
            "3",
            "--no-probe",
            "locations",
        ])
        .unwrap();
        let config = cli.fetch_config();
        assert_eq!(config.base_url, "http://10.0.0.5:5000/api");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(!config.probe);
        assert_eq!(config.health_path, DEFAULT_HEALTH_PATH);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["gwl-cli", "--timeout-secs", "0", "locations"]).is_err());
        let cli = Cli::try_parse_from(["gwl-cli", "locations"]).unwrap();
        assert_eq!(cli.fetch_config().timeout, DEFAULT_TIMEOUT);
    }
}
