use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use server::{DashboardConfig, ServerOpts, serve};

#[derive(Debug, Parser)]
#[command(name = "dashboard")]
struct Args {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the dashboard server with the specified configuration.
    Server {
        /// The port number on which the server will listen for incoming connections.
        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,

        /// The GitHub username whose contribution activity is served.
        #[arg(long, env = "GITHUB_USERNAME")]
        username: String,

        /// Path of the JSON file the contribution snapshot is cached in.
        #[arg(long, env = "CACHE_FILE", default_value = "github_contributions_cache.json")]
        cache_file: PathBuf,

        /// How long a cached snapshot stays fresh, in seconds.
        #[arg(long, env = "CACHE_TTL_SECONDS", default_value_t = 7200)]
        cache_ttl_seconds: u64,

        /// Optional GitHub personal access token, raises the API rate limit.
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        auth_token: Option<String>,

        /// Day of month (1-31) the billing cycle renews.
        #[arg(long, env = "PAY_DAY", default_value_t = 27, value_parser = clap::value_parser!(u8).range(1..=31))]
        pay_day: u8,

        /// Network interface whose throughput is reported.
        /// Example: `eth0`, `ens3`, `venet0`
        #[arg(long, env = "NETWORK_INTERFACE", default_value = "eth0")]
        network_interface: String,

        /// Core count the load average is normalized by.
        #[arg(long, env = "CORE_COUNT_DIVISOR", default_value_t = 2)]
        core_count_divisor: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), server::ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match Args::parse().cmd {
        Command::Server {
            port,
            username,
            cache_file,
            cache_ttl_seconds,
            auth_token,
            pay_day,
            network_interface,
            core_count_divisor,
        } => {
            let mut contributions = contrib::Config::new(username, cache_file);
            contributions.cache_ttl = Duration::from_secs(cache_ttl_seconds);
            contributions.auth_token = auth_token;

            serve(ServerOpts {
                port,
                config: DashboardConfig {
                    contributions,
                    status: hoststat::StatusConfig {
                        pay_day,
                        network_interface,
                        core_count_divisor,
                    },
                },
            })
            .await
        }
    }
}
