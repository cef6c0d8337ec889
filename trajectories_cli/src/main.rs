use clap::{CommandFactory, Parser, Subcommand};

use mimalloc::MiMalloc;
use trajectories_client::{
    map_view::MapState, trajectory_client::TrajectoryClient,
    trajectory_client_params::TrajectoryClientParams,
};

use crate::{cities::CitiesArgs, fetch::FetchArgs};

mod cities;
mod fetch;
mod interactive;
mod parsers;
mod render;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log at DEBUG level
    #[arg(long, global = true)]
    debug: bool,

    /// Base URL of the trajectories API (default: TRAJECTORIES_API_URL)
    #[arg(long, global = true, value_parser = parsers::parse_api_url)]
    api_url: Option<String>,

    /// Request timeout, e.g. "10s" or "PT30S" (default: TRAJECTORIES_TIMEOUT_SECS)
    #[arg(long, global = true, value_parser = parsers::parse_timeout)]
    timeout: Option<std::time::Duration>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the trajectories of one location on one day
    #[command(visible_alias = "f")]
    Fetch {
        #[command(flatten)]
        args: FetchArgs,
    },
    /// List the cities available for selection
    Cities {
        #[command(flatten)]
        args: CitiesArgs,
    },
    /// Query trajectories line by line from stdin
    #[command(visible_alias = "i")]
    Interactive,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let mut params = TrajectoryClientParams::from_env()?;
    if let Some(api_url) = cli.api_url {
        params.api_url = api_url;
    }
    if let Some(timeout) = cli.timeout {
        params.timeout = timeout;
    }

    let client = TrajectoryClient::new(params);
    let map_state = MapState::from_env()?;

    match cli.command {
        Some(Commands::Fetch { args }) => fetch::run(&client, args, map_state).await?,
        Some(Commands::Cities { args }) => cities::run(&client, args).await?,
        Some(Commands::Interactive) => interactive::run(&client, map_state).await?,
        None => Cli::command().print_help()?,
    }

    Ok(())
}
