use clap::Args;
use trajectories_client::trajectory_client::TrajectoryClient;

use crate::render::{CitiesFormat, render_cities};

#[derive(Args)]
pub struct CitiesArgs {
    /// List every city, ignoring TRAJECTORIES_CITIES
    #[arg(short, long)]
    all: bool,

    #[arg(short, long, value_enum, default_value_t = CitiesFormat::Table)]
    format: CitiesFormat,
}

pub async fn run(client: &TrajectoryClient, args: CitiesArgs) -> anyhow::Result<()> {
    let cities = if args.all {
        client.fetch_all_cities().await?
    } else {
        client.fetch_cities().await?
    };

    println!("{}", render_cities(cities, args.format)?);

    Ok(())
}
