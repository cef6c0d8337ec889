use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use trajectories_client::{
    city::City,
    map_view::{MapState, MapStatus},
    trajectory_client::TrajectoryClient,
    trajectory_error::TrajectoryError,
    trajectory_query::TrajectoryQuery,
};

use crate::render::{MapFormat, render_map};

const PROMPT: &str = "<city name or location id> <YYYY-MM-DD>, or \"quit\"";

/// Splits `"<location> <date>"` on the last whitespace, location ids may
/// themselves contain spaces. A city name from `cities` is replaced by its id.
pub fn parse_request(line: &str, cities: &[City]) -> Result<TrajectoryQuery, TrajectoryError> {
    let line = line.trim();
    let Some((location, date)) = line.rsplit_once(char::is_whitespace) else {
        return Err(TrajectoryError::InvalidQuery(format!("expected {PROMPT}")));
    };

    let location = location.trim();
    let location_id = cities
        .iter()
        .find(|city| city.name.eq_ignore_ascii_case(location))
        .map(|city| city.id.as_str())
        .unwrap_or(location);

    TrajectoryQuery::new(location_id, date)
}

fn print_status(state: &MapState) -> anyhow::Result<()> {
    match state.status() {
        MapStatus::Ready => println!("{}", render_map(state.view(), MapFormat::Summary)?),
        MapStatus::NoData => println!(
            "No trajectories, map centered on {:.4}, {:.4}",
            state.view().center.lat,
            state.view().center.lng
        ),
        MapStatus::Error(message) => println!(
            "Error: {} (still showing {} trajectories)",
            message,
            state.view().polylines.len()
        ),
    }

    Ok(())
}

pub async fn run(client: &TrajectoryClient, mut state: MapState) -> anyhow::Result<()> {
    let cities = client.fetch_cities().await.unwrap_or_else(|err| {
        warn!("Could not load cities, only location ids are accepted: {}", err);
        vec![]
    });

    for city in &cities {
        println!("{} ({})", city.name, city.id);
    }

    let startup = TrajectoryQuery::startup_from_env()?;
    println!("Loading {}", startup);
    state.apply(client.fetch(&startup).await);
    print_status(&state)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("{PROMPT}");

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }

        let outcome = match parse_request(line, &cities) {
            Ok(query) => client.fetch(&query).await,
            Err(err) => Err(err),
        };

        state.apply(outcome);
        print_status(&state)?;
    }

    Ok(())
}
