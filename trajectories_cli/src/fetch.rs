use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use clap::Args;
use indicatif::ProgressBar;
use tracing::info;
use trajectories_client::{
    map_view::{MapState, MapView},
    trajectory_client::TrajectoryClient,
    trajectory_error::TrajectoryError,
    trajectory_query::TrajectoryQuery,
    trajectory_result::TrajectoryResult,
};

use crate::{
    parsers,
    render::{MapFormat, render_map},
};

#[derive(Args)]
pub struct FetchArgs {
    /// Upstream location id, e.g. "bangkok_tha.3_1_th" (default: TRAJECTORIES_DEFAULT_LOCATION)
    #[arg(short, long)]
    location: Option<String>,

    /// Date as YYYY-MM-DD (default: TRAJECTORIES_DEFAULT_DATE)
    #[arg(short, long, value_parser = parsers::parse_date)]
    date: Option<jiff::civil::Date>,

    #[arg(short, long, value_enum, default_value_t = MapFormat::Summary)]
    format: MapFormat,

    /// Write the output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn resolve_query(
    location: Option<String>,
    date: Option<jiff::civil::Date>,
) -> anyhow::Result<TrajectoryQuery> {
    let query = match (location, date) {
        (Some(location), Some(date)) => TrajectoryQuery::from_date(&location, date)?,
        (location, date) => {
            let startup = TrajectoryQuery::startup_from_env()?;
            let location = location.unwrap_or_else(|| startup.location_id().to_string());
            TrajectoryQuery::from_date(&location, date.unwrap_or(startup.date()))?
        }
    };

    Ok(query)
}

/// The view to render for a single fetch. An empty result renders the empty
/// layer on the neutral center, any other failure is returned.
pub fn view_for_outcome(
    outcome: Result<TrajectoryResult, TrajectoryError>,
    mut state: MapState,
) -> anyhow::Result<MapView> {
    match outcome {
        Err(err) if !err.is_no_data() => Err(err.into()),
        outcome => {
            state.apply(outcome);
            Ok(state.view().clone())
        }
    }
}

fn write_output(rendered: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, rendered)?;
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Completes on Ctrl-C, never completes if the handler can't be installed.
async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

pub async fn run(
    client: &TrajectoryClient,
    args: FetchArgs,
    state: MapState,
) -> anyhow::Result<()> {
    let query = resolve_query(args.location, args.date)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Fetching trajectories for {}", query));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = client.fetch_cancellable(&query, ctrl_c()).await;
    spinner.finish_and_clear();

    let view = view_for_outcome(outcome, state)?;
    let rendered = render_map(&view, args.format)?;
    write_output(&rendered, args.output.as_deref())?;

    if let Some(path) = &args.output {
        info!("Wrote {} trajectories to {:?}", view.polylines.len(), path);
    }

    Ok(())
}
