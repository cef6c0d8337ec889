mod cities;
mod error;
mod map;
mod routes;
mod state;

use std::sync::Arc;

use anyhow::Context;
use axum::serve;
use tracing::{Level, info};
use trajectories_client::{
    map_view::MapState, trajectory_client::TrajectoryClient,
    trajectory_client_params::TrajectoryClientParams, trajectory_query::TrajectoryQuery,
};

use crate::map::load_initial_map;
use crate::routes::app;
use crate::state::AppState;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const ADDR_ENV_VAR: &str = "TRAJECTORIES_API_ADDR";
const DEFAULT_ADDR: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let params = TrajectoryClientParams::from_env()?;
    let startup = TrajectoryQuery::startup_from_env()?;
    let client = TrajectoryClient::new(params);
    let map_state = MapState::from_env()?;

    let initial_map = load_initial_map(&client, &startup, &map_state).await;

    let state = Arc::new(AppState {
        client,
        initial_map,
        map_state,
    });

    let addr = std::env::var(ADDR_ENV_VAR).unwrap_or_else(|_| String::from(DEFAULT_ADDR));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Could not bind {}", addr))?;

    info!("Listening on {}", addr);

    serve(listener, app(state)).await?;

    Ok(())
}
