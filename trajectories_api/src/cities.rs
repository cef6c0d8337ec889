use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use trajectories_client::city::CityOption;

use crate::{error::ApiError, state::AppState};

pub async fn get_cities(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CityOption>>, ApiError> {
    let cities = state.client.fetch_cities().await?;

    Ok(Json(cities.into_iter().map(CityOption::from).collect()))
}
