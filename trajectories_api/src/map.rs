use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use geojson::GeoJson;
use serde::{Deserialize, Serialize};
use tracing::info;
use trajectories_client::{
    map_view::{MapState, MapStatus, MapView},
    trajectory_client::TrajectoryClient,
    trajectory_query::TrajectoryQuery,
};

use crate::{error::ApiError, state::AppState};

#[derive(Serialize, Clone)]
pub struct MapResponse {
    #[serde(flatten)]
    status: MapStatus,

    view: MapView,

    /// Same polylines as `view`, as GeoJSON in lon/lat order
    layer: GeoJson,
}

impl MapResponse {
    pub fn from_state(state: &MapState) -> Self {
        Self {
            status: state.status().clone(),
            view: state.view().clone(),
            layer: GeoJson::FeatureCollection(state.view().layer()),
        }
    }
}

impl IntoResponse for MapResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Fetches the map shown on first load. A failure leaves the empty default
/// map with an error status instead of aborting startup.
pub async fn load_initial_map(
    client: &TrajectoryClient,
    query: &TrajectoryQuery,
    map_state: &MapState,
) -> MapResponse {
    info!("Loading initial map for {}", query);

    let mut map_state = map_state.clone();
    map_state.apply(client.fetch(query).await);

    MapResponse::from_state(&map_state)
}

pub async fn get_initial_map(State(state): State<Arc<AppState>>) -> MapResponse {
    state.initial_map.clone()
}

#[derive(Deserialize)]
pub struct TrajectoriesParams {
    location_id: String,
    date: String,
}

pub async fn get_trajectories_map(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrajectoriesParams>,
) -> Result<MapResponse, ApiError> {
    let query = TrajectoryQuery::new(&params.location_id, &params.date)?;

    // Anything but an empty result is an error response, so the client keeps
    // the map it already shows.
    let outcome = match state.client.fetch(&query).await {
        Err(err) if !err.is_no_data() => return Err(err.into()),
        outcome => outcome,
    };

    let mut map_state = state.map_state.clone();
    map_state.apply(outcome);

    Ok(MapResponse::from_state(&map_state))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use trajectories_client::trajectory_error::{FetchError, TrajectoryError};

    use super::*;

    #[test]
    fn test_status_fields() {
        let mut state = MapState::default();
        let body = serde_json::to_value(MapResponse::from_state(&state)).unwrap();
        assert_eq!(body["status"], "no_data");
        assert!(body.get("message").is_none());

        state.apply(Err(TrajectoryError::Fetch(FetchError::Api {
            status: 503,
            message: String::from("down"),
        })));
        let body = serde_json::to_value(MapResponse::from_state(&state)).unwrap();
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], json!("API error: 503 - down"));
        assert_eq!(body["layer"]["features"], json!([]));
    }
}
