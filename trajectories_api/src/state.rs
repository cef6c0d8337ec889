use trajectories_client::{map_view::MapState, trajectory_client::TrajectoryClient};

use crate::map::MapResponse;

pub struct AppState {
    pub client: TrajectoryClient,

    /// Map computed once at startup for the default query
    pub initial_map: MapResponse,

    /// Neutral center and zoom from the environment, cloned for each request
    pub map_state: MapState,
}
