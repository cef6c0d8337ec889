use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{coordinates::LonLat, polyline::Polyline, trajectory_error::TrajectoryError};

/// Body of `GET /v1/trajectories`
#[derive(Deserialize)]
struct TrajectoriesResponse {
    data: Vec<TrajectoryCollection>,
}

#[derive(Deserialize)]
struct TrajectoryCollection {
    features: Vec<TrajectoryFeature>,
}

#[derive(Deserialize)]
struct TrajectoryFeature {
    geometry: TrajectoryGeometry,

    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
struct TrajectoryGeometry {
    /// GeoJSON positions, longitude first
    coordinates: Vec<Vec<f64>>,
}

/// Turns a trajectories response body into polylines, one per feature of the
/// first collection in `data`. An empty `data` list or an empty feature list
/// yields no polylines.
pub fn trajectories_from_json(body: &str) -> Result<Vec<Polyline>, TrajectoryError> {
    let response: TrajectoriesResponse = serde_json::from_str(body)?;

    let Some(collection) = response.data.into_iter().next() else {
        return Ok(vec![]);
    };

    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| {
            if feature.geometry.coordinates.is_empty() {
                return Err(TrajectoryError::malformed(format!(
                    "feature {index} has no coordinates"
                )));
            }

            let coordinates = feature
                .geometry
                .coordinates
                .iter()
                .enumerate()
                .map(|(position_index, position)| {
                    LonLat::from_position(position).ok_or_else(|| {
                        TrajectoryError::malformed(format!(
                            "feature {index} position {position_index} has {} values, expected at least 2",
                            position.len()
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Polyline::from_lon_lat(coordinates).with_properties(feature.properties))
        })
        .collect()
}
