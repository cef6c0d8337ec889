use geojson::FeatureCollection;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    coordinates::LatLng,
    polyline::{Bounds, Polyline},
    trajectory_client_params::ConfigError,
    trajectory_error::TrajectoryError,
    trajectory_result::{TrajectoryResult, to_feature_collection},
};

pub const DEFAULT_ZOOM: u8 = 6;
pub const MAX_ZOOM: u8 = 22;

const DEFAULT_CENTER_ENV_VAR: &str = "TRAJECTORIES_DEFAULT_CENTER";
const ZOOM_ENV_VAR: &str = "TRAJECTORIES_ZOOM";

/// Central Bangkok
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: 13.7563,
    lng: 100.5018,
};

/// What the map renderer draws: a trajectory layer and a viewport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub polylines: Vec<Polyline>,
    pub center: LatLng,
    pub zoom: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
}

impl MapView {
    pub fn from_result(result: TrajectoryResult, zoom: u8) -> Self {
        let center = result.center();
        let bounds = result.bounds();
        Self {
            polylines: result.into_polylines(),
            center,
            zoom,
            bounds,
        }
    }

    /// A map with no trajectory layer.
    pub fn empty(center: LatLng, zoom: u8) -> Self {
        Self {
            polylines: vec![],
            center,
            zoom,
            bounds: None,
        }
    }

    pub fn layer(&self) -> FeatureCollection {
        to_feature_collection(&self.polylines)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum MapStatus {
    Ready,
    NoData,
    Error(String),
}

/// The map currently shown, updated query after query. Fetch failures and
/// malformed responses keep the previous view on screen; an empty result
/// clears the layer and recenters on the default center.
#[derive(Debug, Clone)]
pub struct MapState {
    view: MapView,
    status: MapStatus,
    default_center: LatLng,
    zoom: u8,
}

impl Default for MapState {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER, DEFAULT_ZOOM)
    }
}

impl MapState {
    pub fn new(default_center: LatLng, zoom: u8) -> Self {
        Self {
            view: MapView::empty(default_center, zoom),
            status: MapStatus::NoData,
            default_center,
            zoom,
        }
    }

    /// Reads the neutral center (`"<lat>,<lng>"`) and zoom level, unset
    /// variables fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let center = match lookup(DEFAULT_CENTER_ENV_VAR) {
            Some(value) => parse_center(DEFAULT_CENTER_ENV_VAR, &value)?,
            None => DEFAULT_CENTER,
        };

        let zoom = match lookup(ZOOM_ENV_VAR) {
            Some(value) => match value.trim().parse::<u8>() {
                Ok(zoom) if zoom <= MAX_ZOOM => zoom,
                _ => {
                    return Err(ConfigError::InvalidZoom {
                        name: ZOOM_ENV_VAR,
                        value,
                    });
                }
            },
            None => DEFAULT_ZOOM,
        };

        Ok(Self::new(center, zoom))
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn status(&self) -> &MapStatus {
        &self.status
    }

    pub fn apply(&mut self, outcome: Result<TrajectoryResult, TrajectoryError>) -> &MapStatus {
        match outcome {
            Ok(result) => {
                info!("Map: showing {} trajectories", result.polylines().len());
                self.view = MapView::from_result(result, self.zoom);
                self.status = MapStatus::Ready;
            }
            Err(err) if err.is_no_data() => {
                info!("Map: {}", err);
                self.view = MapView::empty(self.default_center, self.zoom);
                self.status = MapStatus::NoData;
            }
            Err(err) => {
                warn!("Map: keeping previous view, {}", err);
                self.status = MapStatus::Error(err.to_string());
            }
        }

        &self.status
    }
}

fn parse_center(name: &'static str, value: &str) -> Result<LatLng, ConfigError> {
    let invalid = || ConfigError::InvalidCenter {
        name,
        value: value.to_string(),
    };

    let (lat, lng) = value.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;

    if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
        Ok(LatLng::new(lat, lng))
    } else {
        Err(invalid())
    }
}
