use geo::BoundingRect;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::coordinates::{LatLng, LonLat};

/// One trajectory path in renderer axis order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub positions: Vec<LatLng>,

    /// Upstream feature properties, passed through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<String, Value>>,
}

impl Polyline {
    pub fn new(positions: Vec<LatLng>) -> Self {
        Self {
            positions,
            properties: None,
        }
    }

    pub fn from_lon_lat<I>(coordinates: I) -> Self
    where
        I: IntoIterator<Item = LonLat>,
    {
        Self::new(coordinates.into_iter().map(LonLat::swap).collect())
    }

    pub fn with_properties(mut self, properties: Option<Map<String, Value>>) -> Self {
        self.properties = properties;
        self
    }

    pub fn first(&self) -> Option<LatLng> {
        self.positions.first().copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl From<&Polyline> for geo_types::LineString<f64> {
    fn from(polyline: &Polyline) -> Self {
        polyline
            .positions
            .iter()
            .map(|&position| geo_types::Coord::from(position))
            .collect()
    }
}

/// South-west and north-east corners enclosing every position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

pub fn bounds(polylines: &[Polyline]) -> Option<Bounds> {
    let lines: geo_types::MultiLineString<f64> = polylines
        .iter()
        .map(geo_types::LineString::from)
        .collect();

    lines.bounding_rect().map(|rect| Bounds {
        south_west: LatLng::new(rect.min().y, rect.min().x),
        north_east: LatLng::new(rect.max().y, rect.max().x),
    })
}
