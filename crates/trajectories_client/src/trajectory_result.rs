use geojson::{Feature, FeatureCollection, Geometry};
use serde::Serialize;

use crate::{
    coordinates::LatLng,
    polyline::{Bounds, Polyline, bounds},
};

/// Every trajectory of one query and the point the map should center on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryResult {
    polylines: Vec<Polyline>,
    center: LatLng,
}

impl TrajectoryResult {
    /// Returns `None` when there is no first point to center on.
    pub fn from_polylines(polylines: Vec<Polyline>) -> Option<Self> {
        let center = polylines.first()?.first()?;
        Some(Self { polylines, center })
    }

    pub fn polylines(&self) -> &[Polyline] {
        &self.polylines
    }

    pub fn into_polylines(self) -> Vec<Polyline> {
        self.polylines
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn bounds(&self) -> Option<Bounds> {
        bounds(&self.polylines)
    }

    /// GeoJSON LineStrings, in lon/lat order.
    pub fn to_geojson(&self) -> FeatureCollection {
        to_feature_collection(&self.polylines)
    }
}

pub fn to_feature_collection(polylines: &[Polyline]) -> FeatureCollection {
    let features = polylines
        .iter()
        .map(|polyline| {
            let line_string = geo_types::LineString::from(polyline);
            Feature {
                geometry: Some(Geometry::from(&line_string)),
                properties: polyline.properties.clone(),
                ..Default::default()
            }
        })
        .collect();

    FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    }
}
