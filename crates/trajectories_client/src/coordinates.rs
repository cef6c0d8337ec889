use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};

/// A position as the upstream API sends it, longitude first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

/// A position in the axis order map renderers expect, latitude first.
/// Serialized as `[lat, lng]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Builds a position from a GeoJSON position. Anything after the first two
    /// numbers (altitude) is ignored.
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lon, lat, ..] => Some(Self::new(*lon, *lat)),
            _ => None,
        }
    }

    pub fn swap(self) -> LatLng {
        LatLng {
            lat: self.lat,
            lng: self.lon,
        }
    }
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn swap(self) -> LonLat {
        LonLat {
            lon: self.lng,
            lat: self.lat,
        }
    }
}

impl From<LonLat> for LatLng {
    fn from(value: LonLat) -> Self {
        value.swap()
    }
}

impl From<LatLng> for LonLat {
    fn from(value: LatLng) -> Self {
        value.swap()
    }
}

impl From<LatLng> for geo_types::Coord<f64> {
    fn from(value: LatLng) -> Self {
        geo_types::Coord {
            x: value.lng,
            y: value.lat,
        }
    }
}

impl From<&LatLng> for geo_types::Point {
    fn from(value: &LatLng) -> Self {
        geo_types::Point::new(value.lng, value.lat)
    }
}

impl Serialize for LatLng {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.lat, self.lng].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LatLng {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<f64>::deserialize(deserializer)?;
        match values.as_slice() {
            [lat, lng] => Ok(LatLng::new(*lat, *lng)),
            _ => Err(D::Error::custom(format!(
                "expected [lat, lng], got {} values",
                values.len()
            ))),
        }
    }
}

impl Serialize for LonLat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.lon, self.lat].serialize(serializer)
    }
}
