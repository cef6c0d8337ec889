use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::trajectory_error::TrajectoryError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct City {
    pub name: String,
    pub id: String,
}

/// Entry of a city selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityOption {
    pub label: String,
    pub value: String,
}

impl From<City> for CityOption {
    fn from(city: City) -> Self {
        Self {
            label: city.name,
            value: city.id,
        }
    }
}

#[derive(Deserialize)]
struct CitiesResponse {
    data: Vec<CityEntry>,
}

#[derive(Deserialize)]
struct CityEntry {
    name: Option<String>,
    id: Option<String>,
}

/// Parses a `GET /cities` body, keeping only names in `allow_list` when one
/// is given. Upstream order is kept.
pub fn cities_from_json(
    body: &str,
    allow_list: Option<&[String]>,
) -> Result<Vec<City>, TrajectoryError> {
    let response: CitiesResponse = serde_json::from_str(body)?;
    let total = response.data.len();

    let cities: Vec<City> = response
        .data
        .into_iter()
        .filter_map(|entry| match (entry.name, entry.id) {
            (Some(name), Some(id)) => Some(City { name, id }),
            _ => None,
        })
        .filter(|city| allow_list.is_none_or(|names| names.contains(&city.name)))
        .collect();

    debug!("Cities: kept {}/{} entries", cities.len(), total);

    Ok(cities)
}
