use clap::ValueEnum;
use comfy_table::Table;
use trajectories_client::{
    city::{City, CityOption},
    coordinates::LatLng,
    map_view::MapView,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum MapFormat {
    /// One row per trajectory
    Summary,
    /// The map view (polylines in lat/lon, center, zoom)
    Json,
    /// A FeatureCollection of LineStrings in lon/lat
    Geojson,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CitiesFormat {
    Table,
    Json,
}

fn format_lat_lng(position: LatLng) -> String {
    format!("{:.4}, {:.4}", position.lat, position.lng)
}

pub fn summary_table(view: &MapView) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Points", "Start (lat, lng)", "End (lat, lng)"]);

    for (index, polyline) in view.polylines.iter().enumerate() {
        let start = polyline.positions.first().copied().map(format_lat_lng);
        let end = polyline.positions.last().copied().map(format_lat_lng);

        table.add_row(vec![
            index.to_string(),
            polyline.len().to_string(),
            start.unwrap_or_default(),
            end.unwrap_or_default(),
        ]);
    }

    table
}

pub fn render_map(view: &MapView, format: MapFormat) -> Result<String, anyhow::Error> {
    Ok(match format {
        MapFormat::Summary => format!(
            "{}\ncenter: {} zoom: {}",
            summary_table(view),
            format_lat_lng(view.center),
            view.zoom
        ),
        MapFormat::Json => serde_json::to_string_pretty(view)?,
        MapFormat::Geojson => geojson::GeoJson::FeatureCollection(view.layer()).to_string(),
    })
}

pub fn render_cities(cities: Vec<City>, format: CitiesFormat) -> Result<String, anyhow::Error> {
    Ok(match format {
        CitiesFormat::Table => {
            let mut table = Table::new();
            table.set_header(vec!["Name", "Id"]);
            for city in cities {
                table.add_row(vec![city.name, city.id]);
            }
            table.to_string()
        }
        CitiesFormat::Json => {
            let options: Vec<CityOption> = cities.into_iter().map(CityOption::from).collect();
            serde_json::to_string_pretty(&options)?
        }
    })
}
