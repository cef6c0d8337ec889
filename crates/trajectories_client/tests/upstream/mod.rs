use std::{collections::HashMap, time::Duration};

use axum::{
    Router,
    extract::Query,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::net::TcpListener;
use trajectories_client::{
    trajectory_client::TrajectoryClient, trajectory_client_params::TrajectoryClientParams,
};

pub const BANGKOK_RESPONSE: &str = r#"{
    "data": [
        {
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "geometry": { "type": "LineString", "coordinates": [[100.5, 13.7], [100.6, 13.8]] } },
                { "type": "Feature", "geometry": { "type": "LineString", "coordinates": [[100.4, 13.6]] } }
            ]
        }
    ]
}"#;

pub const CITIES_RESPONSE: &str = r#"{
    "data": [
        { "name": "Delhi", "id": "delhi_ind.10_1_in" },
        { "name": "Bangkok", "id": "bangkok_tha.3_1_th" },
        { "name": "Jakarta", "id": "jakarta_idn.7_1_id" },
        { "name": "Kuala Lumpur", "id": "kuala lumpur_mys.14_1_my" }
    ]
}"#;

pub fn json_response(status: StatusCode, body: &'static str) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Upstream answering every trajectories request with `body`, and the cities
/// endpoint with [`CITIES_RESPONSE`].
pub fn fixed_upstream(status: StatusCode, body: &'static str) -> Router {
    Router::new()
        .route(
            "/v1/trajectories",
            get(move || async move { json_response(status, body) }),
        )
        .route(
            "/cities",
            get(|| async { json_response(StatusCode::OK, CITIES_RESPONSE) }),
        )
}

/// Upstream that only knows Bangkok on 2022-01-05 and answers 400 for any
/// other query string.
pub fn bangkok_upstream() -> Router {
    Router::new().route(
        "/v1/trajectories",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            let location = params.get("location_id").map(String::as_str);
            let date = params.get("date").map(String::as_str);

            match (location, date) {
                (Some("bangkok_tha.3_1_th"), Some("2022-01-05")) => {
                    json_response(StatusCode::OK, BANGKOK_RESPONSE)
                }
                _ => json_response(StatusCode::BAD_REQUEST, r#"{"error":"unknown query"}"#),
            }
        }),
    )
}

/// Upstream that answers only after `delay`.
pub fn slow_upstream(delay: Duration) -> Router {
    Router::new().route(
        "/v1/trajectories",
        get(move || async move {
            tokio::time::sleep(delay).await;
            json_response(StatusCode::OK, BANGKOK_RESPONSE)
        }),
    )
}

pub async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

/// An address nothing listens on.
pub async fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{addr}")
}

pub fn create_client(api_url: String) -> TrajectoryClient {
    TrajectoryClient::new(TrajectoryClientParams {
        api_url,
        timeout: Duration::from_secs(5),
        city_allow_list: Some(vec![
            String::from("Bangkok"),
            String::from("Kuala Lumpur"),
        ]),
    })
}
