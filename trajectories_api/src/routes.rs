use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    cities::get_cities,
    map::{get_initial_map, get_trajectories_map},
    state::AppState,
};

pub fn app(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/cities", get(get_cities))
        .route("/map", get(get_initial_map))
        .route("/map/trajectories", get(get_trajectories_map))
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
        response::IntoResponse,
    };
    use serde_json::{Value, json};
    use tokio::net::TcpListener;
    use tower::ServiceExt;
    use trajectories_client::{
        map_view::MapState, trajectory_client::TrajectoryClient,
        trajectory_client_params::TrajectoryClientParams, trajectory_query::TrajectoryQuery,
    };

    use crate::map::load_initial_map;

    use super::*;

    const BANGKOK_RESPONSE: &str = r#"{ "data": [ { "features": [
        { "geometry": { "coordinates": [[100.5, 13.7], [100.6, 13.8]] } },
        { "geometry": { "coordinates": [[100.4, 13.6]] } }
    ] } ] }"#;

    fn json(status: StatusCode, body: &'static str) -> axum::response::Response {
        (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
    }

    /// Upstream keyed on the requested date
    async fn spawn_upstream() -> String {
        let router = Router::new()
            .route(
                "/v1/trajectories",
                get(
                    |axum::extract::Query(params): axum::extract::Query<
                        std::collections::HashMap<String, String>,
                    >| async move {
                        match params.get("date").map(String::as_str) {
                            Some("2022-01-05") => json(StatusCode::OK, BANGKOK_RESPONSE),
                            Some("2022-01-06") => {
                                json(StatusCode::OK, r#"{ "data": [ { "features": [] } ] }"#)
                            }
                            Some("2022-01-07") => json(StatusCode::OK, r#"{ "result": [] }"#),
                            _ => json(StatusCode::SERVICE_UNAVAILABLE, r#"{"error":"down"}"#),
                        }
                    },
                ),
            )
            .route(
                "/cities",
                get(|| async {
                    json(
                        StatusCode::OK,
                        r#"{ "data": [
                            { "name": "Delhi", "id": "delhi_ind.10_1_in" },
                            { "name": "Bangkok", "id": "bangkok_tha.3_1_th" }
                        ] }"#,
                    )
                }),
            );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        format!("http://{addr}")
    }

    async fn test_app(startup_date: &str) -> Router {
        test_app_with_state(startup_date, MapState::default()).await
    }

    async fn test_app_with_state(startup_date: &str, map_state: MapState) -> Router {
        let client = TrajectoryClient::new(TrajectoryClientParams {
            api_url: spawn_upstream().await,
            timeout: Duration::from_secs(5),
            city_allow_list: Some(vec![String::from("Bangkok")]),
        });
        let startup = TrajectoryQuery::new("bangkok_tha.3_1_th", startup_date).unwrap();
        let initial_map = load_initial_map(&client, &startup, &map_state).await;

        app(Arc::new(AppState {
            client,
            initial_map,
            map_state,
        }))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, value)
    }

    #[tokio::test]
    async fn test_initial_map() {
        let (status, body) = get_json(test_app("2022-01-05").await, "/map").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["view"]["center"], json!([13.7, 100.5]));
        assert_eq!(body["view"]["zoom"], 6);
        assert_eq!(
            body["view"]["polylines"][0]["positions"],
            json!([[13.7, 100.5], [13.8, 100.6]])
        );
        assert_eq!(
            body["layer"]["features"][1]["geometry"]["coordinates"],
            json!([[100.4, 13.6]])
        );
    }

    #[tokio::test]
    async fn test_initial_map_survives_upstream_failure() {
        let (status, body) = get_json(test_app("2022-01-08").await, "/map").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "error");
        assert!(body["message"].as_str().unwrap().contains("503"));
        assert_eq!(body["view"]["polylines"], json!([]));
        assert_eq!(body["view"]["center"], json!([13.7563, 100.5018]));
    }

    #[tokio::test]
    async fn test_configured_center() {
        let map_state = MapState::from_lookup(|name| match name {
            "TRAJECTORIES_DEFAULT_CENTER" => Some(String::from("3.139,101.6869")),
            "TRAJECTORIES_ZOOM" => Some(String::from("9")),
            _ => None,
        })
        .unwrap();
        let app = test_app_with_state("2022-01-08", map_state).await;

        let (_, body) = get_json(app.clone(), "/map").await;
        assert_eq!(body["view"]["center"], json!([3.139, 101.6869]));
        assert_eq!(body["view"]["zoom"], 9);

        let (status, body) = get_json(
            app,
            "/map/trajectories?location_id=bangkok_tha.3_1_th&date=2022-01-06",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "no_data");
        assert!(body.get("message").is_none());
        assert_eq!(body["view"]["center"], json!([3.139, 101.6869]));
    }

    #[tokio::test]
    async fn test_trajectories_map() {
        let (status, body) = get_json(
            test_app("2022-01-05").await,
            "/map/trajectories?location_id=bangkok_tha.3_1_th&date=2022-01-05",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["view"]["polylines"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_no_data_is_empty_map() {
        let (status, body) = get_json(
            test_app("2022-01-05").await,
            "/map/trajectories?location_id=bangkok_tha.3_1_th&date=2022-01-06",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "no_data");
        assert_eq!(body["view"]["polylines"], json!([]));
        assert_eq!(body["view"]["center"], json!([13.7563, 100.5018]));
        assert_eq!(body["layer"]["features"], json!([]));
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let app = test_app("2022-01-05").await;

        let (status, _) = get_json(
            app.clone(),
            "/map/trajectories?location_id=bangkok_tha.3_1_th&date=05-01-2022",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_json(app.clone(), "/map/trajectories?date=2022-01-05").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_json(
            app.clone(),
            "/map/trajectories?location_id=bangkok_tha.3_1_th&date=2022-01-07",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, _) = get_json(
            app,
            "/map/trajectories?location_id=bangkok_tha.3_1_th&date=2022-01-09",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_cities() {
        let (status, body) = get_json(test_app("2022-01-05").await, "/cities").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{ "label": "Bangkok", "value": "bangkok_tha.3_1_th" }])
        );
    }
}
