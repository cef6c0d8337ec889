use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use trajectories_client::trajectory_error::TrajectoryError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    BadGateway(String),
    GatewayTimeout(String),
    InternalServerError(String),
}

impl From<TrajectoryError> for ApiError {
    fn from(error: TrajectoryError) -> Self {
        match &error {
            TrajectoryError::InvalidQuery(_) => ApiError::BadRequest(error.to_string()),
            TrajectoryError::Fetch(fetch_error) if fetch_error.is_timeout() => {
                ApiError::GatewayTimeout(error.to_string())
            }
            TrajectoryError::Fetch(_) | TrajectoryError::MalformedResponse(_) => {
                ApiError::BadGateway(error.to_string())
            }
            // Handlers render this as an empty map before it can get here
            TrajectoryError::NoTrajectoryData { .. } => {
                ApiError::InternalServerError(error.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InternalServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::BadGateway(message) => (StatusCode::BAD_GATEWAY, message).into_response(),
            ApiError::GatewayTimeout(message) => {
                (StatusCode::GATEWAY_TIMEOUT, message).into_response()
            }
        }
    }
}
