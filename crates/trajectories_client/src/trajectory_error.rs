use jiff::civil::Date;
use thiserror::Error;

/// Transport or availability failures talking to the upstream API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Request cancelled")]
    Cancelled,
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Request(err) if err.is_timeout())
    }
}

#[derive(Debug, Error)]
pub enum TrajectoryError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    #[error("No trajectory data for {location_id} on {date}")]
    NoTrajectoryData { location_id: String, date: Date },
}

impl TrajectoryError {
    /// A valid "no results" outcome rather than a fault.
    pub fn is_no_data(&self) -> bool {
        matches!(self, TrajectoryError::NoTrajectoryData { .. })
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        TrajectoryError::MalformedResponse(message.into())
    }
}

impl From<serde_json::Error> for TrajectoryError {
    fn from(error: serde_json::Error) -> Self {
        TrajectoryError::MalformedResponse(error.to_string())
    }
}
