use jiff::SpanRelativeTo;
use trajectories_client::{trajectory_client_params, trajectory_query};

pub fn parse_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    if let Some(seconds) = input
        .parse::<u64>()
        .ok()
        .and_then(|seconds| i64::try_from(seconds).ok())
    {
        return Ok(jiff::SignedDuration::from_secs(seconds));
    }

    Err(String::from("Invalid duration"))
}

/// Request timeout, e.g. "10s", "500ms" or a number of seconds
pub fn parse_timeout(input: &str) -> Result<std::time::Duration, String> {
    let duration = parse_duration(input)?;
    if duration.is_zero() || duration.is_negative() {
        return Err(String::from("Timeout must be positive"));
    }

    std::time::Duration::try_from(duration).map_err(|err| err.to_string())
}

pub fn parse_api_url(input: &str) -> Result<String, String> {
    trajectory_client_params::parse_api_url("--api-url", input).map_err(|err| err.to_string())
}

pub fn parse_date(input: &str) -> Result<jiff::civil::Date, String> {
    trajectory_query::parse_date(input).map_err(|err| err.to_string())
}
