use std::fmt::Display;

use jiff::civil::Date;

use crate::trajectory_error::TrajectoryError;

pub const DEFAULT_LOCATION_ID: &str = "bangkok_tha.3_1_th";
pub const DEFAULT_DATE: &str = "2022-01-05";

const DEFAULT_LOCATION_ENV_VAR: &str = "TRAJECTORIES_DEFAULT_LOCATION";
const DEFAULT_DATE_ENV_VAR: &str = "TRAJECTORIES_DEFAULT_DATE";

/// A validated request for the trajectories of one location on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrajectoryQuery {
    location_id: String,
    date: Date,
}

impl TrajectoryQuery {
    /// `date` must be a calendar date written as `YYYY-MM-DD`.
    pub fn new(location_id: &str, date: &str) -> Result<Self, TrajectoryError> {
        Self::from_date(location_id, parse_date(date)?)
    }

    pub fn from_date(location_id: &str, date: Date) -> Result<Self, TrajectoryError> {
        let location_id = location_id.trim();
        if location_id.is_empty() {
            return Err(TrajectoryError::InvalidQuery(String::from(
                "location id must not be empty",
            )));
        }

        Ok(Self {
            location_id: location_id.to_string(),
            date,
        })
    }

    /// The query shown when the map first loads.
    pub fn startup_from_env() -> Result<Self, TrajectoryError> {
        Self::startup_from_lookup(|name| std::env::var(name).ok())
    }

    pub fn startup_from_lookup<F>(lookup: F) -> Result<Self, TrajectoryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let location_id =
            lookup(DEFAULT_LOCATION_ENV_VAR).unwrap_or_else(|| String::from(DEFAULT_LOCATION_ID));
        let date = lookup(DEFAULT_DATE_ENV_VAR).unwrap_or_else(|| String::from(DEFAULT_DATE));

        Self::new(&location_id, &date)
    }

    pub fn location_id(&self) -> &str {
        &self.location_id
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub(crate) fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("location_id", self.location_id.clone()),
            ("date", format_date(self.date)),
        ]
    }
}

impl Display for TrajectoryQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} on {}", self.location_id, format_date(self.date))
    }
}

/// Parses a strict `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<Date, TrajectoryError> {
    let input = input.trim();
    let well_formed = input.len() == 10
        && input.char_indices().all(|(i, c)| match i {
            4 | 7 => c == '-',
            _ => c.is_ascii_digit(),
        });

    if !well_formed {
        return Err(TrajectoryError::InvalidQuery(format!(
            "expected a YYYY-MM-DD date, got {input:?}"
        )));
    }

    input
        .parse::<Date>()
        .map_err(|err| TrajectoryError::InvalidQuery(format!("invalid date {input:?}: {err}")))
}

pub(crate) fn format_date(date: Date) -> String {
    date.strftime("%Y-%m-%d").to_string()
}
