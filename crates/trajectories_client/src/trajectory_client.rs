use std::{future::Future, time::Duration};

use tracing::{debug, warn};

use crate::{
    city::{City, cities_from_json},
    trajectories_response::trajectories_from_json,
    trajectory_client_params::TrajectoryClientParams,
    trajectory_error::{FetchError, TrajectoryError},
    trajectory_query::TrajectoryQuery,
    trajectory_result::TrajectoryResult,
};

pub const TRAJECTORIES_API_PATH: &str = "/v1/trajectories";
pub const CITIES_API_PATH: &str = "/cities";

/// Client for the trajectories and cities endpoints. Holds no state besides
/// its params and the connection pool, clones share the pool.
#[derive(Clone)]
pub struct TrajectoryClient {
    params: TrajectoryClientParams,
    client: reqwest::Client,
}

impl Default for TrajectoryClient {
    fn default() -> Self {
        Self::new(TrajectoryClientParams::default())
    }
}

impl TrajectoryClient {
    pub fn new(params: TrajectoryClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    pub fn params(&self) -> &TrajectoryClientParams {
        &self.params
    }

    pub async fn fetch(&self, query: &TrajectoryQuery) -> Result<TrajectoryResult, TrajectoryError> {
        self.fetch_with_timeout(query, self.params.timeout).await
    }

    pub async fn fetch_with_timeout(
        &self,
        query: &TrajectoryQuery,
        timeout: Duration,
    ) -> Result<TrajectoryResult, TrajectoryError> {
        debug!("Trajectories: fetching {}", query);

        let response = self
            .client
            .get(self.params.endpoint(TRAJECTORIES_API_PATH))
            .query(&query.query_pairs())
            .timeout(timeout)
            .send()
            .await
            .map_err(FetchError::from)?;

        let body = self.handle_response(response).await?;
        let polylines = trajectories_from_json(&body)?;

        debug!(
            "Trajectories: received {} trajectories for {}",
            polylines.len(),
            query
        );

        TrajectoryResult::from_polylines(polylines).ok_or_else(|| {
            TrajectoryError::NoTrajectoryData {
                location_id: query.location_id().to_string(),
                date: query.date(),
            }
        })
    }

    /// Same as [`TrajectoryClient::fetch`], but gives up as soon as `cancel`
    /// completes. The in-flight request is dropped.
    pub async fn fetch_cancellable<C>(
        &self,
        query: &TrajectoryQuery,
        cancel: C,
    ) -> Result<TrajectoryResult, TrajectoryError>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            result = self.fetch(query) => result,
            _ = cancel => {
                warn!("Trajectories: request for {} cancelled", query);
                Err(FetchError::Cancelled.into())
            }
        }
    }

    /// Cities restricted to the configured allow-list.
    pub async fn fetch_cities(&self) -> Result<Vec<City>, TrajectoryError> {
        let body = self.get_cities_body().await?;
        cities_from_json(&body, self.params.city_allow_list.as_deref())
    }

    pub async fn fetch_all_cities(&self) -> Result<Vec<City>, TrajectoryError> {
        let body = self.get_cities_body().await?;
        cities_from_json(&body, None)
    }

    async fn get_cities_body(&self) -> Result<String, TrajectoryError> {
        let response = self
            .client
            .get(self.params.endpoint(CITIES_API_PATH))
            .timeout(self.params.timeout)
            .send()
            .await
            .map_err(FetchError::from)?;

        Ok(self.handle_response(response).await?)
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<String, FetchError> {
        if response.status().is_success() {
            Ok(response.text().await?)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(FetchError::Api { status, message })
        }
    }
}
