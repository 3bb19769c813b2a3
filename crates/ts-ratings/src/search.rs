use reqwest::Client;
use tracing::debug;

use crate::api_interfaces::restaurants::RawRestaurant;
use crate::constants::DEFAULT_RESTAURANTS_URL;
use crate::error::NetworkError;
use crate::restaurant::{aggregate_all, Restaurant};

/// Fetch the raw restaurant payloads for one town.
pub async fn fetch_town(
    client: &Client,
    endpoint: Option<&str>,
    town: &str,
) -> Result<Vec<RawRestaurant>, NetworkError> {
    let response = client
        .get(endpoint.unwrap_or(DEFAULT_RESTAURANTS_URL))
        .query(&[("town", town)])
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(NetworkError::ResponseError(response.status()));
    }
    let body = response
        .text()
        .await
        .map_err(NetworkError::ResponseBodyError)?;
    let raws: Vec<RawRestaurant> = serde_json::from_str(&body)?;
    Ok(raws)
}

/// Token identifying one submitted search. A resolution presenting a stale
/// token is discarded, so a slow response for an old town can never
/// overwrite a newer search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Generation(u64);

/// Where the search UI currently is.
#[derive(Debug)]
pub enum SearchState {
    Idle,
    Loading { town: String },
    Loaded(Vec<Restaurant>),
    Failed(NetworkError),
}

/// Drives the search box for the whole session: a submit moves to
/// `Loading`, the transport outcome moves to `Loaded` or `Failed`. Fetching
/// only ever happens on an explicit submit, never as a rendering side
/// effect. There is no terminal state.
#[derive(Debug, Default)]
pub struct SearchController {
    state: SearchState,
    generation: u64,
}

impl Default for SearchState {
    fn default() -> Self {
        SearchState::Idle
    }
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Submit a town query. Supersedes any in-flight search and returns the
    /// token its eventual resolution must present.
    pub fn begin(&mut self, town: &str) -> Generation {
        self.generation += 1;
        self.state = SearchState::Loading {
            town: town.to_string(),
        };
        Generation(self.generation)
    }

    /// Apply a transport outcome. Returns `false` (and leaves the state
    /// untouched) when the token does not belong to the latest submit.
    pub fn resolve(
        &mut self,
        generation: Generation,
        outcome: Result<Vec<RawRestaurant>, NetworkError>,
    ) -> bool {
        if generation.0 != self.generation {
            debug!(
                stale = generation.0,
                current = self.generation,
                "discarding superseded search response"
            );
            return false;
        }
        self.state = match outcome {
            Ok(raws) => SearchState::Loaded(aggregate_all(raws)),
            Err(error) => SearchState::Failed(error),
        };
        true
    }

    /// Submit a query and drive it to completion against the service.
    pub async fn run(
        &mut self,
        client: &Client,
        endpoint: Option<&str>,
        town: &str,
    ) -> &SearchState {
        let generation = self.begin(town);
        let outcome = fetch_town(client, endpoint, town).await;
        self.resolve(generation, outcome);
        self.state()
    }
}
