use thiserror::Error;
use url::Url;

use crate::error::NetworkError;
use crate::restaurant::{aggregate_all, Restaurant};
use crate::{search, towns, util};

/// Service endpoint overrides. Anything left as `None` falls back to the
/// defaults in [`crate::constants`].
#[derive(Clone, Debug, Default)]
pub struct EndpointConfig {
    pub towns: Option<String>,
    pub restaurants: Option<String>,
}

#[derive(Debug, Error)]
pub enum EndpointConfigError {
    #[error("endpoint {0} is not a well-formed absolute URL: {1}")]
    InvalidUrl(String, url::ParseError),
}

impl EndpointConfig {
    pub fn validate(&self) -> Result<(), EndpointConfigError> {
        for (name, endpoint) in [("towns", &self.towns), ("restaurants", &self.restaurants)] {
            if let Some(endpoint) = endpoint {
                Url::parse(endpoint)
                    .map_err(|e| EndpointConfigError::InvalidUrl(name.to_string(), e))?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ClientInitError {
    #[error("invalid endpoint configuration: {0}")]
    InvalidEndpointConfig(#[from] EndpointConfigError),
}

/// Handle over the rating aggregation service: one HTTP client, the
/// validated endpoint overrides and the session town cache.
#[derive(Debug)]
pub struct Client {
    http_client: reqwest::Client,
    endpoints: EndpointConfig,
    towns: towns::TownCache,
}

impl Client {
    pub fn new(
        http_client: reqwest::Client,
        endpoints: EndpointConfig,
    ) -> Result<Self, ClientInitError> {
        endpoints.validate()?;
        Ok(Self {
            http_client,
            endpoints,
            towns: towns::TownCache::new(),
        })
    }

    /// A client over the default service endpoints, with gzip/brotli and a
    /// bounded request timeout.
    pub fn with_defaults() -> Self {
        Self {
            http_client: util::default_http_client(),
            endpoints: EndpointConfig::default(),
            towns: towns::TownCache::new(),
        }
    }

    /// The searchable town names, fetched once per session and cached.
    pub async fn get_towns(&self) -> Result<&[String], NetworkError> {
        self.towns
            .get_or_fetch(&self.http_client, self.endpoints.towns.as_deref())
            .await
    }

    /// Fetch and aggregate the restaurants of a town. Restaurants without a
    /// single valid provider section are dropped, not fatal.
    pub async fn get_restaurants(&self, town: &str) -> Result<Vec<Restaurant>, NetworkError> {
        let raws = search::fetch_town(
            &self.http_client,
            self.endpoints.restaurants.as_deref(),
            town,
        )
        .await?;
        Ok(aggregate_all(raws))
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    pub fn restaurants_endpoint(&self) -> Option<&str> {
        self.endpoints.restaurants.as_deref()
    }
}
