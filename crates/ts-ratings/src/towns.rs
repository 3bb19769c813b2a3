use reqwest::Client;
use tokio::sync::OnceCell;

use crate::constants::DEFAULT_TOWNS_URL;
use crate::error::NetworkError;

/// Fetch the list of searchable town names.
pub async fn get(client: &Client, endpoint: Option<&str>) -> Result<Vec<String>, NetworkError> {
    let response = client
        .get(endpoint.unwrap_or(DEFAULT_TOWNS_URL))
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(NetworkError::ResponseError(response.status()));
    }
    let body = response
        .text()
        .await
        .map_err(NetworkError::ResponseBodyError)?;
    let towns: Vec<String> = serde_json::from_str(&body)?;
    Ok(towns)
}

/// Session-wide town cache: fetched lazily on first need, then read-only.
/// Concurrent callers before the first resolution share the single
/// in-flight request. A failed fetch leaves the cell empty, so the next
/// caller retries.
#[derive(Debug, Default)]
pub struct TownCache {
    towns: OnceCell<Vec<String>>,
}

impl TownCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_fetch(
        &self,
        client: &Client,
        endpoint: Option<&str>,
    ) -> Result<&[String], NetworkError> {
        let towns = self
            .towns
            .get_or_try_init(|| get(client, endpoint))
            .await?;
        Ok(towns)
    }
}
