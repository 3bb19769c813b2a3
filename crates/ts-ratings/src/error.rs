use thiserror::Error;

use crate::site_info::RatingSite;

/// A transport-level failure. The whole request is lost and the UI shows an
/// error state, distinct from an empty result.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("the request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("the request failed with status code: {0}")]
    ResponseError(reqwest::StatusCode),
    #[error("the response body could not be read: {0}")]
    ResponseBodyError(#[source] reqwest::Error),
    #[error("unable to parse the response body: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// A single provider section failed validation. Only that provider's data
/// point is dropped; the rest of the restaurant still aggregates.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{site} section does not match the wire schema: {source}")]
    MalformedSection {
        site: RatingSite,
        source: serde_json::Error,
    },
    #[error("{site} link is not a well-formed absolute URL: {source}")]
    InvalidLink {
        site: RatingSite,
        source: url::ParseError,
    },
    #[error("{site} rating {rating} is outside the native 0-{scale} range")]
    RatingOutOfRange {
        site: RatingSite,
        rating: f64,
        scale: f64,
    },
}

/// A single encoded image payload is malformed. Sibling images still
/// materialize.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid base64 image payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// A whole restaurant payload could not be aggregated. The restaurant is
/// dropped from the result set; the search itself still succeeds.
#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("unsupported wire schema version {0}")]
    UnsupportedSchemaVersion(u32),
    #[error("no provider data validated for restaurant `{0}`")]
    NoValidSites(String),
}
