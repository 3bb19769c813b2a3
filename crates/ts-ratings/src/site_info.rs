use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::api_interfaces::restaurants::RawProviderInfo;
use crate::error::SchemaError;

/// The unified 0-10 scale every stored rating is expressed on.
pub const CANONICAL_SCALE: f64 = 10.0;

/// The rating providers, in declaration order. The order is load-bearing:
/// review tie-breaks, the aggregate score and photo concatenation all follow
/// it. A new provider adds a variant here plus a branch in
/// [`RatingSite::native_scale`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingSite {
    TripAdvisor,
    GoogleMaps,
}

impl RatingSite {
    /// Every provider, in declaration order.
    pub const ALL: [RatingSite; 2] = [RatingSite::TripAdvisor, RatingSite::GoogleMaps];

    /// The scale the provider reports its ratings on.
    pub fn native_scale(&self) -> f64 {
        match self {
            RatingSite::TripAdvisor => 10.0,
            RatingSite::GoogleMaps => 5.0,
        }
    }
}

impl fmt::Display for RatingSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingSite::TripAdvisor => write!(f, "Trip Advisor"),
            RatingSite::GoogleMaps => write!(f, "Google Maps"),
        }
    }
}

/// One provider's rating record for a restaurant, on the canonical scale.
#[derive(Clone, Debug, Serialize)]
pub struct SiteInfo {
    pub name: String,
    pub link: Url,
    pub number_of_reviews: u64,
    pub rating: f64,
    pub site: RatingSite,
}

impl SiteInfo {
    /// Validate a raw provider section and convert its rating onto the
    /// canonical scale. A failure here means "skip this provider for this
    /// restaurant", never "abort the aggregation".
    pub fn from_raw(site: RatingSite, raw: &RawProviderInfo) -> Result<Self, SchemaError> {
        let link =
            Url::parse(&raw.link).map_err(|source| SchemaError::InvalidLink { site, source })?;
        let scale = site.native_scale();
        if !(0.0..=scale).contains(&raw.rating) {
            return Err(SchemaError::RatingOutOfRange {
                site,
                rating: raw.rating,
                scale,
            });
        }
        Ok(Self {
            name: raw.name.clone(),
            link,
            number_of_reviews: raw.number_of_reviews,
            rating: raw.rating * (CANONICAL_SCALE / scale),
            site,
        })
    }
}
