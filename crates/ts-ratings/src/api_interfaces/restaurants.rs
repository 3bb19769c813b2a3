use serde::Deserialize;
use serde_json::Value;

/// Raw restaurant payload from the aggregation service (wire schema 2).
/// Either provider section may be missing. Sections stay untyped at this
/// boundary: a malformed section must degrade that one provider during
/// aggregation, never fail the payload list it arrived in.
#[derive(Clone, Debug, Deserialize)]
pub struct RawRestaurant {
    pub schema_version: u32,
    #[serde(default)]
    pub google_maps_info: Option<Value>,
    #[serde(default)]
    pub trip_advisor_info: Option<Value>,
}

/// Raw rating data common to every provider section. Ratings are still on
/// the provider's native scale here.
#[derive(Clone, Debug, Deserialize)]
pub struct RawProviderInfo {
    pub name: String,
    pub link: String,
    pub rating: f64,
    pub number_of_reviews: u64,
    #[serde(default)]
    pub reviews: Vec<String>,
}

/// The maps provider section. On top of the common rating data it carries
/// the photo set (base64 JPEG payloads), the formatted address and the
/// coordinates.
#[derive(Clone, Debug, Deserialize)]
pub struct RawGoogleMapsInfo {
    #[serde(flatten)]
    pub info: RawProviderInfo,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub formatted_address: String,
    pub location_lat: f64,
    pub location_lng: f64,
}
