/// The default endpoint for the supported towns listing.
pub const DEFAULT_TOWNS_URL: &str = "http://localhost:5000/all_supported_towns";

/// The default endpoint for restaurant data. The town goes in the `town`
/// query parameter.
pub const DEFAULT_RESTAURANTS_URL: &str = "http://localhost:5000/restaurants";

/// The wire schema version this crate understands: the sectioned
/// `google_maps_info` / `trip_advisor_info` shape. The older flat
/// `all_sites` shape is rejected, not silently supported.
pub const SUPPORTED_SCHEMA_VERSION: u32 = 2;

/// Declared MIME type of photo payloads on the wire.
pub const PHOTO_MIME_TYPE: &str = "image/jpeg";
