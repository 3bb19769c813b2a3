use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::api_interfaces::restaurants::{RawGoogleMapsInfo, RawProviderInfo, RawRestaurant};
use crate::constants::SUPPORTED_SCHEMA_VERSION;
use crate::error::{AggregationError, SchemaError};
use crate::images::EncodedImage;
use crate::site_info::{RatingSite, SiteInfo};

/// Coordinates as reported by the maps provider.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// One restaurant with the ratings of every provider that validated merged
/// into a single record. Built fresh for every search result; never patched
/// incrementally.
#[derive(Clone, Debug, Serialize)]
pub struct Restaurant {
    pub name: String,
    /// The review shown in the collapsed card: the longest review across
    /// providers, ties won by the earlier provider. Empty when no provider
    /// supplied any review text.
    pub review: String,
    /// Aggregate score on the canonical 0-10 scale: the canonical rating of
    /// the first provider present.
    pub score: f64,
    /// Per-provider records, in provider declaration order. Never empty.
    pub sites: Vec<SiteInfo>,
    /// Photo payloads in provider declaration order. Decoding happens
    /// lazily, card by card.
    pub photos: Vec<EncodedImage>,
    pub formatted_address: String,
    /// `None` when the maps section was missing or invalid; coordinates
    /// travel only in the maps section.
    pub location: Option<Location>,
}

/// Typed parse of one provider section. A section that does not match the
/// wire schema is a `SchemaError` scoped to that provider, nothing wider.
fn parse_section<T: DeserializeOwned>(site: RatingSite, value: &Value) -> Result<T, SchemaError> {
    serde_json::from_value(value.clone())
        .map_err(|source| SchemaError::MalformedSection { site, source })
}

fn section_name(value: &Value) -> Option<&str> {
    value.get("name").and_then(Value::as_str)
}

impl TryFrom<RawRestaurant> for Restaurant {
    type Error = AggregationError;

    /// Aggregate one raw payload. Pure apart from logging: no network,
    /// deterministic for identical input.
    fn try_from(raw: RawRestaurant) -> Result<Self, AggregationError> {
        if raw.schema_version != SUPPORTED_SCHEMA_VERSION {
            return Err(AggregationError::UnsupportedSchemaVersion(raw.schema_version));
        }

        let mut sites = Vec::new();
        let mut reviews: Vec<String> = Vec::new();
        let mut maps: Option<RawGoogleMapsInfo> = None;
        for site in RatingSite::ALL {
            let validated: Result<(SiteInfo, Vec<String>), SchemaError> = match site {
                RatingSite::TripAdvisor => {
                    let Some(value) = &raw.trip_advisor_info else {
                        continue;
                    };
                    parse_section::<RawProviderInfo>(site, value).and_then(|info| {
                        let site_info = SiteInfo::from_raw(site, &info)?;
                        Ok((site_info, info.reviews))
                    })
                }
                RatingSite::GoogleMaps => {
                    let Some(value) = &raw.google_maps_info else {
                        continue;
                    };
                    parse_section::<RawGoogleMapsInfo>(site, value).and_then(|section| {
                        let site_info = SiteInfo::from_raw(site, &section.info)?;
                        let section_reviews = section.info.reviews.clone();
                        maps = Some(section);
                        Ok((site_info, section_reviews))
                    })
                }
            };
            match validated {
                Ok((site_info, mut site_reviews)) => {
                    sites.push(site_info);
                    reviews.append(&mut site_reviews);
                }
                Err(error) => {
                    warn!(%site, %error, "skipping provider data for restaurant");
                }
            }
        }

        if sites.is_empty() {
            let name = [&raw.trip_advisor_info, &raw.google_maps_info]
                .into_iter()
                .flatten()
                .find_map(section_name)
                .unwrap_or("<unnamed>")
                .to_string();
            return Err(AggregationError::NoValidSites(name));
        }

        // Strict comparison keeps the earlier provider's review on ties.
        let review = reviews
            .into_iter()
            .reduce(|best, candidate| {
                if candidate.chars().count() > best.chars().count() {
                    candidate
                } else {
                    best
                }
            })
            .unwrap_or_default();

        // Address, coordinates and photos only exist on the maps section;
        // `maps` is only set when that section validated.
        let (photos, formatted_address, location) = match maps {
            Some(maps) => (
                maps.photos.into_iter().map(EncodedImage::jpeg).collect(),
                maps.formatted_address,
                Some(Location {
                    lat: maps.location_lat,
                    lng: maps.location_lng,
                }),
            ),
            None => (Vec::new(), String::new(), None),
        };

        Ok(Self {
            name: sites[0].name.clone(),
            review,
            score: sites[0].rating,
            sites,
            photos,
            formatted_address,
            location,
        })
    }
}

/// Aggregate every payload of a search response, dropping restaurants whose
/// provider data all failed validation. A dropped restaurant never fails
/// the search.
pub fn aggregate_all(raws: Vec<RawRestaurant>) -> Vec<Restaurant> {
    raws.into_iter()
        .filter_map(|raw| match Restaurant::try_from(raw) {
            Ok(restaurant) => Some(restaurant),
            Err(error) => {
                warn!(%error, "dropping restaurant from result set");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn trip_advisor(rating: f64, reviews: &[&str]) -> Value {
        json!({
            "name": "La Bonne Table",
            "link": "https://www.tripadvisor.com/r/la-bonne-table",
            "rating": rating,
            "number_of_reviews": 187,
            "reviews": reviews,
        })
    }

    fn google_maps(rating: f64, reviews: &[&str], photos: &[&str]) -> Value {
        json!({
            "name": "La Bonne Table",
            "link": "https://maps.google.com/?q=la+bonne+table",
            "rating": rating,
            "number_of_reviews": 213,
            "reviews": reviews,
            "photos": photos,
            "formatted_address": "12 Rue des Tests, Springfield",
            "location_lat": 43.7,
            "location_lng": 7.26,
        })
    }

    fn raw(trip_advisor_info: Option<Value>, google_maps_info: Option<Value>) -> RawRestaurant {
        RawRestaurant {
            schema_version: SUPPORTED_SCHEMA_VERSION,
            google_maps_info,
            trip_advisor_info,
        }
    }

    #[test]
    fn both_providers_aggregate_in_declaration_order() {
        let restaurant = Restaurant::try_from(raw(
            Some(trip_advisor(9.0, &[])),
            Some(google_maps(4.0, &[], &["aGVsbG8="])),
        ))
        .unwrap();

        assert_eq!(restaurant.sites.len(), 2);
        assert_eq!(restaurant.sites[0].site, RatingSite::TripAdvisor);
        assert_eq!(restaurant.sites[1].site, RatingSite::GoogleMaps);
        // Score comes from the first provider present.
        assert_eq!(restaurant.score, 9.0);
        assert_eq!(restaurant.photos.len(), 1);
        assert_eq!(restaurant.formatted_address, "12 Rue des Tests, Springfield");
        assert_eq!(restaurant.location.unwrap().lat, 43.7);
    }

    #[test]
    fn invalid_provider_section_is_skipped_not_fatal() {
        let mut bad_maps = google_maps(4.0, &[], &[]);
        bad_maps["link"] = json!("not a link");
        let restaurant =
            Restaurant::try_from(raw(Some(trip_advisor(8.5, &[])), Some(bad_maps))).unwrap();

        assert_eq!(restaurant.sites.len(), 1);
        assert_eq!(restaurant.sites[0].site, RatingSite::TripAdvisor);
        // The maps section did not validate, so nothing of it survives.
        assert!(restaurant.photos.is_empty());
        assert!(restaurant.location.is_none());
        assert_eq!(restaurant.formatted_address, "");
    }

    #[test]
    fn wrong_typed_field_drops_only_that_provider() {
        let mut bad_maps = google_maps(4.0, &[], &[]);
        bad_maps["rating"] = json!("4.5");
        let restaurant =
            Restaurant::try_from(raw(Some(trip_advisor(8.5, &[])), Some(bad_maps))).unwrap();

        assert_eq!(restaurant.sites.len(), 1);
        assert_eq!(restaurant.sites[0].site, RatingSite::TripAdvisor);
    }

    #[test]
    fn missing_required_field_drops_only_that_provider() {
        let mut bad_ta = trip_advisor(9.0, &[]);
        bad_ta.as_object_mut().unwrap().remove("number_of_reviews");
        let restaurant =
            Restaurant::try_from(raw(Some(bad_ta), Some(google_maps(4.0, &[], &[])))).unwrap();

        assert_eq!(restaurant.sites.len(), 1);
        assert_eq!(restaurant.sites[0].site, RatingSite::GoogleMaps);
    }

    #[test]
    fn all_sections_invalid_fails_aggregation() {
        let mut bad_ta = trip_advisor(9.0, &[]);
        bad_ta["link"] = json!("/relative");
        let mut bad_maps = google_maps(4.0, &[], &[]);
        bad_maps["rating"] = json!(11.0);

        let result = Restaurant::try_from(raw(Some(bad_ta), Some(bad_maps)));
        assert!(matches!(result, Err(AggregationError::NoValidSites(_))));
    }

    #[test]
    fn missing_both_sections_fails_aggregation() {
        let result = Restaurant::try_from(raw(None, None));
        assert!(matches!(result, Err(AggregationError::NoValidSites(_))));
    }

    #[test]
    fn unsupported_schema_version_is_rejected() {
        let mut payload = raw(Some(trip_advisor(9.0, &[])), None);
        payload.schema_version = 1;
        let result = Restaurant::try_from(payload);
        assert!(matches!(
            result,
            Err(AggregationError::UnsupportedSchemaVersion(1))
        ));
    }

    #[test]
    fn longest_review_wins() {
        let restaurant = Restaurant::try_from(raw(
            Some(trip_advisor(9.0, &["short"])),
            Some(google_maps(4.0, &["a much longer review text"], &[])),
        ))
        .unwrap();
        assert_eq!(restaurant.review, "a much longer review text");
    }

    #[test]
    fn review_ties_go_to_the_earlier_provider() {
        let restaurant = Restaurant::try_from(raw(
            Some(trip_advisor(9.0, &["from trip advisor"])),
            Some(google_maps(4.0, &["from google maps!"], &[])),
        ))
        .unwrap();
        // Both reviews are 17 characters long.
        assert_eq!(restaurant.review, "from trip advisor");
    }

    #[test]
    fn no_reviews_yields_empty_string() {
        let restaurant =
            Restaurant::try_from(raw(Some(trip_advisor(9.0, &[])), None)).unwrap();
        assert_eq!(restaurant.review, "");
    }

    #[test]
    fn aggregation_is_deterministic() {
        let payload = raw(
            Some(trip_advisor(9.0, &["first review", "second review"])),
            Some(google_maps(4.0, &["third review"], &["aGVsbG8="])),
        );
        let first = Restaurant::try_from(payload.clone()).unwrap();
        let second = Restaurant::try_from(payload).unwrap();
        assert_eq!(first.review, second.review);
        assert_eq!(first.score, second.score);
        assert_eq!(first.sites.len(), second.sites.len());
    }

    #[test]
    fn five_scale_provider_is_normalized_into_sites() {
        let restaurant =
            Restaurant::try_from(raw(None, Some(google_maps(4.0, &[], &[])))).unwrap();
        assert_eq!(restaurant.sites[0].rating, 8.0);
        assert_eq!(restaurant.score, 8.0);
    }

    #[test]
    fn aggregate_all_drops_only_invalid_restaurants() {
        let good = raw(Some(trip_advisor(9.0, &[])), None);
        let bad = raw(None, None);
        let restaurants = aggregate_all(vec![good, bad]);
        assert_eq!(restaurants.len(), 1);
        assert_eq!(restaurants[0].name, "La Bonne Table");
    }

    #[test]
    fn malformed_section_does_not_sink_the_result_set() {
        let good = raw(Some(trip_advisor(9.0, &[])), None);
        let mut bad_section = google_maps(4.0, &[], &[]);
        bad_section["rating"] = json!("4.5");
        let bad = raw(None, Some(bad_section));

        let restaurants = aggregate_all(vec![good, bad]);
        assert_eq!(restaurants.len(), 1);
        assert_eq!(restaurants[0].name, "La Bonne Table");
    }
}
