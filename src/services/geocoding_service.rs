/// Location resolver
///
/// Delegates free-text address resolution to a Nominatim-style geocoding
/// collaborator. Resolution fails soft: a search with no hits yields the
/// unresolved `Location`, not an error. Transport and decode failures are
/// real errors and stay retry-eligible for the caller.
use std::fmt;
use std::fmt::Formatter;
use std::time::Duration;

use reqwest::Client;

use crate::config::GeocodingConfig;
use crate::models::sizing::{GeocodingHit, Location};

#[derive(Debug)]
pub struct GeocodingError(pub String);
impl fmt::Display for GeocodingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "GeocodingError: {}", self.0)
    }
}
impl From<reqwest::Error> for GeocodingError {
    fn from(e: reqwest::Error) -> Self {
        GeocodingError(e.to_string())
    }
}
impl From<serde_json::Error> for GeocodingError {
    fn from(e: serde_json::Error) -> Self {
        GeocodingError(e.to_string())
    }
}

/// Resolve a free-text address to coordinates.
///
/// # Arguments
///
/// * 'cfg' - geocoding collaborator endpoint and identification
/// * 'address' - free-text address to search for
pub async fn resolve_address(
    cfg: &GeocodingConfig,
    address: &str,
) -> Result<Location, GeocodingError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(&cfg.user_agent)
        .build()?;

    let url = format!("{}/search", cfg.base_url.trim_end_matches('/'));
    let resp = client
        .get(&url)
        .query(&[("q", address), ("format", "json"), ("limit", "1")])
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(GeocodingError(format!("geocoder answered {}", status)));
    }

    let hits: Vec<GeocodingHit> = resp.json().await?;
    location_from_hits(&hits)
}

/// First hit wins; an empty result set is "no location yet", not a failure.
fn location_from_hits(hits: &[GeocodingHit]) -> Result<Location, GeocodingError> {
    match hits.first() {
        Some(hit) => {
            let lat: f64 = hit
                .lat
                .parse()
                .map_err(|_| GeocodingError(format!("unparseable latitude {:?}", hit.lat)))?;
            let lon: f64 = hit
                .lon
                .parse()
                .map_err(|_| GeocodingError(format!("unparseable longitude {:?}", hit.lon)))?;
            Ok(Location::at(lat, lon))
        }
        None => Ok(Location::UNRESOLVED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_nominatim_hit() {
        let body = r#"[{"place_id": 12345, "lat": "4.5709", "lon": "-74.2973",
                        "display_name": "Bogotá, Colombia"}]"#;
        let hits: Vec<GeocodingHit> = serde_json::from_str(body).unwrap();
        let location = location_from_hits(&hits).unwrap();
        assert_eq!(location.coordinates(), Some((4.5709, -74.2973)));
    }

    #[test]
    fn test_empty_result_is_unresolved_not_error() {
        let hits: Vec<GeocodingHit> = serde_json::from_str("[]").unwrap();
        let location = location_from_hits(&hits).unwrap();
        assert!(!location.is_resolved());
        assert_eq!(location, Location::UNRESOLVED);
    }

    #[test]
    fn test_garbage_coordinates_are_a_provider_error() {
        let hits = vec![GeocodingHit { lat: "north-ish".to_string(), lon: "-74.0".to_string() }];
        assert!(location_from_hits(&hits).is_err());
    }
}
