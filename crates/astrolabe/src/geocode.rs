//! Place-name resolution through a Nominatim-compatible search service.

use crate::ephemeris::GeoLocation;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = "astro_api";

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Geocoder returned status {status}")]
    Status { status: u16 },
    #[error("Geocoder returned malformed coordinates: {0}")]
    Malformed(String),
}

/// Resolves free-text place names to coordinates.
///
/// `Ok(None)` means the service answered but knows no such place.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn locate(&self, place: &str) -> Result<Option<GeoLocation>, GeocodeError>;
}

#[derive(Debug, Clone)]
pub struct GeocoderSettings {
    pub endpoint: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Nominatim returns coordinates as strings
#[derive(Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

pub struct NominatimGeocoder {
    http: reqwest::Client,
    endpoint: String,
}

impl NominatimGeocoder {
    pub fn new(settings: &GeocoderSettings) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: settings.endpoint.clone(),
        })
    }

    fn search_url(&self, place: &str) -> String {
        format!(
            "{}?q={}&format=json&limit=1",
            self.endpoint,
            urlencoding::encode(place)
        )
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn locate(&self, place: &str) -> Result<Option<GeoLocation>, GeocodeError> {
        let url = self.search_url(place);
        log::debug!("Geocoding '{}' via {}", place, url);

        let resp = self.http.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(GeocodeError::Status {
                status: resp.status().as_u16(),
            });
        }

        let hits: Vec<SearchHit> = resp.json().await?;
        hits.into_iter().next().map(parse_hit).transpose()
    }
}

fn parse_hit(hit: SearchHit) -> Result<GeoLocation, GeocodeError> {
    let lat = hit.lat.trim().parse::<f64>();
    let lon = hit.lon.trim().parse::<f64>();
    match (lat, lon) {
        (Ok(lat), Ok(lon)) => Ok(GeoLocation { lat, lon }),
        _ => Err(GeocodeError::Malformed(format!("lat={} lon={}", hit.lat, hit.lon))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_place() {
        let geocoder = NominatimGeocoder::new(&GeocoderSettings::default()).unwrap();
        assert_eq!(
            geocoder.search_url("São Paulo, BR"),
            "https://nominatim.openstreetmap.org/search?q=S%C3%A3o%20Paulo%2C%20BR&format=json&limit=1"
        );
    }

    #[test]
    fn test_parse_hit() {
        let hits: Vec<SearchHit> =
            serde_json::from_str(r#"[{"lat":"55.7504461","lon":"37.6174943","display_name":"Moscow"}]"#)
                .unwrap();
        let loc = parse_hit(hits.into_iter().next().unwrap()).unwrap();
        assert!((loc.lat - 55.7504461).abs() < 1e-9);
        assert!((loc.lon - 37.6174943).abs() < 1e-9);

        let bad = SearchHit {
            lat: "north".into(),
            lon: "0".into(),
        };
        assert!(matches!(parse_hit(bad), Err(GeocodeError::Malformed(_))));
    }
}
