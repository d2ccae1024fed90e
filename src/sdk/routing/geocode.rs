use std::sync::Arc;
use std::time::Duration;

use super::error::{RoutingError, ServiceFault, Stage};
use super::response::GeoResponse;
use super::transport::{HttpRequest, HttpTransport};
use super::types::{Coordinate, PlaceQuery};
use crate::sdk::config::OrsConfig;
use crate::sdk::util::rate_limit::Limiter;

pub const GEOCODE_TIMEOUT: Duration = Duration::from_secs(20);

/// Resolves place names to coordinates through `/geocode/search`.
pub struct Geocoder {
    transport: Arc<dyn HttpTransport>,
    config: OrsConfig,
    limiter: Option<Limiter>,
}

impl Geocoder {
    pub fn new(config: OrsConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            config,
            limiter: None,
        }
    }

    pub fn with_limiter(mut self, limiter: Limiter) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// Geocodes raw user input. Blank input yields `Ok(None)` without touching the network.
    pub fn geocode(&self, raw: &str) -> Result<Option<Coordinate>, RoutingError> {
        match PlaceQuery::new(raw) {
            Some(query) => self.resolve(&query).map(Some),
            None => {
                log::debug!("[GEOCODE] Skipping blank input");
                Ok(None)
            }
        }
    }

    /// Looks up the single best match for `query`.
    pub fn resolve(&self, query: &PlaceQuery) -> Result<Coordinate, RoutingError> {
        let stage = || Stage::Geocode {
            query: query.to_string(),
        };

        if let Some(limiter) = &self.limiter {
            limiter.wait();
        }

        let url = format!("{}/geocode/search", self.config.base_url);
        let request = HttpRequest::get(url, &self.config.api_key, GEOCODE_TIMEOUT)
            .with_query("text", query.as_str())
            .with_query("size", "1");
        log::debug!("[GEOCODE] Searching for \"{}\"", query);

        let response = self
            .transport
            .execute(&request)
            .map_err(|e| RoutingError::service(stage(), e))?;

        if !response.is_success() {
            log::error!(
                "Geocoding \"{}\" returned status {}. Body: {}",
                query,
                response.status,
                response.body
            );
            return Err(RoutingError::service(
                stage(),
                ServiceFault::from_status(response.status, &response.body),
            ));
        }

        parse_geocode_response(query, &response.body)
    }
}

/// Extracts the first feature's `[lon, lat]` from a search response.
pub fn parse_geocode_response(query: &PlaceQuery, body: &str) -> Result<Coordinate, RoutingError> {
    let stage = || Stage::Geocode {
        query: query.to_string(),
    };

    let resp: GeoResponse = serde_json::from_str(body).map_err(|e| {
        log::error!(
            "Failed to parse GeoResponse for \"{}\": {}. Body: {}",
            query,
            e,
            body
        );
        RoutingError::service(stage(), e)
    })?;

    let Some(feature) = resp.features.as_deref().and_then(<[_]>::first) else {
        log::debug!("[GEOCODE] No match for \"{}\"", query);
        return Err(RoutingError::NotFound {
            query: query.to_string(),
        });
    };

    match feature.geometry.coordinates.as_slice() {
        [lon, lat, ..] => Coordinate::new(*lon, *lat).map_err(|e| {
            RoutingError::service(stage(), ServiceFault::Malformed(e.to_string()))
        }),
        other => Err(RoutingError::service(
            stage(),
            ServiceFault::Malformed(format!(
                "expected [lon, lat], got {} value(s)",
                other.len()
            )),
        )),
    }
}
