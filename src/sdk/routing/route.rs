use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use super::error::{RoutingError, ServiceFault, Stage};
use super::response::{DirectionsResponse, Step};
use super::transport::{HttpRequest, HttpTransport};
use super::types::{BoundingBox, Coordinate, DirectionStep, RouteRequest, RoutedPath};
use crate::sdk::config::OrsConfig;
use crate::sdk::util::rate_limit::Limiter;

pub const ROUTE_TIMEOUT: Duration = Duration::from_secs(30);
const DIRECTIONS_PATH: &str = "/v2/directions/driving-car/geojson";

/// Requests driving directions through the ORS directions endpoint.
pub struct Router {
    transport: Arc<dyn HttpTransport>,
    config: OrsConfig,
    limiter: Option<Limiter>,
}

impl Router {
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

    /// Routes a flat list of stops; fewer than two is rejected before any call is made.
    pub fn route_points(&self, points: &[Coordinate]) -> Result<RoutedPath, RoutingError> {
        let request = RouteRequest::from_coordinates(points)?;
        self.route(&request)
    }

    pub fn route(&self, request: &RouteRequest) -> Result<RoutedPath, RoutingError> {
        let points = request.coordinates();

        if let Some(limiter) = &self.limiter {
            limiter.wait();
        }

        let url = format!("{}{}", self.config.base_url, DIRECTIONS_PATH);
        let body = directions_body(&points);
        log::debug!(
            "[ROUTE] Requesting directions through {} stop(s): {} -> {}",
            points.len(),
            request.origin(),
            request.destination()
        );

        let http_request = HttpRequest::post(url, &self.config.api_key, body, ROUTE_TIMEOUT);
        let response = self.transport.execute(&http_request).map_err(|e| {
            log::error!("Failed to send directions request: {}", e);
            RoutingError::service(Stage::Route, e)
        })?;

        if !response.is_success() {
            log::error!(
                "Directions API returned status {}. Body: {}",
                response.status,
                response.body
            );
            return Err(RoutingError::service(
                Stage::Route,
                ServiceFault::from_status(response.status, &response.body),
            ));
        }

        parse_directions_response(&response.body)
    }
}

/// JSON body for the GeoJSON directions endpoint.
pub fn directions_body(points: &[Coordinate]) -> serde_json::Value {
    let coordinates: Vec<[f64; 2]> = points.iter().map(|p| p.to_pair()).collect();
    json!({
        "coordinates": coordinates,
        "instructions": true,
        "elevation": false,
        "format": "geojson",
    })
}

fn malformed(detail: String) -> RoutingError {
    RoutingError::service(Stage::Route, ServiceFault::Malformed(detail))
}

fn non_negative(what: &str, value: f64) -> Result<f64, RoutingError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(malformed(format!("{} must be a non-negative number, got {}", what, value)))
    }
}

fn decode_position(index: usize, position: &[f64]) -> Result<Coordinate, RoutingError> {
    match position {
        [lon, lat, ..] => Coordinate::new(*lon, *lat)
            .map_err(|e| malformed(format!("geometry point {}: {}", index, e))),
        _ => Err(malformed(format!(
            "geometry point {} has {} value(s)",
            index,
            position.len()
        ))),
    }
}

// ORS sends [minLon, minLat, maxLon, maxLat], or a 3D box with elevation in slots 2 and 5.
fn decode_bbox(raw: &[f64]) -> Result<BoundingBox, RoutingError> {
    let (min_lon, min_lat, max_lon, max_lat) = match raw {
        [a, b, c, d] => (*a, *b, *c, *d),
        [a, b, _, d, e, _] => (*a, *b, *d, *e),
        _ => return Err(malformed(format!("bbox has {} value(s)", raw.len()))),
    };
    let min = Coordinate::new(min_lon, min_lat).map_err(|e| malformed(format!("bbox: {}", e)))?;
    let max = Coordinate::new(max_lon, max_lat).map_err(|e| malformed(format!("bbox: {}", e)))?;
    Ok(BoundingBox { min, max })
}

fn decode_step(index: usize, step: Step) -> Result<DirectionStep, RoutingError> {
    if step.instruction.trim().is_empty() {
        return Err(malformed(format!("step {} has an empty instruction", index + 1)));
    }
    Ok(DirectionStep {
        distance_m: non_negative("step distance", step.distance)?,
        duration_s: non_negative("step duration", step.duration)?,
        instruction: step.instruction,
    })
}

/// Turns a directions response into a path, keeping only the first feature and segment.
pub fn parse_directions_response(body: &str) -> Result<RoutedPath, RoutingError> {
    let resp: DirectionsResponse = serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse DirectionsResponse: {}. Body: {}", e, body);
        RoutingError::service(Stage::Route, e)
    })?;

    let features = resp
        .features
        .ok_or_else(|| malformed("response has no 'features' member".to_string()))?;
    let Some(feature) = features.into_iter().next() else {
        return Err(RoutingError::NoRouteFound);
    };

    let geometry = feature
        .geometry
        .coordinates
        .iter()
        .enumerate()
        .map(|(i, position)| decode_position(i, position))
        .collect::<Result<Vec<_>, _>>()?;

    let bounding_box = feature.bbox.as_deref().map(decode_bbox).transpose()?;

    let summary = feature.properties.summary;
    let steps = feature
        .properties
        .segments
        .into_iter()
        .next()
        .map(|segment| segment.steps)
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, step)| decode_step(i, step))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RoutedPath {
        geometry,
        bounding_box,
        distance_m: non_negative("summary distance", summary.distance)?,
        duration_s: non_negative("summary duration", summary.duration)?,
        steps,
    })
}
