use std::sync::Arc;

use super::config::OrsConfig;
use super::presenter::{build_scene, format_directions, MapScene, RouteSummary};
use super::routing::{Coordinate, Geocoder, HttpTransport, RouteRequest, RoutedPath, Router, RoutingError};
use super::util::rate_limit::Limiter;

/// Raw text as the user typed it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TripInput {
    pub start: String,
    pub destination: String,
    pub waypoints: Vec<String>,
}

impl TripInput {
    /// Waypoints arrive as one place per line; blank lines are ignored.
    pub fn from_fields(start: &str, destination: &str, waypoints_text: &str) -> Self {
        Self {
            start: start.to_string(),
            destination: destination.to_string(),
            waypoints: waypoints_text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// A waypoint that was left out of the route because it could not be geocoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DroppedWaypoint {
    pub query: String,
    pub reason: String,
}

/// Everything produced by one request cycle.
#[derive(Clone, Debug)]
pub struct PlannedRoute {
    pub request: RouteRequest,
    pub path: RoutedPath,
    pub scene: MapScene,
    pub summary: RouteSummary,
    pub directions: Vec<String>,
    pub dropped_waypoints: Vec<DroppedWaypoint>,
}

/// Runs geocoding, routing and presentation for one trip.
pub struct RoutePlanner {
    geocoder: Geocoder,
    router: Router,
}

impl RoutePlanner {
    pub fn new(geocoder: Geocoder, router: Router) -> Self {
        Self { geocoder, router }
    }

    /// Wires a geocoder and router over the same transport and rate limit.
    pub fn from_config(config: &OrsConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let mut geocoder = Geocoder::new(config.clone(), Arc::clone(&transport));
        let mut router = Router::new(config.clone(), transport);
        if let Some(per_minute) = config.requests_per_minute {
            let limiter = Limiter::per_minute(per_minute);
            geocoder = geocoder.with_limiter(limiter.clone());
            router = router.with_limiter(limiter);
        }
        Self::new(geocoder, router)
    }

    fn required(&self, raw: &str, field: &'static str) -> Result<Coordinate, RoutingError> {
        self.geocoder
            .geocode(raw)?
            .ok_or(RoutingError::MissingInput { field })
    }

    /// Origin and destination must resolve; a waypoint that fails is dropped and reported.
    pub fn plan(&self, input: &TripInput) -> Result<PlannedRoute, RoutingError> {
        let origin = self.required(&input.start, "start location")?;
        let destination = self.required(&input.destination, "destination")?;

        let mut waypoints = Vec::with_capacity(input.waypoints.len());
        let mut dropped_waypoints = Vec::new();
        for raw in &input.waypoints {
            match self.geocoder.geocode(raw) {
                Ok(Some(coord)) => waypoints.push(coord),
                Ok(None) => {}
                Err(e) => {
                    log::warn!("Dropping waypoint \"{}\": {}", raw.trim(), e);
                    dropped_waypoints.push(DroppedWaypoint {
                        query: raw.trim().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let request = RouteRequest::new(origin, waypoints, destination);
        let path = self.router.route(&request)?;
        log::info!(
            "Route found: {:.0} m, {:.0} s, {} step(s)",
            path.distance_m,
            path.duration_s,
            path.steps.len()
        );

        Ok(PlannedRoute {
            scene: build_scene(&request, &path),
            summary: RouteSummary::from(&path),
            directions: format_directions(&path),
            request,
            path,
            dropped_waypoints,
        })
    }
}
