use serde::Serialize;
use std::fmt;

use super::error::RoutingError;

/// A point on the map in (longitude, latitude) order, the same order ORS uses on the wire.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    lon: f64,
    lat: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting non-finite or out-of-range degrees.
    pub fn new(lon: f64, lat: f64) -> Result<Self, RoutingError> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(RoutingError::InvalidRequest(format!(
                "coordinate ({}, {}) is not finite",
                lon, lat
            )));
        }
        if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
            return Err(RoutingError::InvalidRequest(format!(
                "coordinate ({}, {}) is out of range",
                lon, lat
            )));
        }
        Ok(Self { lon, lat })
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// The `[lon, lat]` pair as ORS expects it in request bodies.
    pub fn to_pair(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

/// A non-blank, trimmed address or place name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlaceQuery(String);

impl PlaceQuery {
    /// Returns `None` for empty or whitespace-only input.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered stops for a single route: origin, interior waypoints, destination.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteRequest {
    origin: Coordinate,
    waypoints: Vec<Coordinate>,
    destination: Coordinate,
}

impl RouteRequest {
    pub fn new(origin: Coordinate, waypoints: Vec<Coordinate>, destination: Coordinate) -> Self {
        Self {
            origin,
            waypoints,
            destination,
        }
    }

    /// Splits a flat list into origin, waypoints and destination.
    pub fn from_coordinates(points: &[Coordinate]) -> Result<Self, RoutingError> {
        match points {
            [origin, middle @ .., destination] => {
                Ok(Self::new(*origin, middle.to_vec(), *destination))
            }
            _ => Err(RoutingError::InvalidRequest(format!(
                "a route needs at least an origin and a destination, got {} coordinate(s)",
                points.len()
            ))),
        }
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn waypoints(&self) -> &[Coordinate] {
        &self.waypoints
    }

    pub fn destination(&self) -> Coordinate {
        self.destination
    }

    /// All stops in visiting order.
    pub fn coordinates(&self) -> Vec<Coordinate> {
        let mut all = Vec::with_capacity(self.waypoints.len() + 2);
        all.push(self.origin);
        all.extend_from_slice(&self.waypoints);
        all.push(self.destination);
        all
    }
}

/// Axis-aligned rectangle used to frame the map.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Coordinate,
    pub max: Coordinate,
}

impl BoundingBox {
    /// Smallest box containing every point, or `None` for an empty slice.
    pub fn enclosing(points: &[Coordinate]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_lon, mut min_lat) = (first.lon, first.lat);
        let (mut max_lon, mut max_lat) = (first.lon, first.lat);
        for p in &points[1..] {
            min_lon = min_lon.min(p.lon);
            min_lat = min_lat.min(p.lat);
            max_lon = max_lon.max(p.lon);
            max_lat = max_lat.max(p.lat);
        }
        Some(Self {
            min: Coordinate {
                lon: min_lon,
                lat: min_lat,
            },
            max: Coordinate {
                lon: max_lon,
                lat: max_lat,
            },
        })
    }
}

/// One turn-by-turn instruction.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DirectionStep {
    pub instruction: String,
    pub distance_m: f64,
    pub duration_s: f64,
}

/// A route as computed by the directions service.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct RoutedPath {
    pub geometry: Vec<Coordinate>,
    pub bounding_box: Option<BoundingBox>,
    pub distance_m: f64,
    pub duration_s: f64,
    pub steps: Vec<DirectionStep>,
}
