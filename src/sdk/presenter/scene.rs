use serde::Serialize;

use crate::sdk::routing::types::{BoundingBox, Coordinate, RouteRequest, RoutedPath};

pub const START_COLOR: &str = "green";
pub const WAYPOINT_COLOR: &str = "blue";
pub const DESTINATION_COLOR: &str = "red";
pub const ROUTE_COLOR: &str = "orange";
pub const ROUTE_WEIGHT: f64 = 5.0;
pub const ROUTE_OPACITY: f64 = 0.8;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerKind {
    Start,
    /// 1-based position among the interior stops.
    Waypoint { number: usize },
    Destination,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Marker {
    #[serde(flatten)]
    pub kind: MarkerKind,
    pub position: Coordinate,
    pub label: String,
    pub tooltip: String,
    pub color: &'static str,
}

impl Marker {
    fn start(position: Coordinate) -> Self {
        Self {
            kind: MarkerKind::Start,
            position,
            label: "Start".to_string(),
            tooltip: "Start".to_string(),
            color: START_COLOR,
        }
    }

    fn waypoint(number: usize, position: Coordinate) -> Self {
        Self {
            kind: MarkerKind::Waypoint { number },
            position,
            label: number.to_string(),
            tooltip: format!("Waypoint {}", number),
            color: WAYPOINT_COLOR,
        }
    }

    fn destination(position: Coordinate) -> Self {
        Self {
            kind: MarkerKind::Destination,
            position,
            label: "Destination".to_string(),
            tooltip: "Destination".to_string(),
            color: DESTINATION_COLOR,
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct Polyline {
    pub points: Vec<Coordinate>,
    pub color: &'static str,
    pub weight: f64,
    pub opacity: f64,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViewportSource {
    RouteBounds,
    Markers,
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub bounds: BoundingBox,
    pub source: ViewportSource,
}

/// Everything needed to draw one route on a map.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct MapScene {
    pub markers: Vec<Marker>,
    pub route_line: Polyline,
    pub viewport: Option<Viewport>,
}

impl MapScene {
    pub fn markers_of(&self, wanted: fn(&MarkerKind) -> bool) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(move |m| wanted(&m.kind))
    }

    pub fn waypoint_markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers_of(|kind| matches!(kind, MarkerKind::Waypoint { .. }))
    }
}

/// Lays out markers for every stop, the route line, and the initial viewport.
///
/// The viewport follows the route's bounding box when the service sent one and
/// otherwise frames the markers.
pub fn build_scene(request: &RouteRequest, path: &RoutedPath) -> MapScene {
    let mut markers = Vec::with_capacity(request.waypoints().len() + 2);
    markers.push(Marker::start(request.origin()));
    markers.extend(
        request
            .waypoints()
            .iter()
            .enumerate()
            .map(|(i, wp)| Marker::waypoint(i + 1, *wp)),
    );
    markers.push(Marker::destination(request.destination()));

    let viewport = match path.bounding_box {
        Some(bounds) => Some(Viewport {
            bounds,
            source: ViewportSource::RouteBounds,
        }),
        None => {
            let positions: Vec<Coordinate> = markers.iter().map(|m| m.position).collect();
            BoundingBox::enclosing(&positions).map(|bounds| Viewport {
                bounds,
                source: ViewportSource::Markers,
            })
        }
    };

    MapScene {
        markers,
        route_line: Polyline {
            points: path.geometry.clone(),
            color: ROUTE_COLOR,
            weight: ROUTE_WEIGHT,
            opacity: ROUTE_OPACITY,
        },
        viewport,
    }
}
