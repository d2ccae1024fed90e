pub mod sdk;

pub use sdk::config::OrsConfig;
pub use sdk::pipeline::{PlannedRoute, RoutePlanner, TripInput};
pub use sdk::presenter::{build_scene, format_directions, MapScene, RouteSummary};
pub use sdk::routing::{Coordinate, Geocoder, RouteRequest, RoutedPath, Router, RoutingError};
