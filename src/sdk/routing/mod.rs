pub mod error;
pub mod geocode;
pub mod response;
pub mod route;
pub mod transport;
pub mod types;

pub use error::{RoutingError, ServiceFault, Stage};
pub use geocode::Geocoder;
pub use route::Router;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport};
pub use types::{BoundingBox, Coordinate, DirectionStep, PlaceQuery, RouteRequest, RoutedPath};
