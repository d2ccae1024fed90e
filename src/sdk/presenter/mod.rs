//! Turns geocoded stops and a routed path into things a map widget or terminal can show.
//!
//! Everything here is a pure function of its inputs.

pub mod directions;
pub mod scene;

pub use directions::{format_directions, format_step, RouteSummary};
pub use scene::{build_scene, MapScene, Marker, MarkerKind, Polyline, Viewport, ViewportSource};
