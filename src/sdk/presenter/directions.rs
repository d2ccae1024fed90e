use serde::Serialize;
use std::fmt;

use crate::sdk::routing::types::{DirectionStep, RoutedPath};

/// Headline numbers for a route, shown above the directions list.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub duration_min: f64,
}

impl From<&RoutedPath> for RouteSummary {
    fn from(path: &RoutedPath) -> Self {
        Self {
            distance_km: path.distance_m / 1000.0,
            duration_min: path.duration_s / 60.0,
        }
    }
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} km, {:.1} min", self.distance_km, self.duration_min)
    }
}

/// `"{n}. {instruction} ({metres} m, {seconds} sec)"`, both numbers rounded to whole units.
pub fn format_step(number: usize, step: &DirectionStep) -> String {
    format!(
        "{}. {} ({:.0} m, {:.0} sec)",
        number, step.instruction, step.distance_m, step.duration_s
    )
}

/// One numbered line per step, in traversal order.
pub fn format_directions(path: &RoutedPath) -> Vec<String> {
    path.steps
        .iter()
        .enumerate()
        .map(|(i, step)| format_step(i + 1, step))
        .collect()
}
