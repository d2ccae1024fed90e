use serde::Deserialize;

// --- Data Structures for parsing ORS responses ---

#[derive(Deserialize, Debug)]
pub struct GeoResponse {
    // ORS omits `features` or sends null for some empty searches
    #[serde(default)]
    pub features: Option<Vec<GeoFeature>>,
}
#[derive(Deserialize, Debug)]
pub struct GeoFeature {
    pub geometry: PointGeometry,
}
#[derive(Deserialize, Debug)]
pub struct PointGeometry {
    pub coordinates: Vec<f64>,
}

#[derive(Deserialize, Debug)]
pub struct DirectionsResponse {
    pub features: Option<Vec<RouteFeature>>,
}
#[derive(Deserialize, Debug)]
pub struct RouteFeature {
    #[serde(default)]
    pub bbox: Option<Vec<f64>>,
    pub geometry: LineGeometry,
    pub properties: RouteProperties,
}
#[derive(Deserialize, Debug)]
pub struct LineGeometry {
    pub coordinates: Vec<Vec<f64>>,
}
#[derive(Deserialize, Debug)]
pub struct RouteProperties {
    #[serde(default)]
    pub summary: DirectionsSummary,
    #[serde(default)]
    pub segments: Vec<Segment>,
}
// Zero-length routes come back with an empty summary object
#[derive(Deserialize, Debug, Default, Clone, Copy)]
pub struct DirectionsSummary {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
}
#[derive(Deserialize, Debug)]
pub struct Segment {
    #[serde(default)]
    pub steps: Vec<Step>,
}
#[derive(Deserialize, Debug)]
pub struct Step {
    pub instruction: String,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
}
