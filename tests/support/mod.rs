#![allow(dead_code)]

pub mod ors_stub;

use route_finder::sdk::config::OrsConfig;
use route_finder::sdk::routing::{HttpRequest, HttpResponse, HttpTransport, ServiceFault};
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "http://ors.test";
pub const API_KEY: &str = "test-key";
pub const GEOCODE_PATH: &str = "/geocode/search";
pub const DIRECTIONS_PATH: &str = "/v2/directions/driving-car/geojson";

pub fn test_config() -> OrsConfig {
    OrsConfig::new(API_KEY)
        .with_base_url(BASE_URL)
        .with_requests_per_minute(0)
}

#[derive(Clone, Debug)]
pub enum Reply {
    Status(u16, String),
    TransportFailure(String),
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Reply::Status(200, body.into())
    }
}

/// In-memory stand-in for ORS: geocode replies keyed by search text, one directions reply.
/// Unknown search text gets an empty feature collection.
#[derive(Default)]
pub struct ScriptedTransport {
    geocodes: Mutex<HashMap<String, Reply>>,
    directions: Mutex<Option<Reply>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn place(&self, text: &str, lon: f64, lat: f64) -> &Self {
        self.geocode_reply(text, Reply::ok(geocode_body(lon, lat)))
    }

    pub fn geocode_reply(&self, text: &str, reply: Reply) -> &Self {
        self.geocodes
            .lock()
            .unwrap()
            .insert(text.to_string(), reply);
        self
    }

    pub fn directions_reply(&self, reply: Reply) -> &Self {
        *self.directions.lock().unwrap() = Some(reply);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url.ends_with(path))
            .count()
    }

    pub fn geocode_calls(&self) -> usize {
        self.calls_to(GEOCODE_PATH)
    }

    pub fn directions_calls(&self) -> usize {
        self.calls_to(DIRECTIONS_PATH)
    }

    /// Coordinates sent in the most recent directions request.
    pub fn last_route_coordinates(&self) -> Vec<[f64; 2]> {
        let requests = self.requests.lock().unwrap();
        let body = requests
            .iter()
            .rev()
            .find(|r| r.url.ends_with(DIRECTIONS_PATH))
            .and_then(|r| r.body.clone())
            .expect("a directions request was sent");
        serde_json::from_value(body["coordinates"].clone()).expect("coordinate pairs")
    }
}

impl HttpTransport for ScriptedTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ServiceFault> {
        self.requests.lock().unwrap().push(request.clone());

        let reply = if request.url.ends_with(GEOCODE_PATH) {
            let text = request.query_value("text").unwrap_or_default();
            self.geocodes
                .lock()
                .unwrap()
                .get(text)
                .cloned()
                .unwrap_or_else(|| Reply::ok(r#"{"type":"FeatureCollection","features":[]}"#))
        } else if request.url.ends_with(DIRECTIONS_PATH) {
            self.directions
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| Reply::Status(500, "no directions scripted".to_string()))
        } else {
            Reply::Status(404, format!("unexpected url {}", request.url))
        };

        match reply {
            Reply::Status(status, body) => Ok(HttpResponse { status, body }),
            Reply::TransportFailure(message) => Err(ServiceFault::Transport(message)),
        }
    }
}

pub fn geocode_body(lon: f64, lat: f64) -> String {
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [lon, lat]},
            "properties": {"confidence": 1.0}
        }]
    })
    .to_string()
}

/// A single-feature directions response with one segment.
pub fn route_body(
    geometry: &[[f64; 2]],
    distance: f64,
    duration: f64,
    steps: &[(&str, f64, f64)],
) -> String {
    let steps: Vec<_> = steps
        .iter()
        .map(|(instruction, distance, duration)| {
            json!({"instruction": instruction, "distance": distance, "duration": duration, "type": 11})
        })
        .collect();
    json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {
                "segments": [{"distance": distance, "duration": duration, "steps": steps}],
                "summary": {"distance": distance, "duration": duration}
            },
            "geometry": {"type": "LineString", "coordinates": geometry}
        }]
    })
    .to_string()
}
