use serde::Deserialize;
use std::fmt;
use thiserror::Error;

#[derive(Deserialize, Debug)]
pub struct OrsErrorDetail {
    pub code: u32,
    pub message: String,
}
#[derive(Deserialize, Debug)]
pub struct OrsErrorPayload {
    pub error: OrsErrorDetail,
}

/// Which outbound call a service failure belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Geocode { query: String },
    Route,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Geocode { query } => write!(f, "geocoding '{}'", query),
            Stage::Route => f.write_str("routing"),
        }
    }
}

/// The underlying cause of a failed call to ORS.
#[derive(Error, Debug)]
pub enum ServiceFault {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    // Transport failures that don't originate in reqwest (e.g. a substituted transport)
    #[error("transport failed: {0}")]
    Transport(String),

    // ORS's `{"error": {"code", "message"}}` body
    #[error("API error (code {code}): {message}")]
    Api { code: u32, message: String },

    // Non-success body in any other shape
    #[error("HTTP {status}: {body}")]
    RawApi { status: u16, body: String },

    #[error("failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unexpected response shape: {0}")]
    Malformed(String),
}

impl ServiceFault {
    /// Classifies a non-success response, preferring ORS's structured error body.
    pub fn from_status(status: u16, body: &str) -> Self {
        match serde_json::from_str::<OrsErrorPayload>(body) {
            Ok(payload) => ServiceFault::Api {
                code: payload.error.code,
                message: payload.error.message,
            },
            Err(_) => ServiceFault::RawApi {
                status,
                body: body.to_string(),
            },
        }
    }
}

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("no place found for '{query}'")]
    NotFound { query: String },

    #[error("the routing service returned no route between the given points")]
    NoRouteFound,

    #[error("{field} is required")]
    MissingInput { field: &'static str },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{stage} failed: {source}")]
    Service {
        stage: Stage,
        #[source]
        source: ServiceFault,
    },
}

impl RoutingError {
    pub fn service(stage: Stage, source: impl Into<ServiceFault>) -> Self {
        RoutingError::Service {
            stage,
            source: source.into(),
        }
    }

    pub fn is_service_error(&self) -> bool {
        matches!(self, RoutingError::Service { .. })
    }
}
