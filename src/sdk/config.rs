use std::env;
use std::num::NonZeroU32;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";
pub const DEFAULT_REQUESTS_PER_MINUTE: u32 = 40;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ORS_API_KEY is not set")]
    MissingApiKey,

    #[error("invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Connection settings for OpenRouteService, handed to the geocoder and router.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrsConfig {
    pub api_key: String,
    pub base_url: String,
    /// `None` disables client-side throttling.
    pub requests_per_minute: Option<NonZeroU32>,
}

impl OrsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            requests_per_minute: NonZeroU32::new(DEFAULT_REQUESTS_PER_MINUTE),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_requests_per_minute(mut self, per_minute: u32) -> Self {
        self.requests_per_minute = NonZeroU32::new(per_minute);
        self
    }

    /// Reads `ORS_API_KEY`, `ORS_BASE_URL` and `ORS_REQUESTS_PER_MINUTE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("ORS_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let mut config = OrsConfig::new(api_key);

        if let Some(base_url) = lookup("ORS_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(base_url.trim());
        }

        if let Some(raw) = lookup("ORS_REQUESTS_PER_MINUTE") {
            let per_minute = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: "ORS_REQUESTS_PER_MINUTE",
                    value: raw.clone(),
                })?;
            config = config.with_requests_per_minute(per_minute);
        }

        Ok(config)
    }
}
