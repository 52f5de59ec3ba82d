use serde::Deserialize;

/// AMSKY01 driver configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP endpoint serving the station's JSON document.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Total request timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_endpoint() -> String {
    "http://localhost:8080/data.json".to_string()
}

fn default_request_timeout_ms() -> u64 {
    5000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}
