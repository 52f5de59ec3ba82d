use std::time::Duration;

/// HTTP API errors, classified by what failed.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// DNS, connection or timeout failure before a response arrived.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with something other than 200.
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Client for the amsky01_viewer HTTP API.
///
/// One GET per poll with a bounded total timeout, redirects followed. The
/// client keeps no idle connections, so every poll opens and tears down its
/// own connection.
pub struct Amsky01Client {
    http: reqwest::Client,
}

impl Amsky01Client {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()?;
        Ok(Self { http })
    }

    /// Fetch the station's JSON document. Returns the raw body for decoding.
    pub async fn fetch(&self, url: &str) -> Result<String, ApiError> {
        let response = self.http.get(url).send().await.map_err(|e| ApiError::Transport {
            url: url.to_string(),
            source: e,
        })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|e| ApiError::Transport {
            url: url.to_string(),
            source: e,
        })
    }
}
