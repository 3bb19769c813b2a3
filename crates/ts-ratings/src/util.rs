use std::time::Duration;

/// Bound on any single service request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub fn default_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .gzip(true)
        .brotli(true)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap()
}
