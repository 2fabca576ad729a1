//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An HTTP request failed (network error, timeout, or unreadable response).
    #[error("Request failed")]
    RequestFailed,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// The response body was not the JSON shape the endpoint promises.
    #[error("Malformed response body: {0}")]
    MalformedBody(String),
    /// The configured base URL cannot be combined with an endpoint path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
