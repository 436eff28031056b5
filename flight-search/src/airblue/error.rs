//! Booking-site client error types.

/// Errors from fetching pages off the booking site.
#[derive(Debug, thiserror::Error)]
pub enum AirblueError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Site returned an error status code
    #[error("site error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Site is overloaded and refused the request
    #[error("the server is overloaded, try again later")]
    RateLimited,

    /// Client could not be configured
    #[error("invalid client configuration: {0}")]
    Config(String),
}
