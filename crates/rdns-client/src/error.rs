use thiserror::Error;

/// Result type alias for upload operations
pub type Result<T> = std::result::Result<T, UploadError>;

/// Errors that can occur when uploading a lookup file
#[derive(Error, Debug)]
pub enum UploadError {
    /// Authentication failed - wrong or missing credentials
    #[error("authentication failed: check username and password/token")]
    Unauthorized,

    /// The cluster rejected the upload
    #[error("upload rejected ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the response body
        message: String,
    },

    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Base URL or resolved endpoint is not a valid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Reading the staged lookup file failed
    #[error("failed to read lookup file: {0}")]
    Io(#[from] std::io::Error),
}
