use std::fmt;

/// Error types that can occur when running the posting pipeline or the relay.
#[derive(Debug)]
pub enum BotError {
    /// HTTP request/response errors
    HttpError(String),
    /// Authentication and authorization errors
    AuthError(String),
    /// Invalid request parameters or format
    InvalidRequest(String),
    /// Errors returned by an external service
    ProviderError(String),
    /// Unexpected response shape from an external service
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
    /// JSON serialization/deserialization errors
    JsonError(String),
    /// Local file errors writing assets or the post log
    IoError(String),
    /// All pipeline attempts were exhausted without a successful post
    RetryExceeded { attempts: usize, last_error: String },
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::HttpError(e) => write!(f, "HTTP Error: {e}"),
            BotError::AuthError(e) => write!(f, "Auth Error: {e}"),
            BotError::InvalidRequest(e) => write!(f, "Invalid Request: {e}"),
            BotError::ProviderError(e) => write!(f, "Provider Error: {e}"),
            BotError::ResponseFormatError {
                message,
                raw_response,
            } => {
                write!(
                    f,
                    "Response Format Error: {message}. Raw response: {raw_response}"
                )
            }
            BotError::JsonError(e) => write!(f, "JSON Parse Error: {e}"),
            BotError::IoError(e) => write!(f, "IO Error: {e}"),
            BotError::RetryExceeded {
                attempts,
                last_error,
            } => {
                write!(
                    f,
                    "Retries exceeded after {attempts} attempts. Last error: {last_error}"
                )
            }
        }
    }
}

impl std::error::Error for BotError {}

/// Converts reqwest HTTP errors into BotErrors
impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        BotError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(err: serde_json::Error) -> Self {
        BotError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for BotError {
    fn from(err: std::io::Error) -> Self {
        BotError::IoError(err.to_string())
    }
}

impl From<csv::Error> for BotError {
    fn from(err: csv::Error) -> Self {
        BotError::IoError(err.to_string())
    }
}
