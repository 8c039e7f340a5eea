use thiserror::Error;

/// Error types for Rubika bot operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request never produced a complete HTTP response
    /// (DNS, connection reset, TLS, or timeout)
    #[error("Transport error: {message}")]
    Transport {
        /// Underlying failure as reported by the HTTP stack
        message: String,
        /// Whether the configured timeout ran out
        timed_out: bool,
    },

    /// A request payload could not be serialized to JSON
    #[error("Encode error: {0}")]
    Encode(String),

    /// The service answered with a status outside 200..=299
    #[error("HTTP error (status {status}): {body}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body, decoded lossily as UTF-8
        body: String,
    },

    /// A response or webhook body was not valid JSON
    #[error("Decode error: {0}")]
    Decode(String),
}

impl Error {
    /// Create a new configuration error
    pub fn configuration<S: AsRef<str>>(message: S) -> Self {
        Error::Configuration(message.as_ref().to_string())
    }

    /// Create a new transport error
    pub fn transport<S: AsRef<str>>(message: S) -> Self {
        Error::Transport {
            message: message.as_ref().to_string(),
            timed_out: false,
        }
    }

    /// Create a new transport error for a call that ran out of time
    pub fn timeout<S: AsRef<str>>(message: S) -> Self {
        Error::Transport {
            message: message.as_ref().to_string(),
            timed_out: true,
        }
    }

    /// Create a new encode error
    pub fn encode<S: AsRef<str>>(message: S) -> Self {
        Error::Encode(message.as_ref().to_string())
    }

    /// Create a new decode error
    pub fn decode<S: AsRef<str>>(message: S) -> Self {
        Error::Decode(message.as_ref().to_string())
    }

    /// Whether this is a transport failure caused by the configured timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Transport { timed_out: true, .. })
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}
