/*
[INPUT]:  Error sources (configuration, cipher, transport, HTTP status, JSON decoding)
[OUTPUT]: Structured error types with operation context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the PayAgency SDK
#[derive(Error, Debug)]
pub enum PayAgencyError {
    /// Missing credentials, unknown operation or malformed endpoint usage
    #[error("Configuration error: {0}")]
    Config(String),

    /// Payload could not be encrypted; nothing was sent
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// Transport failure or non-success HTTP status
    #[error("{operation} request failed: {cause}")]
    RequestFailed {
        operation: &'static str,
        #[source]
        cause: RequestFailure,
    },

    /// Success response whose body is not valid JSON
    #[error("{operation} returned an undecodable response: {source}")]
    ResponseDecode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Caller payload has the wrong shape for the operation
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Request body serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Why a dispatched request did not produce a success response
#[derive(Error, Debug)]
pub enum RequestFailure {
    /// Connection, TLS or timeout failure before a status was received
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The remote service answered with a non-2xx status
    #[error("remote rejected request with status {status}")]
    Status {
        status: StatusCode,
        body: Option<String>,
    },
}

impl PayAgencyError {
    pub(crate) fn transport(operation: &'static str, err: reqwest::Error) -> Self {
        PayAgencyError::RequestFailed {
            operation,
            cause: RequestFailure::Transport(err),
        }
    }

    pub(crate) fn rejected(
        operation: &'static str,
        status: StatusCode,
        body: Option<String>,
    ) -> Self {
        PayAgencyError::RequestFailed {
            operation,
            cause: RequestFailure::Status { status, body },
        }
    }

    /// HTTP status of a rejected request
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            PayAgencyError::RequestFailed {
                cause: RequestFailure::Status { status, .. },
                ..
            } => Some(*status),
            PayAgencyError::RequestFailed {
                cause: RequestFailure::Transport(err),
                ..
            } => err.status(),
            _ => None,
        }
    }

    /// Response body of a rejected request, if it could be read
    pub fn response_body(&self) -> Option<&str> {
        match self {
            PayAgencyError::RequestFailed {
                cause: RequestFailure::Status { body, .. },
                ..
            } => body.as_deref(),
            _ => None,
        }
    }

    /// Operation label for errors raised while talking to the API
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            PayAgencyError::RequestFailed { operation, .. }
            | PayAgencyError::ResponseDecode { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// Check if the request never got an HTTP answer
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            PayAgencyError::RequestFailed {
                cause: RequestFailure::Transport(_),
                ..
            }
        )
    }

    /// Check if the error is worth retrying.
    ///
    /// The SDK never retries on its own; this is a hint for caller-side policies.
    pub fn is_retryable(&self) -> bool {
        if self.is_transport() {
            return true;
        }
        match self.status() {
            Some(status) => {
                status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            None => false,
        }
    }
}

/// Result type alias for PayAgency operations
pub type Result<T> = std::result::Result<T, PayAgencyError>;
