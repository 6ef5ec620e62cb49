use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use serde_json::Value;
use thiserror::Error as ThisError;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a single remote fetch. Every variant keeps the endpoint and
/// the underlying cause.
#[derive(Debug, ThisError)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: BoxError,
    },
    #[error("could not reach {url}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },
    #[error("could not decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: BoxError,
    },
}

impl FetchError {
    pub fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        let url = url.to_string();
        if error.is_timeout() {
            FetchError::Timeout {
                url,
                source: Box::new(error),
            }
        } else {
            FetchError::Transport {
                url,
                source: Box::new(error),
            }
        }
    }

    /// Message shown to the user on a failed screen.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::Timeout { .. } | FetchError::Transport { .. } => {
                "Could not reach server"
            }
            FetchError::Status { .. } | FetchError::Decode { .. } => {
                "Unexpected response from server"
            }
        }
    }
}

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("{key} has an invalid value {value:?}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug)]
pub struct Error {
    pub code: StatusCode,
    pub body: Json<Value>,
}

impl Error {
    pub fn new(code: StatusCode, message: &str) -> Self {
        Self {
            code,
            body: Json(json!({"error": message})),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.code, self.body).into_response()
    }
}

impl From<(StatusCode, &str)> for Error {
    fn from((code, msg): (StatusCode, &str)) -> Self {
        Self::new(code, msg)
    }
}

impl From<FetchError> for Error {
    fn from(error: FetchError) -> Self {
        tracing::warn!("{:?}", error);
        Self::new(StatusCode::BAD_GATEWAY, error.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn io_cause(kind: io::ErrorKind) -> BoxError {
        Box::new(io::Error::new(kind, "boom"))
    }

    #[test]
    fn transport_failures_share_the_unreachable_message() {
        let timeout = FetchError::Timeout {
            url: "http://api/drivers".into(),
            source: io_cause(io::ErrorKind::TimedOut),
        };
        let refused = FetchError::Transport {
            url: "http://api/drivers".into(),
            source: io_cause(io::ErrorKind::ConnectionRefused),
        };
        assert_eq!(timeout.user_message(), "Could not reach server");
        assert_eq!(refused.user_message(), "Could not reach server");
    }

    #[test]
    fn fetch_error_maps_to_bad_gateway() {
        let error: Error = FetchError::Status {
            url: "http://api/schedule".into(),
            status: StatusCode::NOT_FOUND,
        }
        .into();
        assert_eq!(error.code, StatusCode::BAD_GATEWAY);
        assert_eq!(error.body.0["error"], "Unexpected response from server");
    }

    #[test]
    fn fetch_error_keeps_its_cause() {
        use std::error::Error as _;
        let error = FetchError::Decode {
            url: "http://api/schedule".into(),
            source: io_cause(io::ErrorKind::InvalidData),
        };
        assert!(error.source().is_some());
        assert_eq!(
            error.to_string(),
            "could not decode response from http://api/schedule"
        );
    }
}
