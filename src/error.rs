use crate::wire::ErrorBody;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum ReqresError {
    /// Network or request execution error from `reqwest`, raised before any
    /// response was obtained (connect failure, reset, timeout).
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Non-success HTTP status code with raw response body.
    #[error("request failed: {status} - {body}")]
    RequestFailed { status: u16, body: String },
    /// A 2xx response whose body does not match the declared shape.
    #[error("parse failure: {message}; body: {body}")]
    Parse {
        /// Deserializer error text.
        message: String,
        /// Raw body as received.
        body: String,
    },
    /// Argument rejected before any request was sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Missing or malformed harness configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ReqresError {
    /// HTTP status of a [`ReqresError::RequestFailed`], if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Network failures and server errors (5xx) are presumed recoverable.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::RequestFailed { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The `error` field of a JSON error body, e.g. `"Missing password"`.
    pub fn api_message(&self) -> Option<String> {
        match self {
            Self::RequestFailed { body, .. } => serde_json::from_str::<ErrorBody>(body)
                .ok()
                .map(|parsed| parsed.error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ReqresError;

    #[test]
    fn request_failed_message_carries_status_and_body() {
        let err = ReqresError::RequestFailed {
            status: 400,
            body: r#"{"error":"Missing password"}"#.to_owned(),
        };
        let message = err.to_string();
        assert!(message.contains("400"));
        assert!(message.contains("Missing password"));
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.api_message().as_deref(), Some("Missing password"));
    }

    #[test]
    fn only_server_errors_are_transient() {
        let server = ReqresError::RequestFailed {
            status: 503,
            body: String::new(),
        };
        let client = ReqresError::RequestFailed {
            status: 404,
            body: "{}".to_owned(),
        };
        assert!(server.is_transient());
        assert!(!client.is_transient());
        assert!(!ReqresError::InvalidInput("page".to_owned()).is_transient());
    }

    #[test]
    fn api_message_is_none_for_non_json_bodies() {
        let err = ReqresError::RequestFailed {
            status: 502,
            body: "<html>Bad Gateway</html>".to_owned(),
        };
        assert_eq!(err.api_message(), None);
        assert_eq!(ReqresError::Config("x".to_owned()).status(), None);
    }
}
