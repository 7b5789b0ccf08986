use serde::Deserialize;

/// Error body shape used by the auth endpoints: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
