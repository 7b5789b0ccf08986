/// Configures per-request HTTP behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-request timeout in milliseconds. An expired timeout surfaces as a
    /// transport error.
    pub timeout_ms: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self { timeout_ms: 10_000 }
    }
}
