//! Chat platform API errors.

/// Failure talking to the chat platform (HTTP error, rejected request).
///
/// Produced at the seam between the domain services and the platform client,
/// so the domain does not depend on the client library's error type.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Gateway Error: {} at line {} in {}", message, line, file)]
pub struct GatewayError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl GatewayError {
    /// Create a new GatewayError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
