//! Discord-specific error types.

use derive_getters::Getters;
use kurator_error::GatewayError;

/// Discord error variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DiscordErrorKind {
    /// Serenity API error (HTTP error, gateway error, rate limit).
    #[display("Serenity API error: {_0}")]
    SerenityError(String),

    /// Connection to Discord gateway failed.
    #[display("Connection failed: {_0}")]
    ConnectionFailed(String),

    /// Command registration failed.
    #[display("Command registration failed: {_0}")]
    RegistrationFailed(String),
}

/// Discord error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Discord Error: {} at line {} in {}", kind, line, file)]
pub struct DiscordError {
    kind: DiscordErrorKind,
    line: u32,
    file: &'static str,
}

impl DiscordError {
    /// Create a new DiscordError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use kurator_discord::{DiscordError, DiscordErrorKind};
    ///
    /// let err = DiscordError::new(DiscordErrorKind::ConnectionFailed("closed".into()));
    /// assert!(err.to_string().contains("closed"));
    /// ```
    #[track_caller]
    pub fn new(kind: DiscordErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Result type for Discord operations.
pub type DiscordResult<T> = Result<T, DiscordError>;

impl From<serenity::Error> for DiscordError {
    #[track_caller]
    fn from(err: serenity::Error) -> Self {
        DiscordError::new(DiscordErrorKind::SerenityError(err.to_string()))
    }
}

impl From<DiscordError> for GatewayError {
    #[track_caller]
    fn from(err: DiscordError) -> Self {
        GatewayError::new(err.kind.to_string())
    }
}

/// Serenity failure as a domain error.
#[track_caller]
pub(crate) fn gateway(err: serenity::Error) -> kurator_error::KuratorError {
    GatewayError::from(DiscordError::from(err)).into()
}

/// Whether the error is Discord's 404 for a deleted or unknown resource.
pub(crate) fn is_not_found(err: &serenity::Error) -> bool {
    match err {
        serenity::Error::Http(http) => http.status_code().is_some_and(|s| s.as_u16() == 404),
        _ => false,
    }
}
