//! Top-level error wrapper types.

use crate::{
    BindingResetError, ConfigError, DatabaseError, GatewayError, LimitError, NotFoundError,
    ValidationError, WizardError,
};

/// Every error condition the bot can surface.
///
/// # Examples
///
/// ```
/// use kurator_error::{KuratorError, GatewayError};
///
/// let err: KuratorError = GatewayError::new("503 Service Unavailable").into();
/// assert!(format!("{}", err).contains("Gateway Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum KuratorErrorKind {
    /// User input rejected
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Record or platform resource missing
    #[from(NotFoundError)]
    NotFound(NotFoundError),
    /// Project capacity exceeded
    #[from(LimitError)]
    Limit(LimitError),
    /// Publish binding cleared after a resource went missing
    #[from(BindingResetError)]
    BindingReset(BindingResetError),
    /// Wizard received an out-of-order input
    #[from(WizardError)]
    Wizard(WizardError),
    /// Persistence failure
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Chat platform API failure
    #[from(GatewayError)]
    Gateway(GatewayError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Kurator error with kind discrimination.
///
/// # Examples
///
/// ```
/// use kurator_error::{KuratorResult, LimitError, LimitKind};
///
/// fn add_platform(count: usize) -> KuratorResult<()> {
///     if count + 1 >= 25 {
///         Err(LimitError::new(LimitKind::Platforms, 25))?
///     }
///     Ok(())
/// }
///
/// let err = add_platform(24).unwrap_err();
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Kurator Error: {}", _0)]
pub struct KuratorError(Box<KuratorErrorKind>);

impl KuratorError {
    /// Create a new error from a kind.
    pub fn new(kind: KuratorErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &KuratorErrorKind {
        &self.0
    }

    /// Whether the user can fix the problem by changing input or retrying the command.
    ///
    /// Backend failures (database, chat platform, configuration) are not recoverable
    /// and should be logged and answered with a generic failure message.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.kind(),
            KuratorErrorKind::Validation(_)
                | KuratorErrorKind::NotFound(_)
                | KuratorErrorKind::Limit(_)
                | KuratorErrorKind::BindingReset(_)
                | KuratorErrorKind::Wizard(_)
        )
    }
}

// Generic From implementation for any type that converts to KuratorErrorKind
impl<T> From<T> for KuratorError
where
    T: Into<KuratorErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Kurator operations.
pub type KuratorResult<T> = std::result::Result<T, KuratorError>;
