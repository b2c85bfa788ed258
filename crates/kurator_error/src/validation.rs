//! Validation error types for user-supplied input.

/// Reasons user input was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ValidationErrorKind {
    /// Value was expected to be numeric
    #[display("Value is not a number: {}", _0)]
    NotANumber(String),
    /// Value is not an http(s) URL
    #[display("Value is not a valid URL: {}", _0)]
    InvalidUrl(String),
    /// URL does not point at an image
    #[display("URL does not point at an image: {}", _0)]
    NotAnImage(String),
    /// A project with this title already exists in the guild
    #[display("Project already exists: {}", _0)]
    DuplicateTitle(String),
    /// A platform with this name already exists in the project
    #[display("Platform already exists: {}", _0)]
    DuplicatePlatform(String),
    /// Required field was empty
    #[display("Field '{}' must not be empty", _0)]
    EmptyField(&'static str),
    /// Field exceeded its maximum length
    #[display("Field '{}' exceeds {} characters", field, max)]
    TooLong {
        /// Field name
        field: &'static str,
        /// Maximum allowed length
        max: usize,
    },
    /// Bots cannot hold project roles
    #[display("Bot accounts cannot be assigned to projects")]
    BotUser,
    /// Unknown profession identifier
    #[display("Unknown profession: {}", _0)]
    UnknownProfession(String),
    /// Modal custom id not produced by this bot
    #[display("Unknown modal: {}", _0)]
    UnknownModal(String),
    /// Interaction happened outside of a guild
    #[display("Interaction must happen inside a guild")]
    NotInGuild,
}

/// Validation error with source location tracking.
///
/// # Examples
///
/// ```
/// use kurator_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::BotUser);
/// assert!(format!("{}", err).contains("Bot accounts"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
