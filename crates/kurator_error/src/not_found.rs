//! Missing-record error types.

/// What could not be found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum NotFoundErrorKind {
    /// Project by id
    #[display("Project not found: {}", _0)]
    Project(i32),
    /// Project by title or search text
    #[display("Project not found: {}", _0)]
    ProjectTitle(String),
    /// Project bound to a published message
    #[display("No project is bound to message {}", _0)]
    ProjectMessage(u64),
    /// Platform by id
    #[display("Platform not found: {}", _0)]
    Platform(i32),
    /// Guild channel
    #[display("Channel not found: {}", _0)]
    Channel(u64),
    /// Message in a channel
    #[display("Message not found: {}", _0)]
    Message(u64),
    /// Thread
    #[display("Thread not found: {}", _0)]
    Thread(u64),
    /// Super role configuration for a guild
    #[display("Super role is not configured for guild {}", _0)]
    SuperRole(u64),
}

/// Not-found error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Not Found Error: {} at line {} in {}", kind, line, file)]
pub struct NotFoundError {
    /// The kind of error that occurred
    pub kind: NotFoundErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl NotFoundError {
    /// Create a new NotFoundError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: NotFoundErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
