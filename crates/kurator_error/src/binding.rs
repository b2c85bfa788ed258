//! Publish binding reconciliation errors.

/// Part of a publish binding that disappeared on the chat platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BindingPart {
    /// The channel holding the summary
    #[display("channel")]
    Channel,
    /// The summary message
    #[display("message")]
    Message,
    /// The companion thread
    #[display("thread")]
    Thread,
}

/// The binding of a project pointed at a deleted resource and was cleared.
///
/// Recoverable: publishing again starts a fresh binding.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Binding of project {} was reset: {} is missing (line {} in {})", project_id, missing, line, file)]
pub struct BindingResetError {
    /// Project whose binding was cleared
    pub project_id: i32,
    /// Resource that was missing
    pub missing: BindingPart,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl BindingResetError {
    /// Create a new BindingResetError with automatic location tracking.
    #[track_caller]
    pub fn new(project_id: i32, missing: BindingPart) -> Self {
        let location = std::panic::Location::caller();
        Self {
            project_id,
            missing,
            line: location.line(),
            file: location.file(),
        }
    }
}
