//! Per-project capacity limits.

/// Which limited collection overflowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum LimitKind {
    /// Platforms attached to a project
    #[display("platforms")]
    Platforms,
    /// Staff members of a project
    #[display("staff")]
    Staff,
}

/// A project already holds the maximum number of entries.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Limit Error: cannot add more than {} {} at line {} in {}", limit, kind, line, file)]
pub struct LimitError {
    /// Collection that overflowed
    pub kind: LimitKind,
    /// Configured maximum
    pub limit: usize,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl LimitError {
    /// Create a new LimitError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: LimitKind, limit: usize) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            limit,
            line: location.line(),
            file: location.file(),
        }
    }
}
