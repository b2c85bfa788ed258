//! Wizard transition errors.

/// An input arrived that the current wizard step does not accept.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Wizard Error: '{}' is not accepted while {} (line {} in {})", input, state, line, file)]
pub struct WizardError {
    /// Step the wizard was in
    pub state: String,
    /// Input that was rejected
    pub input: String,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl WizardError {
    /// Create a new WizardError with automatic location tracking.
    #[track_caller]
    pub fn new(state: impl Into<String>, input: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            state: state.into(),
            input: input.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
