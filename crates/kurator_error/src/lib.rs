//! Error types for the Kurator bot.
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use kurator_error::{KuratorResult, ValidationError, ValidationErrorKind};
//!
//! fn parse_id(raw: &str) -> KuratorResult<i32> {
//!     raw.trim()
//!         .parse()
//!         .map_err(|_| ValidationError::new(ValidationErrorKind::NotANumber(raw.to_string())).into())
//! }
//!
//! assert!(parse_id("abc").is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod binding;
mod config;
mod database;
mod error;
mod gateway;
mod limit;
mod not_found;
mod validation;
mod wizard;

pub use binding::{BindingPart, BindingResetError};
pub use config::ConfigError;
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{KuratorError, KuratorErrorKind, KuratorResult};
pub use gateway::GatewayError;
pub use limit::{LimitError, LimitKind};
pub use not_found::{NotFoundError, NotFoundErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
pub use wizard::WizardError;
