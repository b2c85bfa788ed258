//! Kurator binary support: configuration, logging and the CLI.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod observability;

pub use config::{
    CollectorSettings, DatabaseSettings, DiscordSettings, KuratorConfig, LoggingSettings,
};
