//! Discord front end of the Kurator bot.
//!
//! Wires the [`kurator_core`] services to serenity: slash commands and the
//! `Edit project` context menu, the project panel with its sub-panels and
//! wizards, and the [`PublishGateway`](kurator_core::PublishGateway) posting
//! summaries.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod app;
mod client;
pub mod commands;
mod conversions;
mod error;
mod gateway;
mod handler;
pub mod panel;
pub mod views;

pub use app::Kurator;
pub use client::{BotOptions, KuratorBot};
pub use conversions::{
    PanelEvent, actor, channel_id, guild_id, message_id, modal_value, selection, to_channel,
    to_message, user_id,
};
pub use error::{DiscordError, DiscordErrorKind, DiscordResult};
pub use gateway::SerenityPublishGateway;
pub use handler::KuratorHandler;
pub use views::BotIdentity;
