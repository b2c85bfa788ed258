//! Persisted domain records.

use crate::{
    ChannelId, CuratorId, EmployeeId, GuildId, MessageId, PlatformId, ProjectId, RoleId, UserId,
};
use serde::{Deserialize, Serialize};

/// Maximum number of platforms per project (select menu option limit).
pub const PLATFORM_LIMIT: usize = 25;

/// Maximum number of staff rows per project.
pub const EMPLOYEE_LIMIT: usize = 25;

/// Maximum length of a project title.
pub const TITLE_MAX_LENGTH: usize = 255;

/// Maximum length of a platform name (select option label limit).
pub const PLATFORM_NAME_MAX_LENGTH: usize = 100;

/// Name of the thread created under a published summary.
pub const THREAD_NAME: &str = "Title materials";

/// Where a project's summary is published.
///
/// Channel, message and thread always travel together: a project is either
/// fully bound or not bound at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublishBinding {
    /// Channel holding the summary message
    pub channel_id: ChannelId,
    /// Summary message
    pub message_id: MessageId,
    /// Thread started on the summary message
    pub branch_id: ChannelId,
}

impl PublishBinding {
    /// Build a binding from nullable storage columns.
    ///
    /// Returns `None` unless all three columns are present.
    pub fn from_parts(
        channel_id: Option<ChannelId>,
        message_id: Option<MessageId>,
        branch_id: Option<ChannelId>,
    ) -> Option<Self> {
        match (channel_id, message_id, branch_id) {
            (Some(channel_id), Some(message_id), Some(branch_id)) => Some(Self {
                channel_id,
                message_id,
                branch_id,
            }),
            _ => None,
        }
    }
}

/// User bound to a project with project-scoped rights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Curator {
    /// Record id
    pub id: CuratorId,
    /// Guild the curator belongs to
    pub guild_id: GuildId,
    /// Curating user
    pub user_id: UserId,
    /// Curated project
    pub project_id: ProjectId,
}

/// A creative work managed by the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Record id
    pub id: ProjectId,
    /// Owning guild
    pub guild_id: GuildId,
    /// Title, unique per guild ignoring case
    pub title: String,
    /// Poster image URL
    pub poster: String,
    /// Published summary location
    pub binding: Option<PublishBinding>,
    /// Assigned curator
    pub curator: Option<Curator>,
}

impl Project {
    /// Whether the given user curates this project.
    pub fn is_curated_by(&self, user: UserId) -> bool {
        self.curator.as_ref().is_some_and(|c| c.user_id == user)
    }
}

/// Fields required to create a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    /// Owning guild
    pub guild_id: GuildId,
    /// Validated title
    pub title: String,
    /// Validated poster URL
    pub poster: String,
}

/// Staff professions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Profession {
    /// Translates the source text
    Translator,
    /// Proofreads translations
    Editor,
    /// Cleans raw pages
    Cleaner,
    /// Typesets translated text
    Typer,
    /// Reads the release before publication
    BetaReader,
}

impl Profession {
    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Profession::Translator => "Translator",
            Profession::Editor => "Editor",
            Profession::Cleaner => "Cleaner",
            Profession::Typer => "Typer",
            Profession::BetaReader => "Beta reader",
        }
    }

    /// Storage and select-menu value (e.g. `BETA_READER`).
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Staff member of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Record id
    pub id: EmployeeId,
    /// Project the employee works on
    pub project_id: ProjectId,
    /// Working user
    pub user_id: UserId,
    /// Role in the team
    pub profession: Profession,
}

/// Site where a project can be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    /// Record id
    pub id: PlatformId,
    /// Owning project
    pub project_id: ProjectId,
    /// Display name, unique per project ignoring case
    pub name: String,
    /// Link to the project on the platform
    pub url: String,
}

/// Guild role granting super-user rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuperRole {
    /// Guild being configured
    pub guild_id: GuildId,
    /// Role granting super-user rights
    pub role_id: RoleId,
}

/// Compare names the way titles and platform names are deduplicated.
pub fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
