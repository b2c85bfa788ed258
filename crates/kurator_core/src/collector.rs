//! Time-bounded interaction collector scoped to one rendered message.

use crate::{Actor, Capabilities, ChannelId, ComponentId, MessageId, RoleId, RoutingTable, UserId};
use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use kurator_error::KuratorResult;
use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, error, instrument, trace, warn};

/// Default lifetime of a collector.
pub const DEFAULT_COLLECTOR_TTL: Duration = Duration::from_secs(600);

/// User picked in a user select menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectedUser {
    /// Selected user
    pub id: UserId,
    /// Whether the account is a bot
    pub bot: bool,
}

/// Values carried by a component interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Button press
    #[default]
    None,
    /// String select values
    Strings(Vec<String>),
    /// User select values
    Users(Vec<SelectedUser>),
    /// Role select values
    Roles(Vec<RoleId>),
    /// Channel select values
    Channels(Vec<ChannelId>),
}

impl Selection {
    /// First selected string value.
    pub fn first_string(&self) -> Option<&str> {
        match self {
            Selection::Strings(values) => values.first().map(String::as_str),
            _ => None,
        }
    }

    /// First selected user.
    pub fn first_user(&self) -> Option<SelectedUser> {
        match self {
            Selection::Users(users) => users.first().copied(),
            _ => None,
        }
    }

    /// First selected role.
    pub fn first_role(&self) -> Option<RoleId> {
        match self {
            Selection::Roles(roles) => roles.first().copied(),
            _ => None,
        }
    }

    /// First selected channel.
    pub fn first_channel(&self) -> Option<ChannelId> {
        match self {
            Selection::Channels(channels) => channels.first().copied(),
            _ => None,
        }
    }
}

/// A component interaction as the collector sees it.
pub trait CollectedEvent: Send + Sync {
    /// Message the component belongs to.
    fn message_id(&self) -> MessageId;
    /// Raw custom id of the component.
    fn custom_id(&self) -> &str;
    /// User who triggered the interaction.
    fn actor(&self) -> &Actor;
    /// Values submitted with the interaction.
    fn selection(&self) -> Selection;
}

/// What the collector does after a dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Keep the current routing table
    Continue,
    /// The rendered components changed; route against the new table
    Replace(RoutingTable),
    /// Stop collecting
    Finish,
}

/// Why a collector stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorExit {
    /// The time-to-live elapsed
    Expired,
    /// A dispatcher returned [`Flow::Finish`]
    Finished,
    /// The event stream ended
    Closed,
}

/// Handles the events a collector lets through.
#[async_trait]
pub trait Dispatch<E: CollectedEvent>: Send + Sync {
    /// Capabilities of the event's actor against current state.
    async fn capabilities(&self, event: &E) -> KuratorResult<Capabilities>;

    /// Handle an event that matched a permitted route.
    async fn dispatch(&mut self, component: ComponentId, event: E) -> KuratorResult<Flow>;
}

/// Listens for component events on one message for a bounded time.
#[derive(Debug, Clone)]
pub struct Collector {
    message_id: MessageId,
    ttl: Duration,
    routes: RoutingTable,
    owner: Option<UserId>,
}

impl Collector {
    /// Collector for `message_id` accepting the components in `routes`.
    pub fn new(message_id: MessageId, ttl: Duration, routes: RoutingTable) -> Self {
        Self {
            message_id,
            ttl,
            routes,
            owner: None,
        }
    }

    /// Only accept events from `user`.
    pub fn owned_by(mut self, user: UserId) -> Self {
        self.owner = Some(user);
        self
    }

    /// Message the collector is attached to.
    pub fn message_id(&self) -> MessageId {
        self.message_id
    }

    /// Current routing table.
    pub fn routes(&self) -> &RoutingTable {
        &self.routes
    }

    /// Consume events until the ttl elapses, the dispatcher finishes, or the stream ends.
    ///
    /// Events for other messages, from non-owners, with unknown ids or without
    /// a permitted route are dropped without reply. Dispatcher errors are
    /// logged and collection continues.
    #[instrument(skip_all, fields(message_id = %self.message_id, ttl = ?self.ttl))]
    pub async fn run<E, S, D>(mut self, events: S, dispatcher: &mut D) -> CollectorExit
    where
        E: CollectedEvent,
        S: Stream<Item = E> + Send,
        D: Dispatch<E>,
    {
        let deadline = Instant::now() + self.ttl;
        let mut events = std::pin::pin!(events);

        loop {
            // Expiry wins over events already queued.
            let event = tokio::select! {
                biased;
                _ = sleep_until(deadline) => return self.expire(),
                event = events.next() => match event {
                    None => return CollectorExit::Closed,
                    Some(event) => event,
                },
            };

            if event.message_id() != self.message_id {
                trace!(other = %event.message_id(), "Ignoring event for another message");
                continue;
            }
            if self.owner.is_some_and(|owner| owner != event.actor().user_id) {
                trace!(user_id = %event.actor().user_id, "Ignoring event from non-owner");
                continue;
            }
            let Ok(component) = event.custom_id().parse::<ComponentId>() else {
                trace!(custom_id = event.custom_id(), "Ignoring unknown component");
                continue;
            };
            if !self.routes.contains(component) {
                trace!(%component, "Component not routed");
                continue;
            }

            let capabilities = match dispatcher.capabilities(&event).await {
                Ok(capabilities) => capabilities,
                Err(e) => {
                    error!(error = %e, %component, "Failed to resolve capabilities");
                    continue;
                }
            };
            if Instant::now() >= deadline {
                return self.expire();
            }
            if self.routes.resolve(component, &capabilities).is_none() {
                debug!(%component, user_id = %event.actor().user_id, "Permission denied");
                continue;
            }

            match dispatcher.dispatch(component, event).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Replace(routes)) => self.routes = routes,
                Ok(Flow::Finish) => {
                    debug!(%component, "Collector finished");
                    return CollectorExit::Finished;
                }
                Err(e) if e.is_recoverable() => warn!(error = %e, %component, "Dispatch rejected"),
                Err(e) => error!(error = %e, %component, "Dispatch failed"),
            }
        }
    }

    fn expire(&mut self) -> CollectorExit {
        debug!("Collector expired");
        self.routes.clear();
        CollectorExit::Expired
    }
}
