//! Tests for the scoped interaction collector.

use async_trait::async_trait;
use kurator_core::{
    Actor, Capabilities, CollectedEvent, Collector, CollectorExit, ComponentId, Curator,
    CuratorId, Dispatch, Flow, GuildId, MessageId, Project, ProjectId, RoleId, RoutingTable,
    Selection, SuperRole, UserId,
};
use kurator_error::{GatewayError, KuratorResult};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

const PANEL: MessageId = MessageId(500);
const TTL: Duration = Duration::from_secs(600);
const CURATOR: UserId = UserId(42);

#[derive(Debug, Clone)]
struct TestEvent {
    message_id: MessageId,
    custom_id: String,
    actor: Actor,
}

impl TestEvent {
    fn new(message_id: MessageId, custom_id: &str, user: UserId) -> Self {
        Self {
            message_id,
            custom_id: custom_id.to_string(),
            actor: Actor::new(GuildId(1), user, vec![]),
        }
    }
}

impl CollectedEvent for TestEvent {
    fn message_id(&self) -> MessageId {
        self.message_id
    }

    fn custom_id(&self) -> &str {
        &self.custom_id
    }

    fn actor(&self) -> &Actor {
        &self.actor
    }

    fn selection(&self) -> Selection {
        Selection::None
    }
}

/// Grants curator rights to [`CURATOR`] only and records what it dispatched.
#[derive(Default)]
struct RecordingDispatch {
    seen: Vec<ComponentId>,
    flows: VecDeque<KuratorResult<Flow>>,
}

impl RecordingDispatch {
    fn with_flows(flows: Vec<KuratorResult<Flow>>) -> Self {
        Self {
            seen: Vec::new(),
            flows: flows.into(),
        }
    }
}

#[async_trait]
impl Dispatch<TestEvent> for RecordingDispatch {
    async fn capabilities(&self, event: &TestEvent) -> KuratorResult<Capabilities> {
        let project = Project {
            id: ProjectId(1),
            guild_id: GuildId(1),
            title: "T".to_string(),
            poster: "https://example.com/p.png".to_string(),
            binding: None,
            curator: Some(Curator {
                id: CuratorId(1),
                guild_id: GuildId(1),
                user_id: CURATOR,
                project_id: ProjectId(1),
            }),
        };
        let super_role = SuperRole {
            guild_id: GuildId(1),
            role_id: RoleId(9),
        };
        Ok(Capabilities::evaluate(
            event.actor(),
            Some(&super_role),
            Some(&project),
        ))
    }

    async fn dispatch(&mut self, component: ComponentId, _event: TestEvent) -> KuratorResult<Flow> {
        self.seen.push(component);
        self.flows.pop_front().unwrap_or(Ok(Flow::Continue))
    }
}

fn panel_routes() -> RoutingTable {
    RoutingTable::from_components([
        ComponentId::Publish,
        ComponentId::Preview,
        ComponentId::Delete,
    ])
}

async fn run_with(
    collector: Collector,
    events: Vec<TestEvent>,
    dispatcher: &mut RecordingDispatch,
) -> CollectorExit {
    let (tx, rx) = mpsc::unbounded_channel();
    for event in events {
        tx.send(event).unwrap();
    }
    drop(tx);
    collector
        .run(UnboundedReceiverStream::new(rx), dispatcher)
        .await
}

#[tokio::test]
async fn test_ignores_events_from_other_messages() {
    let mut dispatcher = RecordingDispatch::default();
    let events = vec![
        TestEvent::new(MessageId(501), "project-publish", CURATOR),
        TestEvent::new(MessageId(499), "project-preview", CURATOR),
        TestEvent::new(PANEL, "project-publish", CURATOR),
    ];

    let exit = run_with(Collector::new(PANEL, TTL, panel_routes()), events, &mut dispatcher).await;

    assert_eq!(exit, CollectorExit::Closed);
    assert_eq!(dispatcher.seen, vec![ComponentId::Publish]);
}

#[tokio::test]
async fn test_denied_and_unknown_events_are_dropped() {
    let mut dispatcher = RecordingDispatch::default();
    let events = vec![
        // Curator may not delete.
        TestEvent::new(PANEL, "project-delete", CURATOR),
        // A stranger may not publish.
        TestEvent::new(PANEL, "project-publish", UserId(7)),
        // Unknown id.
        TestEvent::new(PANEL, "project-launch", CURATOR),
        // Known id that this panel does not render.
        TestEvent::new(PANEL, "platform-manage", CURATOR),
        TestEvent::new(PANEL, "project-preview", CURATOR),
    ];

    run_with(Collector::new(PANEL, TTL, panel_routes()), events, &mut dispatcher).await;

    assert_eq!(dispatcher.seen, vec![ComponentId::Preview]);
}

#[tokio::test]
async fn test_owner_filter() {
    let mut dispatcher = RecordingDispatch::default();
    let routes = RoutingTable::from_components([ComponentId::AssignSuperRole]);
    let events = vec![
        TestEvent::new(PANEL, "admin-super-role-select", UserId(7)),
        TestEvent::new(PANEL, "admin-super-role-select", UserId(8)),
    ];

    let collector = Collector::new(PANEL, TTL, routes).owned_by(UserId(8));
    run_with(collector, events, &mut dispatcher).await;

    assert_eq!(dispatcher.seen, vec![ComponentId::AssignSuperRole]);
}

#[tokio::test]
async fn test_finish_stops_collecting() {
    let mut dispatcher = RecordingDispatch::with_flows(vec![Ok(Flow::Finish)]);
    let events = vec![
        TestEvent::new(PANEL, "project-publish", CURATOR),
        TestEvent::new(PANEL, "project-preview", CURATOR),
    ];

    let exit = run_with(Collector::new(PANEL, TTL, panel_routes()), events, &mut dispatcher).await;

    assert_eq!(exit, CollectorExit::Finished);
    assert_eq!(dispatcher.seen, vec![ComponentId::Publish]);
}

#[tokio::test]
async fn test_replace_swaps_routing_table() {
    let next = RoutingTable::new().with(ComponentId::PublishChannel);
    let mut dispatcher = RecordingDispatch::with_flows(vec![Ok(Flow::Replace(next))]);
    let events = vec![
        TestEvent::new(PANEL, "project-publish", CURATOR),
        TestEvent::new(PANEL, "project-preview", CURATOR),
        TestEvent::new(PANEL, "project-publish-channel", CURATOR),
    ];

    run_with(Collector::new(PANEL, TTL, panel_routes()), events, &mut dispatcher).await;

    assert_eq!(
        dispatcher.seen,
        vec![ComponentId::Publish, ComponentId::PublishChannel]
    );
}

#[tokio::test]
async fn test_dispatch_errors_do_not_end_the_loop() {
    let mut dispatcher = RecordingDispatch::with_flows(vec![
        Err(GatewayError::new("500 Internal Server Error").into()),
        Ok(Flow::Continue),
    ]);
    let events = vec![
        TestEvent::new(PANEL, "project-publish", CURATOR),
        TestEvent::new(PANEL, "project-preview", CURATOR),
    ];

    let exit = run_with(Collector::new(PANEL, TTL, panel_routes()), events, &mut dispatcher).await;

    assert_eq!(exit, CollectorExit::Closed);
    assert_eq!(
        dispatcher.seen,
        vec![ComponentId::Publish, ComponentId::Preview]
    );
}

#[tokio::test(start_paused = true)]
async fn test_expires_after_ttl() {
    let mut dispatcher = RecordingDispatch::default();
    let (tx, rx) = mpsc::unbounded_channel();

    tx.send(TestEvent::new(PANEL, "project-preview", CURATOR))
        .unwrap();
    let late = tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(TTL + Duration::from_secs(1)).await;
        let _ = late.send(TestEvent::new(PANEL, "project-publish", CURATOR));
    });

    let exit = Collector::new(PANEL, TTL, panel_routes())
        .run(UnboundedReceiverStream::new(rx), &mut dispatcher)
        .await;

    assert_eq!(exit, CollectorExit::Expired);
    assert_eq!(dispatcher.seen, vec![ComponentId::Preview]);
    drop(tx);
}

#[tokio::test(start_paused = true)]
async fn test_idle_collector_expires_without_error() {
    let mut dispatcher = RecordingDispatch::default();
    let (tx, rx) = mpsc::unbounded_channel::<TestEvent>();

    let started = tokio::time::Instant::now();
    let exit = Collector::new(PANEL, Duration::from_secs(30), panel_routes())
        .run(UnboundedReceiverStream::new(rx), &mut dispatcher)
        .await;

    assert_eq!(exit, CollectorExit::Expired);
    assert!(started.elapsed() >= Duration::from_secs(30));
    assert!(dispatcher.seen.is_empty());
    drop(tx);
}

/// Takes longer than the ttl on every dispatch.
struct SlowDispatch {
    inner: RecordingDispatch,
    delay: Duration,
}

#[async_trait]
impl Dispatch<TestEvent> for SlowDispatch {
    async fn capabilities(&self, event: &TestEvent) -> KuratorResult<Capabilities> {
        self.inner.capabilities(event).await
    }

    async fn dispatch(&mut self, component: ComponentId, event: TestEvent) -> KuratorResult<Flow> {
        tokio::time::sleep(self.delay).await;
        self.inner.dispatch(component, event).await
    }
}

#[tokio::test(start_paused = true)]
async fn test_queued_events_are_dropped_after_expiry() {
    let mut dispatcher = SlowDispatch {
        inner: RecordingDispatch::default(),
        delay: Duration::from_secs(700),
    };
    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(TestEvent::new(PANEL, "project-publish", CURATOR))
        .unwrap();
    tx.send(TestEvent::new(PANEL, "project-preview", CURATOR))
        .unwrap();

    let exit = Collector::new(PANEL, TTL, panel_routes())
        .run(UnboundedReceiverStream::new(rx), &mut dispatcher)
        .await;

    assert_eq!(exit, CollectorExit::Expired);
    assert_eq!(dispatcher.inner.seen, vec![ComponentId::Publish]);
    drop(tx);
}
