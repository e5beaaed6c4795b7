use bot_content::FarmLoader;
use bot_core::{HaltReason, Severity, StateKind, ToolOutcome};
use runtime::{AgentEvent, Event, Runtime, RuntimeConfig, Topic};
use tokio::sync::broadcast;

fn config() -> RuntimeConfig {
    RuntimeConfig {
        event_buffer_size: 1024,
        ..RuntimeConfig::default()
    }
}

fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn agent_events(events: &[Event]) -> Vec<&AgentEvent> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Agent(agent) => Some(agent),
            Event::Notice(_) => None,
        })
        .collect()
}

/// The homestead can starts with three charges for six dry plots, so the
/// agent has to walk to the pond once before it can finish.
#[tokio::test]
async fn homestead_is_watered_with_one_refill() {
    let farm = FarmLoader::embedded("homestead").expect("embedded farm");
    let dry_before = farm.dry_plots();

    let runtime = Runtime::builder()
        .config(config())
        .farm(farm)
        .build()
        .await
        .expect("Runtime should start successfully");
    let handle = runtime.handle();
    let mut agent_rx = handle.subscribe(Topic::Agent);
    let mut notice_rx = handle.subscribe(Topic::Notice);

    let status = handle.set_active(true).await.expect("activate");
    assert!(status.active);

    let summary = handle.run_until_halt(20_000).await.expect("agent halts");
    assert_eq!(summary.reason, HaltReason::WorkComplete);
    assert!(!summary.status.active);
    assert_eq!(summary.status.dry_plots, 0);

    let farm = handle.query_farm().await.expect("farm snapshot");
    assert_eq!(farm.dry_plots(), 0);
    assert_eq!(farm.watered_plots(), dry_before + 2);

    let events = drain(&mut agent_rx);
    let agent = agent_events(&events);

    let acted: Vec<_> = agent
        .iter()
        .filter_map(|event| match event {
            AgentEvent::Acted { outcome, .. } => Some(*outcome),
            _ => None,
        })
        .collect();
    assert_eq!(acted, vec![ToolOutcome::Applied; dry_before]);

    let refills = agent
        .iter()
        .filter(|event| matches!(event, AgentEvent::Refilled { charge: 40, .. }))
        .count();
    assert_eq!(refills, 1);

    assert!(matches!(
        agent.first(),
        Some(AgentEvent::Activation { active: true, .. })
    ));
    assert!(matches!(
        agent.last(),
        Some(AgentEvent::Halted {
            reason: HaltReason::WorkComplete,
            ..
        })
    ));

    // Events are emitted in tick order.
    let ticks: Vec<u64> = agent.iter().map(|event| event.tick()).collect();
    assert!(ticks.windows(2).all(|pair| pair[0] <= pair[1]));

    let notices = drain(&mut notice_rx);
    assert_eq!(notices.len(), 1);
    match &notices[0] {
        Event::Notice(notice) => {
            assert_eq!(notice.notice.message, "Done!");
            assert_eq!(notice.notice.severity, Severity::Info);
        }
        other => panic!("unexpected event on notice topic: {other:?}"),
    }

    drop(handle);
    runtime.shutdown().await.expect("clean shutdown");
}

#[tokio::test]
async fn drought_runs_dry_and_gives_up() {
    let farm = FarmLoader::embedded("drought").expect("embedded farm");
    let dry_before = farm.dry_plots();
    let charge = farm.can.charge as usize;

    let runtime = Runtime::builder()
        .config(config())
        .farm(farm)
        .build()
        .await
        .expect("Runtime should start successfully");
    let handle = runtime.handle();
    let mut notice_rx = handle.subscribe(Topic::Notice);

    handle.set_active(true).await.expect("activate");
    let summary = handle.run_until_halt(20_000).await.expect("agent halts");

    assert_eq!(
        summary.reason,
        HaltReason::ResourceExhausted { radius: 20 }
    );
    assert_eq!(summary.status.charge, 0);
    assert_eq!(summary.status.dry_plots, dry_before - charge);

    let notices = drain(&mut notice_rx);
    assert!(matches!(
        notices.as_slice(),
        [Event::Notice(notice)] if notice.notice.message == "No water nearby!"
            && notice.notice.severity == Severity::Error
    ));
}

#[tokio::test]
async fn transitions_follow_the_cycle() {
    let farm = FarmLoader::embedded("drought").expect("embedded farm");
    let runtime = Runtime::builder()
        .config(config())
        .farm(farm)
        .build()
        .await
        .expect("Runtime should start successfully");
    let handle = runtime.handle();
    let mut agent_rx = handle.subscribe(Topic::Agent);

    handle.set_active(true).await.expect("activate");
    handle.run_until_halt(20_000).await.expect("agent halts");

    let events = drain(&mut agent_rx);
    let path: Vec<(StateKind, StateKind)> = agent_events(&events)
        .into_iter()
        .filter_map(|event| match event {
            AgentEvent::Transition { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
        .collect();

    let water_once = [
        (StateKind::Idle, StateKind::MovingToWork),
        (StateKind::MovingToWork, StateKind::Acting),
        (StateKind::Acting, StateKind::Idle),
    ];
    assert_eq!(path, [water_once, water_once].concat());
}

#[tokio::test]
async fn events_serialize_for_logging() {
    let farm = FarmLoader::embedded("drought").expect("embedded farm");
    let runtime = Runtime::builder()
        .config(config())
        .farm(farm)
        .build()
        .await
        .expect("Runtime should start successfully");
    let handle = runtime.handle();
    let mut agent_rx = handle.subscribe(Topic::Agent);

    handle.set_active(true).await.expect("activate");
    handle.run_until_halt(20_000).await.expect("agent halts");

    let last = drain(&mut agent_rx).pop().expect("at least one event");
    let json = serde_json::to_string(&last).expect("serializable event");
    assert!(json.contains("ResourceExhausted"), "{json}");

    let back: Event = serde_json::from_str(&json).expect("round trip");
    assert_eq!(back, last);
}
