//! Order status trigger: properties and end-to-end scenarios

mod common;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use common::{Fixture, RecordingGateway};
use notify_server::{SuppressReason, TriggerOutcome};
use shared::models::{OrderSnapshot, OrderStatus, OrderUpdateEvent, Recipients, StaffRole};

fn now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_750_000_000, 0).unwrap()
}

fn snapshot(status: &str) -> OrderSnapshot {
    OrderSnapshot {
        status: OrderStatus::from(status),
        created_at: Some(now()),
        table_number: None,
        server_id: None,
    }
}

fn event(before: OrderSnapshot, after: OrderSnapshot) -> OrderUpdateEvent {
    OrderUpdateEvent {
        order_id: "o1".to_string(),
        before: Some(before),
        after: Some(after),
    }
}

async fn kitchen() -> Fixture {
    let fx = Fixture::new().await;
    fx.add_staff("c1", StaffRole::Chef, true, Some("t1")).await;
    fx.add_staff("c2", StaffRole::Chef, true, Some("t2")).await;
    fx.add_staff("c3", StaffRole::Chef, false, Some("t-inactive")).await;
    fx.add_staff("c4", StaffRole::Chef, true, None).await;
    fx.add_staff("s1", StaffRole::Server, true, Some("tok")).await;
    fx.add_staff("s2", StaffRole::Server, true, None).await;
    fx
}

#[tokio::test]
async fn equal_statuses_dispatch_nothing() {
    let fx = kitchen().await;
    let trigger = fx.state().order_trigger();

    for status in ["pending", "ready", "served", "cancelled"] {
        let mut after = snapshot(status);
        after.server_id = Some("s1".into());
        let outcome = trigger
            .handle_at(&event(snapshot(status), after), now())
            .await
            .unwrap();
        assert_eq!(outcome, TriggerOutcome::Suppressed(SuppressReason::NoTransition));
    }
    assert!(fx.push.calls().is_empty());
}

#[tokio::test]
async fn stale_pending_dispatches_nothing() {
    let fx = kitchen().await;
    let trigger = fx.state().order_trigger();

    for age in [Duration::seconds(121), Duration::minutes(5), Duration::hours(3)] {
        let mut after = snapshot("pending");
        after.created_at = Some(now() - age);
        let outcome = trigger
            .handle_at(&event(snapshot("draft"), after), now())
            .await
            .unwrap();
        assert_eq!(outcome, TriggerOutcome::Suppressed(SuppressReason::Stale));
    }
    assert!(fx.push.calls().is_empty());
}

#[tokio::test]
async fn fresh_pending_reaches_only_active_chefs_in_one_call() {
    let fx = kitchen().await;
    let trigger = fx.state().order_trigger();

    let mut after = snapshot("pending");
    after.created_at = Some(now() - Duration::seconds(119));
    let outcome = trigger
        .handle_at(&event(snapshot("draft"), after), now())
        .await
        .unwrap();

    assert_eq!(outcome, TriggerOutcome::Dispatched { recipients: 2 });
    let calls = fx.push.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].0,
        Recipients::Multicast(vec!["t1".to_string(), "t2".to_string()])
    );
    assert!(!calls[0].0.tokens().contains(&"t-inactive".to_string()));
}

#[tokio::test]
async fn pending_without_chef_tokens_is_suppressed() {
    let fx = Fixture::new().await;
    fx.add_staff("c1", StaffRole::Chef, false, Some("t1")).await;
    fx.add_staff("c2", StaffRole::Chef, true, Some("")).await;

    let outcome = fx
        .state()
        .order_trigger()
        .handle_at(&event(snapshot("draft"), snapshot("pending")), now())
        .await
        .unwrap();
    assert_eq!(outcome, TriggerOutcome::Suppressed(SuppressReason::NoChefTokens));
    assert!(fx.push.calls().is_empty());
}

#[tokio::test]
async fn duplicate_chef_tokens_are_sent_once() {
    let fx = Fixture::new().await;
    fx.add_staff("c1", StaffRole::Chef, true, Some("shared")).await;
    fx.add_staff("c2", StaffRole::Chef, true, Some("shared")).await;
    fx.add_staff("c3", StaffRole::Chef, true, Some("own")).await;

    fx.state()
        .order_trigger()
        .handle_at(&event(snapshot("draft"), snapshot("pending")), now())
        .await
        .unwrap();

    let calls = fx.push.calls();
    assert_eq!(
        calls[0].0,
        Recipients::Multicast(vec!["shared".to_string(), "own".to_string()])
    );
}

#[tokio::test]
async fn pending_without_created_at_is_suppressed() {
    let fx = kitchen().await;
    let mut after = snapshot("pending");
    after.created_at = None;

    let outcome = fx
        .state()
        .order_trigger()
        .handle_at(&event(snapshot("draft"), after), now())
        .await
        .unwrap();
    assert_eq!(outcome, TriggerOutcome::Suppressed(SuppressReason::MissingCreatedAt));
    assert!(fx.push.calls().is_empty());
}

#[tokio::test]
async fn ready_routing_depends_on_server_token() {
    let fx = kitchen().await;
    let trigger = fx.state().order_trigger();

    // No server assigned
    let outcome = trigger
        .handle_at(&event(snapshot("pending"), snapshot("ready")), now())
        .await
        .unwrap();
    assert_eq!(outcome, TriggerOutcome::Suppressed(SuppressReason::NoServerAssigned));

    // Server without token, and unknown server
    for server in ["s2", "ghost"] {
        let mut after = snapshot("ready");
        after.server_id = Some(server.into());
        let outcome = trigger
            .handle_at(&event(snapshot("pending"), after), now())
            .await
            .unwrap();
        assert_eq!(outcome, TriggerOutcome::Suppressed(SuppressReason::NoServerToken));
    }
    assert!(fx.push.calls().is_empty());

    // Server with token
    let mut after = snapshot("ready");
    after.server_id = Some("s1".into());
    let outcome = trigger
        .handle_at(&event(snapshot("pending"), after), now())
        .await
        .unwrap();
    assert_eq!(outcome, TriggerOutcome::Dispatched { recipients: 1 });

    let calls = fx.push.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, Recipients::Single("tok".to_string()));
}

#[tokio::test]
async fn ready_ignores_staleness() {
    let fx = kitchen().await;
    let mut after = snapshot("ready");
    after.server_id = Some("s1".into());
    after.created_at = Some(now() - Duration::hours(2));

    let outcome = fx
        .state()
        .order_trigger()
        .handle_at(&event(snapshot("pending"), after), now())
        .await
        .unwrap();
    assert!(outcome.is_dispatched());
}

#[tokio::test]
async fn missing_snapshot_is_suppressed() {
    let fx = kitchen().await;
    let trigger = fx.state().order_trigger();

    let events = [
        OrderUpdateEvent {
            order_id: "o1".into(),
            before: None,
            after: Some(snapshot("pending")),
        },
        OrderUpdateEvent {
            order_id: "o1".into(),
            before: Some(snapshot("draft")),
            after: None,
        },
    ];
    for ev in &events {
        let outcome = trigger.handle_at(ev, now()).await.unwrap();
        assert_eq!(outcome, TriggerOutcome::Suppressed(SuppressReason::MissingSnapshot));
    }
    assert!(fx.push.calls().is_empty());
}

#[tokio::test]
async fn gateway_failure_surfaces_as_error() {
    let fx = Fixture::with_gateway(RecordingGateway::failing()).await;
    fx.add_staff("c1", StaffRole::Chef, true, Some("t1")).await;

    let result = fx
        .state()
        .order_trigger()
        .handle_at(&event(snapshot("draft"), snapshot("pending")), now())
        .await;
    assert!(result.is_err());
    // One attempt, no retry
    assert_eq!(fx.push.calls().len(), 1);
}

#[tokio::test]
async fn scenario_a_new_order_for_table_five() {
    let fx = Fixture::new().await;
    fx.add_staff("c1", StaffRole::Chef, true, Some("t1")).await;
    fx.add_staff("c2", StaffRole::Chef, true, Some("t2")).await;

    let mut after = snapshot("pending");
    after.created_at = Some(now() - Duration::seconds(30));
    after.table_number = Some("5".into());
    fx.state()
        .order_trigger()
        .handle_at(&event(snapshot("draft"), after), now())
        .await
        .unwrap();

    let calls = fx.push.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].0,
        Recipients::Multicast(vec!["t1".to_string(), "t2".to_string()])
    );
    assert_eq!(calls[0].1.title, "Nouvelle Commande !");
    assert!(calls[0].1.body.contains("table 5"));
    assert_eq!(calls[0].1.sound, "default");
}

#[tokio::test]
async fn scenario_b_five_minute_old_order_is_ignored() {
    let fx = Fixture::new().await;
    fx.add_staff("c1", StaffRole::Chef, true, Some("t1")).await;

    let mut after = snapshot("pending");
    after.created_at = Some(now() - Duration::minutes(5));
    fx.state()
        .order_trigger()
        .handle_at(&event(snapshot("draft"), after), now())
        .await
        .unwrap();

    assert!(fx.push.calls().is_empty());
}

#[tokio::test]
async fn scenario_c_ready_order_for_table_three() {
    let fx = Fixture::new().await;
    fx.add_staff("s1", StaffRole::Server, true, Some("tok")).await;

    let mut after = snapshot("ready");
    after.server_id = Some("s1".into());
    after.table_number = Some("3".into());
    fx.state()
        .order_trigger()
        .handle_at(&event(snapshot("pending"), after), now())
        .await
        .unwrap();

    let calls = fx.push.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, Recipients::Single("tok".to_string()));
    assert_eq!(calls[0].1.title, "Commande Prête !");
    assert!(calls[0].1.body.contains("table 3"));
}

#[tokio::test]
async fn takeaway_order_uses_fallback_label() {
    let fx = Fixture::new().await;
    fx.add_staff("c1", StaffRole::Chef, true, Some("t1")).await;

    fx.state()
        .order_trigger()
        .handle_at(&event(snapshot("draft"), snapshot("pending")), now())
        .await
        .unwrap();

    let calls = fx.push.calls();
    assert_eq!(calls[0].1.body, "La table à emporter attend.");
}

#[tokio::test]
async fn threshold_follows_configuration() {
    let fx = Fixture::new().await;
    fx.add_staff("c1", StaffRole::Chef, true, Some("t1")).await;

    let mut config = notify_server::Config::for_development("sqlite::memory:", common::JWT_SECRET);
    config.new_order_threshold_minutes = 10.0;
    let state = notify_server::AppState::with_collaborators(
        config,
        fx.identity.clone(),
        fx.documents.clone(),
        Arc::clone(&fx.push) as Arc<dyn notify_server::gateway::PushGateway>,
    );

    let mut after = snapshot("pending");
    after.created_at = Some(now() - Duration::minutes(5));
    let outcome = state
        .order_trigger()
        .handle_at(&event(snapshot("draft"), after), now())
        .await
        .unwrap();
    assert!(outcome.is_dispatched());
}
