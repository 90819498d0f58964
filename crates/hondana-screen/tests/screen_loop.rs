//! Screen runtime integration
//!
//! Wires the real in-memory feed, the render adapter and a recording sink
//! through the screen context and checks the whole mirror: snapshot replay,
//! live events, exit holds, capacity badge, comments, teardown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;

use hondana_core::{
    AvatarColor, CheckInInput, Clock, PresenceMode, SystemClock, VisitorId, VisitorRole,
};
use hondana_feed::{CommentFeed, MemoryFeed};
use hondana_history::VisitLog;
use hondana_roster::{RecordingSink, RosterConfig};
use hondana_screen::{ScreenConfig, ScreenContext};

fn input(nickname: &str) -> CheckInInput {
    CheckInInput {
        nickname: nickname.to_string(),
        color: AvatarColor::Purple,
        role: VisitorRole::Designer,
        mode: PresenceMode::Work,
    }
}

fn config(max_entries: usize) -> ScreenConfig {
    ScreenConfig {
        roster: RosterConfig {
            max_entries,
            exit_hold: Duration::from_millis(400),
        },
        ..ScreenConfig::default()
    }
}

struct Fixture {
    clock: Arc<dyn Clock>,
    feed: Arc<MemoryFeed>,
    comments: Arc<CommentFeed>,
}

impl Fixture {
    fn new() -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let feed = Arc::new(MemoryFeed::new(clock.clone(), Arc::new(VisitLog::new())));
        let comments = Arc::new(CommentFeed::new(clock.clone()));
        Self {
            clock,
            feed,
            comments,
        }
    }

    async fn connect(&self, max_entries: usize) -> ScreenContext<RecordingSink> {
        ScreenContext::connect(
            self.feed.as_ref(),
            self.comments.as_ref(),
            RecordingSink::new(),
            self.clock.clone(),
            config(max_entries),
        )
        .await
        .expect("subscribe")
    }
}

#[tokio::test]
async fn snapshot_replay_rebuilds_roster_on_connect() {
    let fx = Fixture::new();
    fx.feed.check_in(VisitorId::new("u1"), input("A")).unwrap();
    fx.feed.check_in(VisitorId::new("u2"), input("B")).unwrap();

    let mut context = fx.connect(10).await;
    context.pump();

    assert_eq!(context.stats().visible, 2);
    assert!(!context.stats().show_empty_state);
    assert_eq!(context.adapter().sink().live_count(), 2);
}

#[tokio::test]
async fn capacity_badge_lights_up_and_oldest_is_dropped() {
    let fx = Fixture::new();
    let mut context = fx.connect(2).await;

    for name in ["u1", "u2", "u3"] {
        fx.feed.check_in(VisitorId::new(name), input(name)).unwrap();
    }
    context.pump();

    let stats = context.stats();
    assert_eq!(stats.visible, 2);
    assert!(stats.at_capacity);
    assert_eq!(
        context.adapter().keys_in_order(),
        vec![VisitorId::new("u2"), VisitorId::new("u3")]
    );
}

#[tokio::test]
async fn teardown_destroys_parked_exit_effects() {
    let fx = Fixture::new();
    let mut context = fx.connect(10).await;

    fx.feed.check_in(VisitorId::new("u1"), input("A")).unwrap();
    fx.feed.check_out(&VisitorId::new("u1"));
    context.pump();

    assert_eq!(context.pending_exit_count(), 1);
    assert_eq!(context.adapter().sink().live_count(), 1);

    context.teardown();
    assert_eq!(context.pending_exit_count(), 0);
    assert_eq!(context.adapter().sink().live_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn run_loop_mirrors_live_activity() {
    let fx = Fixture::new();
    let context = fx.connect(10).await;

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let screen = tokio::spawn(context.run(shutdown_rx));

    fx.feed.check_in(VisitorId::new("u1"), input("A")).unwrap();
    fx.feed.check_in(VisitorId::new("u2"), input("B")).unwrap();
    fx.feed.check_out(&VisitorId::new("u1"));
    fx.comments
        .send(
            VisitorId::new("u2"),
            "B",
            AvatarColor::Purple,
            "quiet afternoon",
        )
        .unwrap();

    // enough paused time for the exit hold (400 ms) to elapse in the loop
    tokio::time::sleep(Duration::from_secs(2)).await;
    shutdown_tx.send(()).expect("screen still running");
    let context = screen.await.expect("screen task");

    let stats = context.stats();
    assert_eq!(stats.visible, 1);
    assert!(!stats.at_capacity);
    assert_eq!(context.adapter().keys_in_order(), vec![VisitorId::new("u2")]);

    // u1's exit hold elapsed inside the loop, its representation is gone
    assert_eq!(context.pending_exit_count(), 0);
    assert_eq!(context.adapter().sink().live_count(), 1);

    assert_eq!(
        context.recent_comments().map(|c| c.text.as_str()).collect::<Vec<_>>(),
        vec!["quiet afternoon"]
    );
}

#[tokio::test(start_paused = true)]
async fn readd_during_exit_hold_survives_the_stale_completion() {
    let fx = Fixture::new();
    let context = fx.connect(10).await;

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let screen = tokio::spawn(context.run(shutdown_rx));

    let key = VisitorId::new("u1");
    fx.feed.check_in(key.clone(), input("A")).unwrap();
    fx.feed.check_out(&key);
    // back before the 400 ms exit hold can possibly fire
    fx.feed.check_in(key.clone(), input("A-again")).unwrap();

    tokio::time::sleep(Duration::from_secs(2)).await;
    shutdown_tx.send(()).expect("screen still running");
    let context = screen.await.expect("screen task");

    assert_eq!(context.adapter().keys_in_order(), vec![key.clone()]);
    let fresh = context.adapter().sink().handle_for(&key).unwrap();
    assert!(context.adapter().sink().is_live(fresh));
    assert_eq!(context.adapter().sink().live_count(), 1);
}
