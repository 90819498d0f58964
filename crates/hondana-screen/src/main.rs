//! Simulated kiosk day
//!
//! Drives generated visitors through the real write path while the screen
//! loop mirrors them, then prints the dashboard numbers. Useful for eyeballing
//! the whole pipeline without a browser in front of it.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use rand::Rng;
use tokio::sync::oneshot;
use tracing::info;

use hondana_core::{AvatarColor, CheckInInput, Clock, PresenceMode, SystemClock, VisitorId, VisitorRole};
use hondana_feed::{CommentFeed, MemoryFeed};
use hondana_history::{DashboardStats, VisitLog};
use hondana_screen::{logging, LogSink, ScreenConfig, ScreenContext};

const COLORS: [AvatarColor; 6] = [
    AvatarColor::Blue,
    AvatarColor::Red,
    AvatarColor::Green,
    AvatarColor::Yellow,
    AvatarColor::Purple,
    AvatarColor::Orange,
];

const ROLES: [VisitorRole; 5] = [
    VisitorRole::Freelance,
    VisitorRole::Student,
    VisitorRole::Designer,
    VisitorRole::Engineer,
    VisitorRole::Writer,
];

const MODES: [PresenceMode; 3] = [PresenceMode::Work, PresenceMode::Break, PresenceMode::Meeting];

fn random_input(i: usize) -> CheckInInput {
    let mut rng = rand::rng();
    CheckInInput {
        nickname: format!("guest-{i}"),
        color: COLORS[rng.random_range(0..COLORS.len())].clone(),
        role: ROLES[rng.random_range(0..ROLES.len())].clone(),
        mode: MODES[rng.random_range(0..MODES.len())].clone(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let history = Arc::new(VisitLog::new());
    let feed = Arc::new(MemoryFeed::new(clock.clone(), history.clone()));
    let comments = Arc::new(CommentFeed::new(clock.clone()));

    let context = ScreenContext::connect(
        feed.as_ref(),
        comments.as_ref(),
        LogSink::new(clock.clone()),
        clock.clone(),
        ScreenConfig::default(),
    )
    .await?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let screen = tokio::spawn(context.run(shutdown_rx));

    // kiosk side: visitors trickle in, some sessions drop abruptly
    let writer_feed = feed.clone();
    let writer_comments = comments.clone();
    let writer = tokio::spawn(async move {
        for i in 0..12 {
            let key = VisitorId::generate();
            let input = random_input(i);
            if writer_feed.check_in(key.clone(), input).is_ok() {
                writer_feed.arm_disconnect(key.clone());
            }

            // rng is not Send; keep it out of scope across the sleep
            let (drops, chats) = {
                let mut rng = rand::rng();
                (rng.random_bool(0.25), rng.random_bool(0.3))
            };
            if drops {
                writer_feed.disconnect(&key);
            }
            if chats {
                writer_comments.send(
                    key,
                    format!("guest-{i}"),
                    AvatarColor::Blue,
                    "found a good one",
                );
            }

            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    });

    writer.await?;
    tokio::time::sleep(Duration::from_secs(1)).await;

    let _ = shutdown_tx.send(());
    let context = screen.await?;

    let stats = context.stats();
    info!(
        visible = stats.visible,
        at_capacity = stats.at_capacity,
        "screen state at shutdown"
    );

    let dashboard = DashboardStats::compute(&history, clock.now_utc())?;
    info!(
        today = dashboard.today_count,
        week = dashboard.week_total,
        peak_hour = ?dashboard.peak_hour,
        "dashboard"
    );

    Ok(())
}
