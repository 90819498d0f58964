//! Screen runtime context and event loop

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{info, warn};

use hondana_core::{clock_text, Clock, FeedEvent, CLOCK_TICK, STAY_REFRESH};
use hondana_feed::{Comment, CommentFeed, FeedQuery, FeedResult, FeedSource, FeedSubscription};
use hondana_roster::{PendingExit, PresentationSink, RenderAdapter, RosterConfig};

use crate::stats::ScreenStats;

/// How many overlay comments the screen keeps around
const RECENT_COMMENTS: usize = 8;

/// Runtime timings and bounds, fixed at build time
#[derive(Debug, Clone, Copy)]
pub struct ScreenConfig {
    pub roster: RosterConfig,
    /// How often stay-time labels refresh
    pub stay_refresh: Duration,
    /// Wall-clock tick
    pub clock_tick: Duration,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            roster: RosterConfig::default(),
            stay_refresh: STAY_REFRESH,
            clock_tick: CLOCK_TICK,
        }
    }
}

/// The screen's explicitly-constructed context
///
/// Owns the render adapter, the feed and comment subscriptions, the parked
/// exit effects and the clock. All roster mutation happens through this one
/// value; everything else reads [`ScreenStats`].
pub struct ScreenContext<S: PresentationSink> {
    adapter: RenderAdapter<S>,
    subscription: FeedSubscription,
    comments: mpsc::UnboundedReceiver<Comment>,
    recent_comments: VecDeque<Comment>,
    /// Exit effects still playing, due-time ordered (uniform hold)
    pending_exits: VecDeque<(Instant, PendingExit<S::Handle>)>,
    clock: Arc<dyn Clock>,
    config: ScreenConfig,
    clock_line: String,
    feed_open: bool,
    comments_open: bool,
}

impl<S: PresentationSink> ScreenContext<S> {
    /// Subscribe to the feed and the comment overlay and build the context
    pub async fn connect<F>(
        feed: &F,
        comments: &CommentFeed,
        sink: S,
        clock: Arc<dyn Clock>,
        config: ScreenConfig,
    ) -> FeedResult<Self>
    where
        F: FeedSource + ?Sized,
    {
        let subscription = feed.subscribe(FeedQuery::today(clock.now_utc())).await?;
        let comments = comments.subscribe();
        let clock_line = clock_text(clock.now_utc());

        Ok(Self {
            adapter: RenderAdapter::new(config.roster, sink),
            subscription,
            comments,
            recent_comments: VecDeque::new(),
            pending_exits: VecDeque::new(),
            clock,
            config,
            clock_line,
            feed_open: true,
            comments_open: true,
        })
    }

    /// Drive the screen until `shutdown` fires, then tear down
    ///
    /// Returns the context so tests and callers can inspect final state.
    pub async fn run(mut self, mut shutdown: oneshot::Receiver<()>) -> Self {
        let mut stay_interval = tokio::time::interval(self.config.stay_refresh);
        let mut clock_interval = tokio::time::interval(self.config.clock_tick);

        loop {
            let next_exit_due = self.pending_exits.front().map(|(due, _)| *due);

            tokio::select! {
                _ = &mut shutdown => break,

                maybe = self.subscription.next_event(), if self.feed_open => {
                    match maybe {
                        Some(event) => self.handle_event(event),
                        None => {
                            // non-fatal: keep showing the last-known roster
                            warn!("feed subscription closed; roster frozen");
                            self.feed_open = false;
                        }
                    }
                }

                maybe = self.comments.recv(), if self.comments_open => {
                    match maybe {
                        Some(comment) => self.show_comment(comment),
                        None => self.comments_open = false,
                    }
                }

                _ = tokio::time::sleep_until(
                    next_exit_due.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600))
                ), if next_exit_due.is_some() => {
                    self.expire_due_exits();
                }

                _ = stay_interval.tick() => self.adapter.refresh_all(),

                _ = clock_interval.tick() => {
                    self.clock_line = clock_text(self.clock.now_utc());
                }
            }
        }

        self.teardown();
        self
    }

    /// Apply one feed event, parking any exit effect it starts
    pub fn handle_event(&mut self, event: FeedEvent) {
        if let Some(exit) = self.adapter.apply(event) {
            let due = Instant::now() + exit.hold;
            self.pending_exits.push_back((due, exit));
        }
    }

    /// Synchronously drain whatever the feed has queued right now
    pub fn pump(&mut self) {
        while let Some(event) = self.subscription.try_next_event() {
            self.handle_event(event);
        }
    }

    /// Finish exit effects whose hold has elapsed
    pub fn expire_due_exits(&mut self) {
        let now = Instant::now();
        while self
            .pending_exits
            .front()
            .is_some_and(|(due, _)| *due <= now)
        {
            if let Some((_, exit)) = self.pending_exits.pop_front() {
                self.adapter.finish_exit(exit);
            }
        }
    }

    fn show_comment(&mut self, comment: Comment) {
        info!(
            nickname = %comment.nickname,
            text = %comment.text,
            "overlay comment"
        );
        self.recent_comments.push_back(comment);
        while self.recent_comments.len() > RECENT_COMMENTS {
            self.recent_comments.pop_front();
        }
    }

    /// Current header view
    pub fn stats(&self) -> ScreenStats {
        ScreenStats {
            visible: self.adapter.len(),
            at_capacity: self.adapter.at_capacity(),
            show_empty_state: self.adapter.is_empty(),
            clock: self.clock_line.clone(),
        }
    }

    /// The render adapter (read-only)
    pub fn adapter(&self) -> &RenderAdapter<S> {
        &self.adapter
    }

    /// Overlay comments currently on screen, oldest first
    pub fn recent_comments(&self) -> impl Iterator<Item = &Comment> {
        self.recent_comments.iter()
    }

    /// Number of exit effects still playing
    pub fn pending_exit_count(&self) -> usize {
        self.pending_exits.len()
    }

    /// Tear the screen down for a clean restart
    ///
    /// Stops consuming the feed and destroys every parked representation;
    /// the roster itself needs no teardown, it is plain process state.
    pub fn teardown(&mut self) {
        self.feed_open = false;
        let parked: Vec<_> = self.pending_exits.drain(..).collect();
        for (_, exit) in parked {
            self.adapter.finish_exit(exit);
        }
    }
}
