//! Event and book catalog
//!
//! The staff-curated carousels shown beside the avatar grid. Plain CRUD
//! over two small collections plus value-style watchers: every mutation
//! re-sends the full sorted list, which is what carousel rendering wants.
//!
//! Image handling for catalog entries lives with the object store and is
//! out of scope here.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use uuid::Uuid;

use hondana_core::{Clock, FeedError};

use crate::subscription::FeedResult;

/// Field caps, matched to the write rules of the hosted store
pub const TITLE_MAX: usize = 100;
pub const DESCRIPTION_MAX: usize = 500;
pub const AUTHOR_MAX: usize = 50;
pub const GENRE_MAX: usize = 30;

/// Key of one catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CatalogId(String);

impl CatalogId {
    fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CatalogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One announced event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEntry {
    pub id: CatalogId,
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub time: String,
    pub description: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new event
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub title: String,
    pub date: String,
    pub time: String,
    pub description: String,
}

/// Partial update for an event; `None` leaves the field alone
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

/// One recommended book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookEntry {
    pub id: CatalogId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub comment: String,
    /// Manual carousel position
    pub order: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new book
#[derive(Debug, Clone, Default)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub comment: String,
    pub order: i64,
}

/// Partial update for a book; `None` leaves the field alone
#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub comment: Option<String>,
    pub order: Option<i64>,
    pub active: Option<bool>,
}

fn cap(raw: &str, max: usize) -> String {
    raw.trim().chars().take(max).collect()
}

/// The two staff-curated collections
pub struct Catalog {
    events: DashMap<CatalogId, EventEntry>,
    books: DashMap<CatalogId, BookEntry>,
    event_watchers: Mutex<Vec<mpsc::UnboundedSender<Vec<EventEntry>>>>,
    book_watchers: Mutex<Vec<mpsc::UnboundedSender<Vec<BookEntry>>>>,
    clock: Arc<dyn Clock>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            events: DashMap::new(),
            books: DashMap::new(),
            event_watchers: Mutex::new(Vec::new()),
            book_watchers: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// Add an event; new entries start active
    pub fn add_event(&self, draft: EventDraft) -> CatalogId {
        let now = self.clock.now_utc();
        let id = CatalogId::generate();
        self.events.insert(
            id.clone(),
            EventEntry {
                id: id.clone(),
                title: cap(&draft.title, TITLE_MAX),
                date: draft.date,
                time: draft.time,
                description: cap(&draft.description, DESCRIPTION_MAX),
                active: true,
                created_at: now,
                updated_at: now,
            },
        );
        self.notify_event_watchers();
        id
    }

    /// Patch an event
    pub fn update_event(&self, id: &CatalogId, patch: EventPatch) -> FeedResult<()> {
        {
            let mut entry = self
                .events
                .get_mut(id)
                .ok_or_else(|| FeedError::WriteFailed(format!("no event {id}")))?;
            if let Some(title) = patch.title {
                entry.title = cap(&title, TITLE_MAX);
            }
            if let Some(date) = patch.date {
                entry.date = date;
            }
            if let Some(time) = patch.time {
                entry.time = time;
            }
            if let Some(description) = patch.description {
                entry.description = cap(&description, DESCRIPTION_MAX);
            }
            if let Some(active) = patch.active {
                entry.active = active;
            }
            entry.updated_at = self.clock.now_utc();
        }
        self.notify_event_watchers();
        Ok(())
    }

    /// Delete an event; unknown id is a no-op
    pub fn delete_event(&self, id: &CatalogId) {
        if self.events.remove(id).is_some() {
            self.notify_event_watchers();
        }
    }

    /// All events, date order
    pub fn events(&self) -> Vec<EventEntry> {
        let mut events: Vec<_> = self.events.iter().map(|e| e.value().clone()).collect();
        events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        events
    }

    /// Active events only, date order
    pub fn active_events(&self) -> Vec<EventEntry> {
        self.events().into_iter().filter(|e| e.active).collect()
    }

    /// Watch events: the current list arrives immediately, then on every change
    pub fn watch_events(&self) -> mpsc::UnboundedReceiver<Vec<EventEntry>> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let _ = sender.send(self.events());
        self.event_watchers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(sender);
        receiver
    }

    /// Add a book; new entries start active
    pub fn add_book(&self, draft: BookDraft) -> CatalogId {
        let now = self.clock.now_utc();
        let id = CatalogId::generate();
        self.books.insert(
            id.clone(),
            BookEntry {
                id: id.clone(),
                title: cap(&draft.title, TITLE_MAX),
                author: cap(&draft.author, AUTHOR_MAX),
                genre: cap(&draft.genre, GENRE_MAX),
                comment: cap(&draft.comment, DESCRIPTION_MAX),
                order: draft.order,
                active: true,
                created_at: now,
                updated_at: now,
            },
        );
        self.notify_book_watchers();
        id
    }

    /// Patch a book
    pub fn update_book(&self, id: &CatalogId, patch: BookPatch) -> FeedResult<()> {
        {
            let mut entry = self
                .books
                .get_mut(id)
                .ok_or_else(|| FeedError::WriteFailed(format!("no book {id}")))?;
            if let Some(title) = patch.title {
                entry.title = cap(&title, TITLE_MAX);
            }
            if let Some(author) = patch.author {
                entry.author = cap(&author, AUTHOR_MAX);
            }
            if let Some(genre) = patch.genre {
                entry.genre = cap(&genre, GENRE_MAX);
            }
            if let Some(comment) = patch.comment {
                entry.comment = cap(&comment, DESCRIPTION_MAX);
            }
            if let Some(order) = patch.order {
                entry.order = order;
            }
            if let Some(active) = patch.active {
                entry.active = active;
            }
            entry.updated_at = self.clock.now_utc();
        }
        self.notify_book_watchers();
        Ok(())
    }

    /// Delete a book; unknown id is a no-op
    pub fn delete_book(&self, id: &CatalogId) {
        if self.books.remove(id).is_some() {
            self.notify_book_watchers();
        }
    }

    /// All books, carousel order
    pub fn books(&self) -> Vec<BookEntry> {
        let mut books: Vec<_> = self.books.iter().map(|b| b.value().clone()).collect();
        books.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        books
    }

    /// Active books only, carousel order
    pub fn active_books(&self) -> Vec<BookEntry> {
        self.books().into_iter().filter(|b| b.active).collect()
    }

    /// Watch books: the current list arrives immediately, then on every change
    pub fn watch_books(&self) -> mpsc::UnboundedReceiver<Vec<BookEntry>> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let _ = sender.send(self.books());
        self.book_watchers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(sender);
        receiver
    }

    fn notify_event_watchers(&self) {
        let snapshot = self.events();
        let mut watchers = self
            .event_watchers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        watchers.retain(|watcher| watcher.send(snapshot.clone()).is_ok());
    }

    fn notify_book_watchers(&self) {
        let snapshot = self.books();
        let mut watchers = self
            .book_watchers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        watchers.retain(|watcher| watcher.send(snapshot.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hondana_core::SystemClock;

    fn catalog() -> Catalog {
        Catalog::new(Arc::new(SystemClock))
    }

    fn event(title: &str, date: &str) -> EventDraft {
        EventDraft {
            title: title.to_string(),
            date: date.to_string(),
            ..EventDraft::default()
        }
    }

    #[test]
    fn test_events_sort_by_date() {
        let catalog = catalog();
        catalog.add_event(event("Later", "2025-07-01"));
        catalog.add_event(event("Sooner", "2025-06-15"));

        let titles: Vec<_> = catalog.events().iter().map(|e| e.title.clone()).collect();
        assert_eq!(titles, vec!["Sooner", "Later"]);
    }

    #[test]
    fn test_deactivated_event_leaves_active_list() {
        let catalog = catalog();
        let id = catalog.add_event(event("Reading circle", "2025-06-15"));
        assert_eq!(catalog.active_events().len(), 1);

        catalog
            .update_event(
                &id,
                EventPatch {
                    active: Some(false),
                    ..EventPatch::default()
                },
            )
            .unwrap();
        assert!(catalog.active_events().is_empty());
        assert_eq!(catalog.events().len(), 1);
    }

    #[test]
    fn test_update_unknown_event_fails() {
        let catalog = catalog();
        let missing = CatalogId::generate();
        assert!(catalog.update_event(&missing, EventPatch::default()).is_err());
    }

    #[test]
    fn test_title_is_trimmed_and_capped() {
        let catalog = catalog();
        let long = format!("  {}  ", "t".repeat(200));
        let id = catalog.add_event(event(&long, "2025-06-15"));

        let stored = catalog
            .events()
            .into_iter()
            .find(|e| e.id == id)
            .unwrap();
        assert_eq!(stored.title.chars().count(), TITLE_MAX);
    }

    #[test]
    fn test_books_sort_by_order() {
        let catalog = catalog();
        catalog.add_book(BookDraft {
            title: "Second".to_string(),
            order: 2,
            ..BookDraft::default()
        });
        catalog.add_book(BookDraft {
            title: "First".to_string(),
            order: 1,
            ..BookDraft::default()
        });

        let titles: Vec<_> = catalog.books().iter().map(|b| b.title.clone()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn test_watchers_get_snapshot_then_changes() {
        let catalog = catalog();
        catalog.add_event(event("Existing", "2025-06-15"));

        let mut watcher = catalog.watch_events();
        let initial = watcher.try_recv().unwrap();
        assert_eq!(initial.len(), 1);

        catalog.add_event(event("New", "2025-06-20"));
        let updated = watcher.try_recv().unwrap();
        assert_eq!(updated.len(), 2);
    }
}
