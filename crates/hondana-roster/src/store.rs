//! Ordered roster storage and capacity enforcement

use std::collections::{BTreeMap, HashMap};

use hondana_core::{VisitorId, VisitorProfile};

/// What an upsert did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new entry was appended to the insertion order
    Created,
    /// An existing entry's profile was replaced in place
    Updated,
}

/// One visitor's entry: display payload plus rendering bookkeeping
#[derive(Debug)]
pub struct RosterEntry<H> {
    pub key: VisitorId,
    pub profile: VisitorProfile,
    /// Handle to whatever the presentation sink created for this entry.
    /// Owned by the sink; held here only to pass back on update/remove.
    /// `None` when the sink's create failed.
    pub handle: Option<H>,
    /// Local insertion sequence. Arrival order only — distinct from the
    /// profile's `joined_at`, which is the domain time shown to users.
    seq: u64,
}

impl<H> RosterEntry<H> {
    /// The entry's position in insertion order
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// The authoritative ordered set of currently-visible entries
///
/// A key→entry association that preserves insertion order: entries are
/// keyed by a monotonic sequence in a `BTreeMap`, with a side index from
/// visitor key to sequence. First-inserted is first-iterated, and eviction
/// always pops the front.
#[derive(Debug)]
pub struct Roster<H> {
    entries: BTreeMap<u64, RosterEntry<H>>,
    index: HashMap<VisitorId, u64>,
    next_seq: u64,
}

impl<H> Roster<H> {
    /// Create an empty roster
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            index: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the roster is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether an entry exists for `key`
    pub fn contains(&self, key: &VisitorId) -> bool {
        self.index.contains_key(key)
    }

    /// Get the entry for `key`
    pub fn get(&self, key: &VisitorId) -> Option<&RosterEntry<H>> {
        let seq = self.index.get(key)?;
        self.entries.get(seq)
    }

    /// Get the entry for `key` mutably
    pub fn entry_mut(&mut self, key: &VisitorId) -> Option<&mut RosterEntry<H>> {
        let seq = self.index.get(key)?;
        self.entries.get_mut(seq)
    }

    /// Insert or replace the display payload for `key`
    ///
    /// Absent key: a new entry is appended to the insertion order and
    /// `Created` is returned. Present key: the profile is replaced in place —
    /// order, sequence and handle untouched — and `Updated` is returned.
    /// A second "added" feed event for a live key lands here as an update,
    /// never a duplicate insert.
    pub fn upsert(&mut self, key: VisitorId, profile: VisitorProfile) -> UpsertOutcome {
        if let Some(seq) = self.index.get(&key) {
            if let Some(entry) = self.entries.get_mut(seq) {
                entry.profile = profile;
            }
            return UpsertOutcome::Updated;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.index.insert(key.clone(), seq);
        self.entries.insert(
            seq,
            RosterEntry {
                key,
                profile,
                handle: None,
                seq,
            },
        );
        UpsertOutcome::Created
    }

    /// Attach the presentation handle for `key`
    ///
    /// Returns false if the key is no longer present (e.g. already evicted).
    pub fn attach_handle(&mut self, key: &VisitorId, handle: H) -> bool {
        match self.entry_mut(key) {
            Some(entry) => {
                entry.handle = Some(handle);
                true
            }
            None => false,
        }
    }

    /// Remove the entry for `key`, handing it back for cleanup
    ///
    /// Absent key is a no-op returning `None`, so duplicate or late removal
    /// events are tolerated.
    pub fn remove(&mut self, key: &VisitorId) -> Option<RosterEntry<H>> {
        let seq = self.index.remove(key)?;
        self.entries.remove(&seq)
    }

    /// Evict oldest-first until `len() <= max_entries`
    ///
    /// Evicted entries are returned in eviction order for cleanup. Runs one
    /// entry at a time from the front of insertion order, regardless of any
    /// `joined_at` drift in the display payloads.
    pub fn evict_over_capacity(&mut self, max_entries: usize) -> Vec<RosterEntry<H>> {
        let mut evicted = Vec::new();
        while self.entries.len() > max_entries {
            let Some((_, entry)) = self.entries.pop_first() else {
                break;
            };
            self.index.remove(&entry.key);
            evicted.push(entry);
        }
        evicted
    }

    /// Iterate entries in insertion order (oldest first)
    pub fn iter_in_order(&self) -> impl Iterator<Item = &RosterEntry<H>> {
        self.entries.values()
    }

    /// Iterate entries mutably in insertion order
    pub fn iter_in_order_mut(&mut self) -> impl Iterator<Item = &mut RosterEntry<H>> {
        self.entries.values_mut()
    }

    /// Keys in insertion order
    pub fn keys_in_order(&self) -> Vec<VisitorId> {
        self.entries.values().map(|e| e.key.clone()).collect()
    }
}

impl<H> Default for Roster<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(nickname: &str) -> VisitorProfile {
        VisitorProfile {
            nickname: nickname.to_string(),
            ..VisitorProfile::default()
        }
    }

    fn key(s: &str) -> VisitorId {
        VisitorId::new(s)
    }

    #[test]
    fn test_upsert_creates_then_updates() {
        let mut roster: Roster<u64> = Roster::new();

        assert_eq!(roster.upsert(key("a"), profile("first")), UpsertOutcome::Created);
        assert_eq!(roster.upsert(key("a"), profile("second")), UpsertOutcome::Updated);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get(&key("a")).unwrap().profile.nickname, "second");
    }

    #[test]
    fn test_iteration_is_insertion_order() {
        let mut roster: Roster<u64> = Roster::new();
        for name in ["a", "b", "c"] {
            roster.upsert(key(name), profile(name));
        }

        let keys: Vec<_> = roster.iter_in_order().map(|e| e.key.clone()).collect();
        assert_eq!(keys, vec![key("a"), key("b"), key("c")]);
        assert_eq!(roster.keys_in_order(), keys);
    }

    #[test]
    fn test_update_does_not_reorder() {
        let mut roster: Roster<u64> = Roster::new();
        for name in ["a", "b", "c"] {
            roster.upsert(key(name), profile(name));
        }

        roster.upsert(key("a"), profile("a2"));
        assert_eq!(roster.keys_in_order(), vec![key("a"), key("b"), key("c")]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut roster: Roster<u64> = Roster::new();
        roster.upsert(key("a"), profile("a"));

        assert!(roster.remove(&key("a")).is_some());
        assert!(roster.remove(&key("a")).is_none());
        assert_eq!(roster.len(), 0);
    }

    #[test]
    fn test_eviction_pops_oldest_first() {
        let mut roster: Roster<u64> = Roster::new();
        for name in ["a", "b", "c", "d", "e"] {
            roster.upsert(key(name), profile(name));
        }

        let evicted = roster.evict_over_capacity(3);
        let evicted_keys: Vec<_> = evicted.iter().map(|e| e.key.clone()).collect();
        assert_eq!(evicted_keys, vec![key("a"), key("b")]);
        assert_eq!(roster.keys_in_order(), vec![key("c"), key("d"), key("e")]);
    }

    #[test]
    fn test_eviction_ignores_joined_at_drift() {
        use chrono::{TimeZone, Utc};

        let mut roster: Roster<u64> = Roster::new();
        // "a" arrives first locally but carries a *later* domain timestamp
        let mut late = profile("a");
        late.joined_at = Some(Utc.with_ymd_and_hms(2025, 6, 1, 23, 0, 0).unwrap());
        roster.upsert(key("a"), late);

        let mut early = profile("b");
        early.joined_at = Some(Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap());
        roster.upsert(key("b"), early);

        let evicted = roster.evict_over_capacity(1);
        assert_eq!(evicted[0].key, key("a"));
    }

    #[test]
    fn test_reinserted_key_moves_to_back() {
        let mut roster: Roster<u64> = Roster::new();
        for name in ["a", "b", "c"] {
            roster.upsert(key(name), profile(name));
        }

        roster.remove(&key("a"));
        roster.upsert(key("a"), profile("a-again"));
        assert_eq!(roster.keys_in_order(), vec![key("b"), key("c"), key("a")]);
    }

    #[test]
    fn test_attach_handle_to_missing_key() {
        let mut roster: Roster<u64> = Roster::new();
        assert!(!roster.attach_handle(&key("ghost"), 7));
    }
}
