use apiwatch_core::event::{Event, EventId, RawEvent};
use tracing::debug;

/// Append-ordered in-memory log of captured events, newest first.
///
/// The log itself is unbounded within a session; only the derived
/// statistics windows are capped. Ids come from a monotonic counter, so
/// a later arrival always carries a greater id.
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
    next_id: u64,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one live event: assign a fresh id and insert at the head.
    ///
    /// A structurally valid event is never rejected; absent optional
    /// fields are stored as absent, not defaulted.
    pub fn ingest(&mut self, raw: RawEvent) -> &Event {
        let id = EventId(self.next_id);
        self.next_id += 1;
        self.events.insert(0, Event::from_raw(id, raw));
        debug!(id = id.0, "Event ingested");
        &self.events[0]
    }

    /// Ingest a backlog replay in delivered order. Each event lands at
    /// the head, so chronological delivery leaves the newest on top.
    /// Returns the number inserted; the caller recomputes the view once
    /// afterwards rather than per event.
    pub fn ingest_batch(&mut self, raws: Vec<RawEvent>) -> usize {
        let count = raws.len();
        for raw in raws {
            self.ingest(raw);
        }
        count
    }

    /// Drop every event. The id counter keeps counting up, so a cleared
    /// store never reissues an id from before the clear.
    pub fn clear(&mut self) {
        debug!(dropped = self.events.len(), "Event log cleared");
        self.events.clear();
    }

    /// Read-only view of the log at call time, newest first.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn raw(path: &str) -> RawEvent {
        RawEvent {
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            method: "GET".to_string(),
            path: path.to_string(),
            status_code: Some(200),
            duration_ms: None,
            service: None,
            query_params: None,
            request_data: None,
            response_data: None,
            headers: None,
        }
    }

    // ── ingest ──────────────────────────────────────────────────

    #[test]
    fn ingest_inserts_at_head() {
        let mut store = EventStore::new();
        store.ingest(raw("/first"));
        store.ingest(raw("/second"));
        assert_eq!(store.events()[0].path, "/second");
        assert_eq!(store.events()[1].path, "/first");
    }

    #[test]
    fn ingest_assigns_monotonic_ids() {
        let mut store = EventStore::new();
        let a = store.ingest(raw("/a")).id;
        let b = store.ingest(raw("/b")).id;
        let c = store.ingest(raw("/c")).id;
        assert!(a < b && b < c);
    }

    #[test]
    fn ingest_preserves_absent_fields() {
        let mut store = EventStore::new();
        let mut r = raw("/sparse");
        r.status_code = None;
        r.duration_ms = None;
        let event = store.ingest(r);
        assert_eq!(event.status_code, None);
        assert_eq!(event.duration_ms, None);
    }

    // ── ingest_batch ────────────────────────────────────────────

    #[test]
    fn batch_replay_leaves_newest_at_head() {
        let mut store = EventStore::new();
        let count = store.ingest_batch(vec![raw("/old"), raw("/mid"), raw("/new")]);
        assert_eq!(count, 3);
        assert_eq!(store.events()[0].path, "/new");
        assert_eq!(store.events()[2].path, "/old");
    }

    #[test]
    fn live_event_after_batch_sits_above_it() {
        let mut store = EventStore::new();
        store.ingest_batch(vec![raw("/h1"), raw("/h2")]);
        store.ingest(raw("/live"));
        assert_eq!(store.len(), 3);
        assert_eq!(store.events()[0].path, "/live");
    }

    // ── clear ───────────────────────────────────────────────────

    #[test]
    fn clear_empties_log_but_ids_keep_counting() {
        let mut store = EventStore::new();
        store.ingest(raw("/a"));
        let before = store.ingest(raw("/b")).id;
        store.clear();
        assert!(store.is_empty());
        let after = store.ingest(raw("/c")).id;
        assert!(after > before);
    }

    // ── lookup ──────────────────────────────────────────────────

    #[test]
    fn get_finds_event_by_id() {
        let mut store = EventStore::new();
        let id = store.ingest(raw("/target")).id;
        store.ingest(raw("/noise"));
        assert_eq!(store.get(id).unwrap().path, "/target");
    }

    #[test]
    fn get_with_unknown_id_is_none() {
        let store = EventStore::new();
        assert!(store.get(EventId(99)).is_none());
    }
}
