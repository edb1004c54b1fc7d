use apiwatch_core::config::DashboardConfig;
use apiwatch_core::error::WatchError;
use apiwatch_core::event::{Event, EventId, RawEvent};
use apiwatch_core::view::{MethodFilter, SortDir, SortKey, StatusFilter, ViewSpec};
use apiwatch_store::expansion::ExpansionTracker;
use apiwatch_store::stats::{Metrics, RollingStats};
use apiwatch_store::store::EventStore;
use apiwatch_stream::client::CollectorClient;
use apiwatch_view::{Projection, project};
use tracing::{debug, info};

/// Minimal re-render the session asks of the presentation layer after
/// a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewUpdate {
    /// Nothing in the projected order changed.
    None,
    /// The new event may be prepended to the rendered list as-is
    /// (time-descending fast path).
    Prepend(EventId),
    /// Recompute the whole projection.
    Refresh,
}

/// One dashboard session: exclusive owner of the event log, rolling
/// stats, expansion set, and view selection.
///
/// Constructed at login, torn down at logout — nothing here is
/// process-global. All commands run to completion on one logical
/// thread; ingestion and projection never interleave.
pub struct DashboardSession {
    store: EventStore,
    stats: RollingStats,
    expansion: ExpansionTracker,
    spec: ViewSpec,
    client: CollectorClient,
}

impl DashboardSession {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            store: EventStore::new(),
            stats: RollingStats::with_capacity(config.ui.stats_window),
            expansion: ExpansionTracker::new(),
            spec: config.ui.view.clone(),
            client: CollectorClient::from_config(&config.collector),
        }
    }

    // ── Commands from the stream ────────────────────────────────

    /// A single live event arrived: ingest, update stats, and tell the
    /// renderer the cheapest correct refresh.
    pub fn on_new_event(&mut self, raw: RawEvent) -> ViewUpdate {
        let event = self.store.ingest(raw);
        let id = event.id;
        self.stats.update(event);

        if self.spec.fast_path_prepend() {
            ViewUpdate::Prepend(id)
        } else {
            ViewUpdate::Refresh
        }
    }

    /// The one-time backlog replay arrived. Stats see every replayed
    /// event in delivered order; rendering happens once, not per event.
    pub fn on_backlog(&mut self, raws: Vec<RawEvent>) -> ViewUpdate {
        let count = self.store.ingest_batch(raws);
        // Replayed events sit at the head newest-first; stats consume
        // them in delivered order
        for event in self.store.events()[..count].iter().rev() {
            self.stats.update(event);
        }
        info!(count, "Backlog replayed");
        ViewUpdate::Refresh
    }

    // ── Commands from the UI ────────────────────────────────────

    pub fn on_filter_changed(&mut self, status: StatusFilter, method: MethodFilter) -> ViewUpdate {
        debug!(?status, ?method, "Filter changed");
        self.spec.status_filter = status;
        self.spec.method_filter = method;
        ViewUpdate::Refresh
    }

    pub fn on_sort_changed(&mut self, key: SortKey, dir: SortDir) -> ViewUpdate {
        debug!(?key, ?dir, "Sort changed");
        self.spec.sort_key = key;
        self.spec.sort_dir = dir;
        ViewUpdate::Refresh
    }

    /// Expansion is independent of filtering and sorting: toggling
    /// never reorders the view.
    pub fn on_toggle_expand(&mut self, id: EventId) -> ViewUpdate {
        let open = self.expansion.toggle(id);
        debug!(id = id.0, open, "Expansion toggled");
        ViewUpdate::None
    }

    /// Clear command: remote first, local only on success. A failed
    /// command leaves the log, stats, and expansion set intact.
    pub async fn clear_requests(&mut self) -> Result<ViewUpdate, WatchError> {
        self.client.clear().await?;
        self.reset_local();
        Ok(ViewUpdate::Refresh)
    }

    /// Tear-down on logout: local state only, no network call.
    pub fn reset_local(&mut self) {
        self.store.clear();
        self.stats.reset();
        self.expansion.clear();
        info!("Session state cleared");
    }

    // ── Read side ───────────────────────────────────────────────

    /// Current projection of the log through the active view spec.
    pub fn view(&self) -> Projection<'_> {
        project(self.store.events(), &self.spec)
    }

    pub fn metrics(&self) -> Metrics {
        self.stats.derived_metrics()
    }

    pub fn stats(&self) -> &RollingStats {
        &self.stats
    }

    pub fn spec(&self) -> &ViewSpec {
        &self.spec
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.store.get(id)
    }

    pub fn is_expanded(&self, id: EventId) -> bool {
        self.expansion.is_expanded(id)
    }

    pub fn expansion(&self) -> &ExpansionTracker {
        &self.expansion
    }

    pub fn client(&self) -> &CollectorClient {
        &self.client
    }

    pub fn event_count(&self) -> usize {
        self.store.len()
    }
}
