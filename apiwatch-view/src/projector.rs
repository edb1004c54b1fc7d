use apiwatch_core::event::Event;
use apiwatch_core::view::{MethodFilter, SortDir, SortKey, ViewSpec};
use std::cmp::Ordering;

/// Result of projecting the log through a view spec.
#[derive(Debug)]
pub struct Projection<'a> {
    /// Events to render, in the requested order.
    pub events: Vec<&'a Event>,
    /// True when the log itself is empty, as opposed to every event
    /// being filtered out — the two drive different empty states.
    pub log_empty: bool,
}

impl<'a> Projection<'a> {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Project the log through `spec`: filter, then sort.
///
/// Pure and side-effect-free — identical inputs always yield the
/// identical ordered output, so it is safe to call on every re-render.
pub fn project<'a>(log: &'a [Event], spec: &ViewSpec) -> Projection<'a> {
    let mut events: Vec<&Event> = log.iter().filter(|e| matches(e, spec)).collect();
    events.sort_by(|a, b| compare(a, b, spec.sort_key, spec.sort_dir));
    Projection {
        events,
        log_empty: log.is_empty(),
    }
}

/// Filter test for a single event.
fn matches(event: &Event, spec: &ViewSpec) -> bool {
    let status_ok = match spec.status_filter.bucket() {
        None => true,
        // An absent status code never matches a specific bucket
        Some(bucket) => event.status_bucket() == Some(bucket),
    };

    let method_ok = match &spec.method_filter {
        MethodFilter::All => true,
        MethodFilter::Method(m) => event.method == *m,
    };

    status_ok && method_ok
}

fn compare(a: &Event, b: &Event, key: SortKey, dir: SortDir) -> Ordering {
    let ord = match key {
        SortKey::Time => a.timestamp.cmp(&b.timestamp),
        // Absent durations and status codes sort as zero
        SortKey::Duration => a
            .duration_ms
            .unwrap_or(0.0)
            .total_cmp(&b.duration_ms.unwrap_or(0.0)),
        SortKey::Status => a.status_code.unwrap_or(0).cmp(&b.status_code.unwrap_or(0)),
    };
    match dir {
        SortDir::Asc => ord,
        SortDir::Desc => ord.reverse(),
    }
}
