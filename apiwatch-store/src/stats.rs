use apiwatch_core::event::Event;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// Default capacity of the rolling duration and history windows.
pub const DEFAULT_WINDOW: usize = 20;

/// One time-bucketed sample of the rolling history window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistorySample {
    pub time: DateTime<Utc>,
    pub success: bool,
}

/// Derived metrics for the stat tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metrics {
    pub total: u64,
    pub success_rate_percent: u32,
    pub average_duration_ms: u64,
}

/// Rolling aggregates, recomputed incrementally on each ingest.
///
/// Counters are monotonic since the last reset; the sample windows are
/// fixed-capacity FIFO, oldest evicted first. Never serialized, never
/// mutated outside [`RollingStats::update`] and [`RollingStats::reset`].
#[derive(Debug)]
pub struct RollingStats {
    capacity: usize,
    total: u64,
    success_count: u64,
    error_count: u64,
    duration_samples: VecDeque<f64>,
    history: VecDeque<HistorySample>,
}

impl RollingStats {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_WINDOW)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            total: 0,
            success_count: 0,
            error_count: 0,
            duration_samples: VecDeque::with_capacity(capacity),
            history: VecDeque::with_capacity(capacity),
        }
    }

    /// Record one ingested event. Called exactly once per event, in
    /// ingestion order, backlog replays included.
    pub fn update(&mut self, event: &Event) {
        self.total += 1;

        // Counters require the full 2xx-3xx range; an absent status
        // code counts as an error.
        if matches!(event.status_code, Some(s) if (200..400).contains(&s)) {
            self.success_count += 1;
        } else {
            self.error_count += 1;
        }

        if let Some(duration) = event.duration_ms {
            if self.duration_samples.len() == self.capacity {
                self.duration_samples.pop_front();
            }
            self.duration_samples.push_back(duration);
        }

        // The history flag checks only the upper bound — a distinct
        // classification from the counters above, kept distinct.
        let success = matches!(event.status_code, Some(s) if s < 400);
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(HistorySample {
            time: Utc::now(),
            success,
        });
    }

    /// Success rate and average latency for the stat tiles. An empty
    /// session reads as 100% — a display convenience, not a
    /// statistical claim.
    pub fn derived_metrics(&self) -> Metrics {
        let success_rate_percent = if self.total == 0 {
            100
        } else {
            ((self.success_count as f64 / self.total as f64) * 100.0).round() as u32
        };
        let average_duration_ms = if self.duration_samples.is_empty() {
            0
        } else {
            (self.duration_samples.iter().sum::<f64>() / self.duration_samples.len() as f64)
                .round() as u64
        };
        Metrics {
            total: self.total,
            success_rate_percent,
            average_duration_ms,
        }
    }

    /// Back to the zero state.
    pub fn reset(&mut self) {
        self.total = 0;
        self.success_count = 0;
        self.error_count = 0;
        self.duration_samples.clear();
        self.history.clear();
    }

    // ── Sparkline accessors ─────────────────────────────────────

    /// Last `n` history samples, oldest first — feeds the volume and
    /// success-rate charts.
    pub fn recent_history(&self, n: usize) -> impl Iterator<Item = &HistorySample> {
        self.history
            .iter()
            .skip(self.history.len().saturating_sub(n))
    }

    /// Last `n` duration samples, oldest first — feeds the
    /// response-time chart.
    pub fn recent_durations(&self, n: usize) -> impl Iterator<Item = f64> + '_ {
        self.duration_samples
            .iter()
            .copied()
            .skip(self.duration_samples.len().saturating_sub(n))
    }

    /// Scale for the response-time bars; never below 1.0 so an
    /// all-zero window still divides cleanly.
    pub fn max_recent_duration(&self, n: usize) -> f64 {
        self.recent_durations(n).fold(1.0_f64, f64::max)
    }

    // ── Accessors ───────────────────────────────────────────────

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn success_count(&self) -> u64 {
        self.success_count
    }

    pub fn error_count(&self) -> u64 {
        self.error_count
    }

    pub fn durations(&self) -> &VecDeque<f64> {
        &self.duration_samples
    }

    pub fn history(&self) -> &VecDeque<HistorySample> {
        &self.history
    }
}

impl Default for RollingStats {
    fn default() -> Self {
        Self::new()
    }
}
