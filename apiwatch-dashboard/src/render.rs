use apiwatch_core::event::Event;
use apiwatch_store::expansion::ExpansionTracker;
use apiwatch_store::stats::Metrics;
use std::io::Write;

/// Everything one full render needs. The session hands over exactly
/// this data; markup and styling live on the other side of the
/// boundary.
pub struct ViewFrame<'a> {
    pub events: Vec<&'a Event>,
    /// True when the log itself is empty (not merely filtered out).
    pub log_empty: bool,
    pub expanded: &'a ExpansionTracker,
    pub metrics: Metrics,
}

/// Boundary to the presentation layer. The session never reaches past
/// this trait into rendering.
pub trait RenderGateway {
    /// Replace the whole request list.
    fn render_full(&mut self, frame: &ViewFrame<'_>);

    /// Fast path: prepend one new row, list otherwise untouched.
    fn render_new(&mut self, event: &Event, metrics: Metrics);
}

/// Minimal line-oriented gateway used by the CLI binary.
pub struct LinePrinter<W: Write> {
    out: W,
}

impl<W: Write> LinePrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn print_row(&mut self, event: &Event, expanded: bool) {
        let status = event
            .status_code
            .map(|s| s.to_string())
            .unwrap_or_else(|| "---".to_string());
        let duration = event
            .duration_ms
            .map(|d| format!("{d}ms"))
            .unwrap_or_else(|| "---".to_string());
        let service = event
            .service
            .as_deref()
            .map(|s| format!("[{s}] "))
            .unwrap_or_default();

        let _ = writeln!(
            self.out,
            "{}{} {} {} {} {} UTC",
            service,
            event.method,
            event.path,
            status,
            duration,
            event.timestamp.format("%H:%M:%S"),
        );

        if expanded {
            self.print_detail(event);
        }
    }

    fn print_detail(&mut self, event: &Event) {
        let sections = [
            ("Query Parameters", &event.query_params),
            ("Request Body", &event.request_data),
            ("Response", &event.response_data),
            ("Headers", &event.headers),
        ];
        for (label, payload) in sections {
            if let Some(value) = payload {
                let pretty = serde_json::to_string_pretty(value).unwrap_or_default();
                let _ = writeln!(self.out, "  {label}:\n{pretty}");
            }
        }
    }
}

impl<W: Write> RenderGateway for LinePrinter<W> {
    fn render_full(&mut self, frame: &ViewFrame<'_>) {
        let _ = writeln!(
            self.out,
            "── {} requests · {}% success · {}ms avg ──",
            frame.metrics.total, frame.metrics.success_rate_percent, frame.metrics.average_duration_ms,
        );

        if frame.events.is_empty() {
            let message = if frame.log_empty {
                "waiting for traffic..."
            } else {
                "no requests match the current filters"
            };
            let _ = writeln!(self.out, "{message}");
            return;
        }

        for event in &frame.events {
            self.print_row(event, frame.expanded.is_expanded(event.id));
        }
    }

    fn render_new(&mut self, event: &Event, metrics: Metrics) {
        self.print_row(event, false);
        let _ = writeln!(
            self.out,
            "── {} requests · {}% success · {}ms avg ──",
            metrics.total, metrics.success_rate_percent, metrics.average_duration_ms,
        );
    }
}
