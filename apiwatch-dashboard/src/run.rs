use crate::render::{RenderGateway, ViewFrame};
use crate::session::{DashboardSession, ViewUpdate};
use apiwatch_core::error::WatchError;
use apiwatch_stream::connection::{LiveConnection, StreamItem};
use futures::StreamExt;
use tracing::{info, warn};

/// Drive the session from the live stream until it disconnects.
///
/// Single thread of control: each stream item is fully applied —
/// ingest, stats, projection — before the next one is read. Returns
/// once the connection reports Disconnected and its reconnect policy,
/// if any, is exhausted; reopening is the caller's decision.
pub async fn run<G: RenderGateway>(
    session: &mut DashboardSession,
    connection: &mut LiveConnection,
    gateway: &mut G,
) -> Result<(), WatchError> {
    let stream = connection.subscribe();
    tokio::pin!(stream);

    let mut last_reason = None;

    while let Some(item) = stream.next().await {
        match item {
            StreamItem::Connected => info!("Live stream connected"),
            StreamItem::Backlog(raws) => {
                session.on_backlog(raws);
                render_full(session, gateway);
            }
            StreamItem::Event(raw) => match session.on_new_event(raw) {
                ViewUpdate::Prepend(id) => {
                    let metrics = session.metrics();
                    if let Some(event) = session.event(id) {
                        gateway.render_new(event, metrics);
                    }
                }
                _ => render_full(session, gateway),
            },
            StreamItem::Disconnected { reason } => {
                warn!(reason = %reason, "Live stream disconnected");
                last_reason = Some(reason);
            }
        }
    }

    match last_reason {
        Some(reason) => Err(WatchError::ConnectionClosed(reason)),
        None => Ok(()),
    }
}

/// Recompute the projection and hand the frame across the boundary.
pub fn render_full<G: RenderGateway>(session: &DashboardSession, gateway: &mut G) {
    let projection = session.view();
    gateway.render_full(&ViewFrame {
        events: projection.events,
        log_empty: projection.log_empty,
        expanded: session.expansion(),
        metrics: session.metrics(),
    });
}
