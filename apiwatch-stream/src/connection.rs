use crate::decode::{WireMessage, decode_message};
use apiwatch_core::config::StreamConfig;
use apiwatch_core::event::RawEvent;
use futures::StreamExt;
use std::time::Duration;
use tokio::time::sleep;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

/// Connection lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Items yielded to the owning session.
#[derive(Debug)]
pub enum StreamItem {
    /// Transport established; the backlog frame follows.
    Connected,
    /// The one-time backlog replay, in chronological delivery order.
    Backlog(Vec<RawEvent>),
    /// A single live event.
    Event(RawEvent),
    /// The transport closed or failed. Terminal unless the reconnect
    /// policy says otherwise — a closed connection stays closed until
    /// the owning session reopens it.
    Disconnected { reason: String },
}

/// Live WebSocket connection to the collector's event stream.
///
/// There is no read timeout: a stalled peer waits indefinitely until
/// the counterparty closes.
pub struct LiveConnection {
    url: String,
    policy: StreamConfig,
    state: ConnectionState,
    attempts: u32,
}

impl LiveConnection {
    pub fn new(url: impl Into<String>, policy: StreamConfig) -> Self {
        Self {
            url: url.into(),
            policy,
            state: ConnectionState::Disconnected,
            attempts: 0,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Connect and yield stream items until the connection closes and
    /// the reconnect policy, if any, is exhausted.
    ///
    /// A frame that fails to decode is reported and skipped; the next
    /// frame is still processed.
    pub fn subscribe(&mut self) -> impl futures::Stream<Item = StreamItem> + '_ {
        async_stream::stream! {
            loop {
                self.state = ConnectionState::Connecting;
                info!(url = %self.url, "Connecting to collector stream");

                match connect_async(&self.url).await {
                    Ok((ws_stream, _)) => {
                        self.state = ConnectionState::Connected;
                        self.attempts = 0;
                        yield StreamItem::Connected;

                        let (_write, mut read) = ws_stream.split();

                        while let Some(msg) = read.next().await {
                            match msg {
                                Ok(Message::Text(text)) => match decode_message(&text) {
                                    Ok(WireMessage::History(raws)) => {
                                        debug!(count = raws.len(), "Backlog frame received");
                                        yield StreamItem::Backlog(raws);
                                    }
                                    Ok(WireMessage::Live(raw)) => yield StreamItem::Event(raw),
                                    Err(e) => warn!(error = %e, "Skipping undecodable frame"),
                                },
                                Ok(Message::Ping(_)) => debug!("Ping from collector"),
                                Ok(Message::Close(frame)) => {
                                    let reason = frame
                                        .map(|f| f.reason.to_string())
                                        .unwrap_or_else(|| "closed by peer".to_string());
                                    self.state = ConnectionState::Disconnected;
                                    yield StreamItem::Disconnected { reason };
                                    break;
                                }
                                Err(e) => {
                                    error!(error = %e, "Stream transport error");
                                    self.state = ConnectionState::Disconnected;
                                    yield StreamItem::Disconnected { reason: e.to_string() };
                                    break;
                                }
                                _ => {}
                            }
                        }

                        if self.state == ConnectionState::Connected {
                            // Reader ended without a close frame
                            self.state = ConnectionState::Disconnected;
                            yield StreamItem::Disconnected {
                                reason: "stream ended".to_string(),
                            };
                        }
                    }
                    Err(e) => {
                        self.state = ConnectionState::Disconnected;
                        error!(error = %e, "Failed to connect");
                        yield StreamItem::Disconnected {
                            reason: format!("connect failed: {e}"),
                        };
                    }
                }

                if !self.policy.auto_reconnect {
                    break;
                }

                self.attempts += 1;
                if self.policy.max_reconnect_attempts > 0
                    && self.attempts >= self.policy.max_reconnect_attempts
                {
                    warn!(attempts = self.attempts, "Reconnect attempts exhausted");
                    break;
                }

                info!(
                    attempt = self.attempts,
                    delay_ms = self.policy.reconnect_delay_ms,
                    "Reconnecting"
                );
                sleep(Duration::from_millis(self.policy.reconnect_delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> StreamConfig {
        StreamConfig {
            auto_reconnect: false,
            reconnect_delay_ms: 10,
            max_reconnect_attempts: 0,
        }
    }

    #[test]
    fn new_connection_starts_disconnected() {
        let conn = LiveConnection::new("ws://127.0.0.1:1/ws", policy());
        assert_eq!(conn.state(), ConnectionState::Disconnected);
        assert_eq!(conn.url(), "ws://127.0.0.1:1/ws");
    }

    #[tokio::test]
    async fn failed_connect_yields_disconnected_then_ends() {
        // Port 1 refuses immediately; no reconnect policy, so the
        // stream reports the failure once and finishes
        let mut conn = LiveConnection::new("ws://127.0.0.1:1/ws", policy());
        let stream = conn.subscribe();
        tokio::pin!(stream);

        match stream.next().await {
            Some(StreamItem::Disconnected { reason }) => {
                assert!(reason.contains("connect failed"), "reason: {reason}");
            }
            other => panic!("expected Disconnected, got {other:?}"),
        }
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn reconnect_policy_retries_up_to_the_limit() {
        let mut conn = LiveConnection::new(
            "ws://127.0.0.1:1/ws",
            StreamConfig {
                auto_reconnect: true,
                reconnect_delay_ms: 1,
                max_reconnect_attempts: 3,
            },
        );
        let stream = conn.subscribe();
        tokio::pin!(stream);

        let mut disconnects = 0;
        while let Some(item) = stream.next().await {
            if matches!(item, StreamItem::Disconnected { .. }) {
                disconnects += 1;
            }
        }
        assert_eq!(disconnects, 3);
    }
}
