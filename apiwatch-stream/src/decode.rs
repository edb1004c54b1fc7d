use apiwatch_core::error::WatchError;
use apiwatch_core::event::RawEvent;
use serde::Deserialize;

/// One decoded inbound frame.
#[derive(Debug)]
pub enum WireMessage {
    /// The one-time backlog replay sent on connect, in chronological
    /// delivery order.
    History(Vec<RawEvent>),
    /// A single live event. The collector sends these bare, with no
    /// `type` wrapper.
    Live(RawEvent),
}

#[derive(Deserialize)]
struct HistoryFrame {
    data: Vec<RawEvent>,
}

/// Classify and decode one text frame.
///
/// An object whose `type` field equals `"history"` is the backlog;
/// anything else must parse as a bare [`RawEvent`]. A decode failure is
/// scoped to this one frame — callers skip it and keep reading.
pub fn decode_message(text: &str) -> Result<WireMessage, WatchError> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| WatchError::Decode(format!("invalid JSON frame: {e}")))?;

    if value.get("type").and_then(|t| t.as_str()) == Some("history") {
        let frame: HistoryFrame = serde_json::from_value(value)
            .map_err(|e| WatchError::Decode(format!("malformed history frame: {e}")))?;
        return Ok(WireMessage::History(frame.data));
    }

    let raw: RawEvent = serde_json::from_value(value)
        .map_err(|e| WatchError::Decode(format!("malformed event frame: {e}")))?;
    Ok(WireMessage::Live(raw))
}
