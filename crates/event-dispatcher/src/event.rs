//! The event envelope handed to handlers.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::Result;

/// Something that happened in the domain.
///
/// The envelope records when the occurrence happened and carries an opaque
/// JSON payload. It deliberately does not name its own type: routing is
/// decided by the event-type string the notifying caller passes to
/// [`EventDispatcher::notify`](crate::EventDispatcher::notify), so new
/// event types need no change here.
#[derive(Debug, Clone)]
pub struct Event {
    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,

    /// Opaque payload; each handler decides how to interpret it.
    pub payload: serde_json::Value,
}

impl Event {
    /// Creates an event occurring now with a raw JSON payload.
    pub fn new(payload: serde_json::Value) -> Self {
        Self {
            occurred_at: Utc::now(),
            payload,
        }
    }

    /// Creates an event occurring now by serializing a typed payload.
    pub fn from_payload<T: Serialize>(payload: &T) -> Result<Self> {
        Ok(Self::new(serde_json::to_value(payload)?))
    }
}
