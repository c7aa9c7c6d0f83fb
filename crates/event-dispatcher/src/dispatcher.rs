//! Registry and fan-out.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{Event, EventHandler, Result};

/// Maps event-type strings to the handlers interested in them.
///
/// Any string may be used as an event type; registering a handler for a new
/// type needs no change here. Handlers under one type are kept in
/// registration order, which is also the notification order. The same
/// handler may be registered more than once and is then invoked once per
/// registration.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: HashMap<String, Vec<Arc<dyn EventHandler>>>,
}

impl EventDispatcher {
    /// Creates a dispatcher with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler to the sequence registered under `event_type`,
    /// creating the sequence if absent.
    pub fn register(&mut self, event_type: impl Into<String>, handler: Arc<dyn EventHandler>) {
        self.handlers.entry(event_type.into()).or_default().push(handler);
    }

    /// Removes the first registration of `handler` under `event_type`,
    /// comparing by object identity.
    ///
    /// Unknown event types are a no-op. A sequence emptied by removal keeps
    /// its key, so callers can tell an existing-but-empty bucket apart from
    /// a never-registered one.
    pub fn unregister(&mut self, event_type: &str, handler: &Arc<dyn EventHandler>) {
        if let Some(registered) = self.handlers.get_mut(event_type)
            && let Some(pos) = registered.iter().position(|h| Arc::ptr_eq(h, handler))
        {
            registered.remove(pos);
        }
    }

    /// Clears the entire registry, removing every event-type key.
    pub fn unregister_all(&mut self) {
        self.handlers.clear();
    }

    /// Read-only view of the current registry.
    pub fn handlers(&self) -> &HashMap<String, Vec<Arc<dyn EventHandler>>> {
        &self.handlers
    }

    /// Number of handlers currently registered under `event_type`.
    pub fn handler_count(&self, event_type: &str) -> usize {
        self.handlers.get(event_type).map(Vec::len).unwrap_or(0)
    }

    /// Delivers `event` to every handler registered under `event_type`,
    /// in registration order, awaiting each before invoking the next.
    ///
    /// Returns once all handlers have completed. An unknown event type is a
    /// no-op. A handler error propagates immediately and the remaining
    /// handlers are not invoked for this notification.
    #[tracing::instrument(skip(self, event), fields(event_type = event_type))]
    pub async fn notify(&self, event_type: &str, event: &Event) -> Result<()> {
        let Some(registered) = self.handlers.get(event_type) else {
            return Ok(());
        };

        for handler in registered {
            tracing::debug!(handler = handler.name(), "delivering event");
            handler.handle(event).await?;
            metrics::counter!("dispatcher_events_delivered").increment(1);
        }

        Ok(())
    }
}
