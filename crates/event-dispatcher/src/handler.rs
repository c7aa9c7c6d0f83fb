//! The capability contract event handlers satisfy.

use async_trait::async_trait;

use crate::{Event, Result};

/// A reaction to a dispatched event.
///
/// Handlers are supplied by the surrounding application; the dispatcher
/// neither constructs nor owns them, it only holds shared references. A
/// handler returning an error aborts the remaining fan-out for that
/// notification.
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Returns the name of this handler, used in error and log output.
    fn name(&self) -> &'static str;

    /// Reacts to a single event.
    async fn handle(&self, event: &Event) -> Result<()>;
}
