//! Core platform context

use pkgv_events::{EventEmitter, EventSender};
use std::collections::BTreeMap;

/// Context for platform operations, providing event emission and metadata tracking
#[derive(Debug, Clone, Default)]
pub struct PlatformContext {
    event_sender: Option<EventSender>,
    operation_metadata: BTreeMap<String, String>,
}

impl PlatformContext {
    /// Create a new platform context with event emission capabilities
    #[must_use]
    pub fn new(event_sender: Option<EventSender>) -> Self {
        Self {
            event_sender,
            operation_metadata: BTreeMap::new(),
        }
    }

    /// Add custom metadata to the context
    pub fn add_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.operation_metadata.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.operation_metadata
    }
}

impl EventEmitter for PlatformContext {
    fn event_sender(&self) -> Option<&EventSender> {
        self.event_sender.as_ref()
    }
}
