use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Events not tied to a single verification run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeneralEvent {
    Warning {
        message: String,
    },

    Error {
        message: String,
    },

    /// Debug message with structured fields
    DebugLog {
        message: String,
        context: BTreeMap<String, String>,
    },

    /// Configuration resolved from defaults, file and environment
    ConfigurationLoaded {
        source: String,
    },

    /// A manifest was read and parsed
    ManifestLoaded {
        path: String,
        entries: usize,
    },
}

impl GeneralEvent {
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::Warning {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn debug(message: impl Into<String>) -> Self {
        Self::debug_with_context(message, BTreeMap::new())
    }

    #[must_use]
    pub fn debug_with_context(
        message: impl Into<String>,
        context: BTreeMap<String, String>,
    ) -> Self {
        Self::DebugLog {
            message: message.into(),
            context,
        }
    }
}
