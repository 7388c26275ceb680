//! In-memory audit sink for asserting on authentication events.

use std::sync::Mutex;

use super::audit::{AuthEvent, AuthEventKind, AuthEventLog};

/// Owned copy of an [`AuthEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAuthEvent {
    pub kind: AuthEventKind,
    pub client_addr: String,
    pub username: Option<String>,
    pub line: String,
}

/// Keeps events in memory.
#[derive(Debug, Default)]
pub struct RecordingAuthLog {
    events: Mutex<Vec<RecordedAuthEvent>>,
}

impl RecordingAuthLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<RecordedAuthEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Rendered log lines.
    pub fn lines(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.line).collect()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl AuthEventLog for RecordingAuthLog {
    fn record(&self, event: &AuthEvent<'_>) {
        if let Ok(mut events) = self.events.lock() {
            events.push(RecordedAuthEvent {
                kind: event.kind,
                client_addr: event.client_addr.to_string(),
                username: event.username.map(str::to_string),
                line: event.to_string(),
            });
        }
    }
}
