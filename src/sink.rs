//! # Domain Log Sink
//!
//! Locations and workers report what happens to carts through a [`LogSink`]:
//! a single fire-and-forget `record(component, message)` call. The default
//! [`TracingSink`] forwards every record to `tracing` with the component as a
//! structured field, so the usual `RUST_LOG` filtering applies:
//!
//! ```text
//! INFO cart [3] (0) arrives at the mine component="PRODUCER"
//! INFO descends with cart [3] (0) component="ELEVATOR"
//! INFO cart [3] (1) collected from station 0 component="STATION-0"
//! ```
//!
//! [`RecordingSink`] keeps records in memory for assertions in tests.

use std::sync::Mutex;

/// Receives domain events. Implementations must not block or fail.
pub trait LogSink: Send + Sync {
    fn record(&self, component: &str, message: &str);
}

/// Forwards records to `tracing` at `INFO`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn record(&self, component: &str, message: &str) {
        tracing::info!(component, "{message}");
    }
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records so far, in order.
    pub fn entries(&self) -> Vec<(String, String)> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Messages recorded by one component.
    pub fn messages_for(&self, component: &str) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(c, _)| c == component)
            .map(|(_, m)| m)
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn record(&self, component: &str, message: &str) {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.push((component.to_string(), message.to_string()));
    }
}
