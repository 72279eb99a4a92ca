//! Discovery event definitions and bus
//!
//! Lets the view layer observe refresh lifecycle (in particular silent
//! background completions) instead of polling the pipeline for changes.

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::broadcast;

/// Discovery event types
#[derive(Debug, Clone)]
pub enum DiscoveryEvent {
    /// The week window was replaced by navigation
    WindowChanged {
        week_start: NaiveDate,
        week_end: NaiveDate,
    },

    /// A fetch cycle began
    RefreshStarted { background: bool },

    /// A fetch cycle replaced the record set
    RefreshCompleted {
        background: bool,
        record_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// A fetch cycle failed. Background failures leave the previous record
    /// set visible; foreground failures clear it.
    RefreshFailed { background: bool, error: String },
}

/// Broadcast bus for discovery events.
///
/// Backed by `tokio::sync::broadcast`: subscribers receive events emitted
/// after subscription, and slow subscribers lose the oldest events rather
/// than blocking the pipeline.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DiscoveryEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<DiscoveryEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers; an empty audience is not an error
    pub fn emit(&self, event: DiscoveryEvent) {
        let _ = self.tx.send(event);
    }
}
