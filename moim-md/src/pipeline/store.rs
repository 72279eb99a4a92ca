//! Window store: single source of truth for the fetched record set

use crate::models::{MeetingRecord, WeekWindow};
use chrono::{DateTime, Utc};

/// Fetch and staleness metadata exposed to the view layer
#[derive(Debug, Clone, Default)]
pub struct RefreshMetadata {
    /// Timestamp of the last successful fetch, foreground or background
    pub last_refreshed_at: Option<DateTime<Utc>>,
    /// A fetch the user is waiting on is in flight
    pub is_foreground_loading: bool,
    /// A silent periodic refresh is in flight
    pub is_background_refreshing: bool,
}

impl RefreshMetadata {
    /// Elapsed time since the last successful fetch, if any
    pub fn age(&self, now: DateTime<Utc>) -> Option<chrono::Duration> {
        self.last_refreshed_at.map(|at| now - at)
    }
}

/// Holds the most recently fetched raw record set for the current week
/// window.
///
/// Mutated only by the refresh scheduler; the pure filter/rank/paginate
/// stages read from it and never write. Each window replacement bumps a
/// monotonically increasing token; fetch completions carrying a stale token
/// must be discarded by the caller.
#[derive(Debug)]
pub struct WindowStore {
    window: WeekWindow,
    token: u64,
    records: Vec<MeetingRecord>,
    meta: RefreshMetadata,
}

impl WindowStore {
    pub fn new(window: WeekWindow) -> Self {
        Self {
            window,
            token: 0,
            records: Vec::new(),
            meta: RefreshMetadata::default(),
        }
    }

    pub fn window(&self) -> WeekWindow {
        self.window
    }

    /// Token identifying the current window generation
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.token == token
    }

    pub fn records(&self) -> &[MeetingRecord] {
        &self.records
    }

    pub fn meta(&self) -> &RefreshMetadata {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut RefreshMetadata {
        &mut self.meta
    }

    /// Replace the window wholesale, invalidating every in-flight fetch.
    ///
    /// Loading flags are reset: any fetch they described belongs to the
    /// superseded window and its completion will be discarded. Returns the
    /// new token for the caller to tag its foreground load with.
    pub fn set_window(&mut self, window: WeekWindow) -> u64 {
        self.window = window;
        self.token += 1;
        self.meta.is_foreground_loading = false;
        self.meta.is_background_refreshing = false;
        self.token
    }

    /// Full replacement on successful fetch; record sets are never merged
    pub fn replace_records(&mut self, records: Vec<MeetingRecord>, fetched_at: DateTime<Utc>) {
        self.records = records;
        self.meta.last_refreshed_at = Some(fetched_at);
    }

    /// Explicit no-data state after a failed foreground fetch
    pub fn clear_records(&mut self) {
        self.records.clear();
    }
}
