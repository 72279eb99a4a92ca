//! Meeting record types
//!
//! Wire shapes mirror the listing endpoint's JSON (camelCase field names).
//! The discovery pipeline only ever reads these records; it never mutates
//! them or writes them back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Meeting lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Recruiting,
    Active,
    Completed,
    Cancelled,
}

/// Mission sub-record attached to a meeting
///
/// Every field is optional on the wire; the filter excludes records lacking
/// a sub-field while the corresponding criterion is active.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mission {
    #[serde(rename = "categoryId")]
    pub category_id: Option<String>,
    pub difficulty: Option<String>,
    #[serde(rename = "districtId")]
    pub district_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub hashtags: Vec<String>,
    /// Mission-defined capacity, at least 1 when present
    #[serde(rename = "maxParticipants")]
    pub max_participants: Option<u32>,
}

/// One meeting row returned by the listing feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingRecord {
    /// Opaque identity, stable and unique within a window
    pub id: String,
    /// When the meeting activity occurs
    #[serde(rename = "scheduledAt")]
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Sign-up deadline
    #[serde(rename = "recruitUntil")]
    pub recruit_until: Option<DateTime<Utc>>,
    /// Record creation time
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    pub status: MeetingStatus,
    pub mission: Option<Mission>,
    #[serde(rename = "currentParticipants", default)]
    pub current_participants: u32,
    #[serde(rename = "likesCount", default)]
    pub likes_count: u32,
    /// Host account level
    #[serde(rename = "hostLevel")]
    pub host_level: Option<u32>,
}

impl MeetingRecord {
    /// Whether the meeting still has an open seat.
    ///
    /// Unknown capacity counts as full: a record without a mission-defined
    /// `max_participants` never passes the availability filter.
    pub fn has_open_seat(&self) -> bool {
        let capacity = self
            .mission
            .as_ref()
            .and_then(|m| m.max_participants)
            .unwrap_or(0);
        self.current_participants < capacity
    }

    /// Participant fill ratio used by popularity ranking.
    ///
    /// Unknown or zero capacity counts as 1 here; this is deliberately a
    /// separate policy from [`MeetingRecord::has_open_seat`].
    pub fn fill_ratio(&self) -> f64 {
        let capacity = self
            .mission
            .as_ref()
            .and_then(|m| m.max_participants)
            .unwrap_or(1)
            .max(1);
        f64::from(self.current_participants) / f64::from(capacity)
    }
}
