//! Live narrowing and ordering criteria

use super::meeting::MeetingStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Selectable ordering key for the ranking engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// By record creation time
    Newest,
    /// By scheduled activity time (default: soonest activity first)
    #[default]
    Latest,
    /// By time remaining until the recruiting deadline
    Deadline,
    /// By participant fill ratio
    Popular,
    /// By host account level
    HostLevel,
}

/// The full set of client-side narrowing and ordering choices.
///
/// Independent of the fetched window: changing any field never triggers a
/// server fetch, only a re-run of the pure filter/rank/paginate chain
/// against the cached record set. The pipeline reads a snapshot of this
/// state each time it recomputes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Exact calendar day to narrow to, in local time
    pub selected_day: Option<NaiveDate>,
    pub status: Option<MeetingStatus>,
    pub category_id: Option<String>,
    pub difficulty: Option<String>,
    pub district_id: Option<String>,
    /// Case-insensitive substring over mission title, description, hashtags
    pub search_keyword: Option<String>,
    /// Keep only meetings with an open seat
    pub available_only: bool,
    pub sort_key: SortKey,
    /// Reverse the ascending sense of the sort key
    pub descending: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sort_is_latest_ascending() {
        let filter = FilterState::default();
        assert_eq!(filter.sort_key, SortKey::Latest);
        assert!(!filter.descending);
        assert!(!filter.available_only);
        assert!(filter.selected_day.is_none());
    }

    #[test]
    fn test_sort_key_wire_names() {
        assert_eq!(
            serde_json::to_string(&SortKey::HostLevel).unwrap(),
            "\"hostLevel\""
        );
        assert_eq!(
            serde_json::from_str::<SortKey>("\"deadline\"").unwrap(),
            SortKey::Deadline
        );
    }
}
