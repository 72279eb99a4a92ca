//! Criteria filter: pure narrowing of the cached record set

use crate::models::{FilterState, MeetingRecord};
use chrono::{Local, NaiveDate};

/// Apply every active predicate in `filter` to `records`.
///
/// Pure and total: input records are never mutated, relative order is
/// preserved for downstream tie-breaking, and the function is idempotent.
/// Predicates run in the documented order (day, status, mission fields,
/// keyword, availability) though the result does not depend on it.
pub fn apply(records: &[MeetingRecord], filter: &FilterState) -> Vec<MeetingRecord> {
    records
        .iter()
        .filter(|record| matches(record, filter))
        .cloned()
        .collect()
}

fn matches(record: &MeetingRecord, filter: &FilterState) -> bool {
    if let Some(day) = filter.selected_day {
        if !falls_on_day(record, day) {
            return false;
        }
    }

    if let Some(status) = filter.status {
        if record.status != status {
            return false;
        }
    }

    // Mission sub-field criteria exclude records lacking the sub-field
    if let Some(category_id) = filter.category_id.as_deref() {
        if mission_field(record, |m| m.category_id.as_deref()) != Some(category_id) {
            return false;
        }
    }

    if let Some(difficulty) = filter.difficulty.as_deref() {
        if mission_field(record, |m| m.difficulty.as_deref()) != Some(difficulty) {
            return false;
        }
    }

    if let Some(district_id) = filter.district_id.as_deref() {
        if mission_field(record, |m| m.district_id.as_deref()) != Some(district_id) {
            return false;
        }
    }

    if let Some(keyword) = filter.search_keyword.as_deref() {
        // A blank keyword is an inactive criterion, not a match-nothing one
        if !keyword.trim().is_empty() && !matches_keyword(record, keyword) {
            return false;
        }
    }

    if filter.available_only && !record.has_open_seat() {
        return false;
    }

    true
}

/// Day narrowing compares the scheduled instant converted to local time;
/// a record without a scheduled time never falls on a selected day.
fn falls_on_day(record: &MeetingRecord, day: NaiveDate) -> bool {
    match record.scheduled_at {
        Some(at) => at.with_timezone(&Local).date_naive() == day,
        None => false,
    }
}

fn mission_field<'a>(
    record: &'a MeetingRecord,
    field: impl Fn(&'a crate::models::Mission) -> Option<&'a str>,
) -> Option<&'a str> {
    record.mission.as_ref().and_then(field)
}

/// Case-insensitive substring match against mission title, description,
/// or any hashtag
fn matches_keyword(record: &MeetingRecord, keyword: &str) -> bool {
    let needle = keyword.to_lowercase();
    let Some(mission) = record.mission.as_ref() else {
        return false;
    };

    let haystack_contains =
        |text: Option<&str>| text.is_some_and(|t| t.to_lowercase().contains(&needle));

    haystack_contains(mission.title.as_deref())
        || haystack_contains(mission.description.as_deref())
        || mission
            .hashtags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}
