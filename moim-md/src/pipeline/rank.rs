//! Ranking engine: selectable ordering with direction control

use crate::models::{MeetingRecord, SortKey};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Sort `records` in place by `key`.
///
/// Every comparator computes an ascending-sense ordering; when `descending`
/// is set the ordering is reversed once at the end, so direction toggling is
/// orthogonal to key choice. Sorting is stable: records with equal keys keep
/// their filtered order. `now` anchors deadline distance for the whole pass,
/// keeping a single ranking internally consistent.
///
/// Exception to direction symmetry: under [`SortKey::Deadline`], records
/// whose deadline has already passed rank after all still-open records
/// regardless of direction. A passed deadline is never "soonest".
pub fn sort(records: &mut [MeetingRecord], key: SortKey, descending: bool, now: DateTime<Utc>) {
    records.sort_by(|a, b| compare(a, b, key, descending, now));
}

fn compare(
    a: &MeetingRecord,
    b: &MeetingRecord,
    key: SortKey,
    descending: bool,
    now: DateTime<Utc>,
) -> Ordering {
    // The expired partition sits outside the direction reversal
    if key == SortKey::Deadline {
        match (deadline_expired(a, now), deadline_expired(b, now)) {
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (true, true) => return Ordering::Equal,
            (false, false) => {}
        }
    }

    let ascending = ascending_order(a, b, key);
    if descending {
        ascending.reverse()
    } else {
        ascending
    }
}

fn ascending_order(a: &MeetingRecord, b: &MeetingRecord, key: SortKey) -> Ordering {
    match key {
        // Oldest creation first
        SortKey::Newest => cmp_optional_instant(a.created_at, b.created_at),
        // Soonest activity first
        SortKey::Latest => cmp_optional_instant(a.scheduled_at, b.scheduled_at),
        // Soonest still-open deadline first; remaining time against a shared
        // "now" orders the same way as the deadline instants themselves
        SortKey::Deadline => cmp_optional_instant(a.recruit_until, b.recruit_until),
        // Lower fill ratio first; descending shows most-full first
        SortKey::Popular => a.fill_ratio().total_cmp(&b.fill_ratio()),
        SortKey::HostLevel => a.host_level.unwrap_or(0).cmp(&b.host_level.unwrap_or(0)),
    }
}

/// Null-safe instant comparison: a missing value sorts as the minimum
/// possible for the key
fn cmp_optional_instant(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.cmp(&b),
    }
}

/// A record without a deadline has the minimum possible time remaining,
/// which places it in the expired partition.
fn deadline_expired(record: &MeetingRecord, now: DateTime<Utc>) -> bool {
    match record.recruit_until {
        Some(deadline) => deadline <= now,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MeetingStatus, Mission};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 14, 12, 0, 0).unwrap()
    }

    fn record(id: &str) -> MeetingRecord {
        MeetingRecord {
            id: id.to_string(),
            scheduled_at: None,
            recruit_until: None,
            created_at: None,
            status: MeetingStatus::Recruiting,
            mission: None,
            current_participants: 0,
            likes_count: 0,
            host_level: None,
        }
    }

    fn with_capacity(id: &str, current: u32, max: u32) -> MeetingRecord {
        let mut r = record(id);
        r.mission = Some(Mission {
            max_participants: Some(max),
            ..Default::default()
        });
        r.current_participants = current;
        r
    }

    fn ids(records: &[MeetingRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_latest_ascending_soonest_first() {
        let mut records = vec![record("late"), record("early"), record("mid")];
        records[0].scheduled_at = Some(now() + Duration::hours(30));
        records[1].scheduled_at = Some(now() + Duration::hours(1));
        records[2].scheduled_at = Some(now() + Duration::hours(10));

        sort(&mut records, SortKey::Latest, false, now());
        assert_eq!(ids(&records), vec!["early", "mid", "late"]);
    }

    #[test]
    fn test_newest_ascending_oldest_creation_first() {
        let mut records = vec![record("b"), record("a")];
        records[0].created_at = Some(now() - Duration::days(1));
        records[1].created_at = Some(now() - Duration::days(3));

        sort(&mut records, SortKey::Newest, false, now());
        assert_eq!(ids(&records), vec!["a", "b"]);

        sort(&mut records, SortKey::Newest, true, now());
        assert_eq!(ids(&records), vec!["b", "a"]);
    }

    #[test]
    fn test_missing_sort_field_is_minimum() {
        let mut records = vec![record("dated"), record("undated")];
        records[0].scheduled_at = Some(now());

        sort(&mut records, SortKey::Latest, false, now());
        assert_eq!(ids(&records), vec!["undated", "dated"]);

        sort(&mut records, SortKey::Latest, true, now());
        assert_eq!(ids(&records), vec!["dated", "undated"]);
    }

    #[test]
    fn test_direction_symmetry_is_reverse() {
        let mut forward = vec![record("a"), record("b"), record("c"), record("d")];
        forward[0].host_level = Some(3);
        forward[1].host_level = Some(9);
        forward[2].host_level = None;
        forward[3].host_level = Some(5);
        let mut backward = forward.clone();

        sort(&mut forward, SortKey::HostLevel, false, now());
        sort(&mut backward, SortKey::HostLevel, true, now());

        let mut reversed = ids(&forward);
        reversed.reverse();
        assert_eq!(ids(&backward), reversed);
    }

    #[test]
    fn test_stability_for_equal_keys() {
        // Same scheduled time everywhere: filtered order must survive
        let mut records = vec![record("first"), record("second"), record("third")];
        for r in records.iter_mut() {
            r.scheduled_at = Some(now());
        }

        sort(&mut records, SortKey::Latest, false, now());
        assert_eq!(ids(&records), vec!["first", "second", "third"]);

        sort(&mut records, SortKey::Latest, true, now());
        assert_eq!(ids(&records), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_deadline_open_before_expired_both_directions() {
        // A expired 2 hours ago, B closes in 2 hours: B first either way
        let mut records = vec![record("a"), record("b")];
        records[0].recruit_until = Some(now() - Duration::hours(2));
        records[1].recruit_until = Some(now() + Duration::hours(2));

        sort(&mut records, SortKey::Deadline, false, now());
        assert_eq!(ids(&records), vec!["b", "a"]);

        sort(&mut records, SortKey::Deadline, true, now());
        assert_eq!(ids(&records), vec!["b", "a"]);
    }

    #[test]
    fn test_deadline_orders_open_records_by_remaining_time() {
        let mut records = vec![record("later"), record("soon"), record("expired")];
        records[0].recruit_until = Some(now() + Duration::hours(8));
        records[1].recruit_until = Some(now() + Duration::hours(1));
        records[2].recruit_until = Some(now() - Duration::minutes(1));

        sort(&mut records, SortKey::Deadline, false, now());
        assert_eq!(ids(&records), vec!["soon", "later", "expired"]);

        // Direction reverses only the open partition
        sort(&mut records, SortKey::Deadline, true, now());
        assert_eq!(ids(&records), vec!["later", "soon", "expired"]);
    }

    #[test]
    fn test_deadline_expired_records_keep_stable_order() {
        let mut records = vec![record("x"), record("y"), record("open")];
        records[0].recruit_until = Some(now() - Duration::hours(5));
        records[1].recruit_until = None; // missing deadline is expired
        records[2].recruit_until = Some(now() + Duration::hours(5));

        sort(&mut records, SortKey::Deadline, false, now());
        assert_eq!(ids(&records), vec!["open", "x", "y"]);
    }

    #[test]
    fn test_popular_descending_most_full_first() {
        // Capacity 4, participants [1, 2, 3, 0]
        let mut records = vec![
            with_capacity("one", 1, 4),
            with_capacity("two", 2, 4),
            with_capacity("three", 3, 4),
            with_capacity("zero", 0, 4),
        ];

        sort(&mut records, SortKey::Popular, true, now());
        assert_eq!(ids(&records), vec!["three", "two", "one", "zero"]);
    }

    #[test]
    fn test_popular_unknown_capacity_uses_ratio_policy() {
        // Unknown capacity counts as 1 for the ratio, so 2 participants
        // outranks a half-full room when descending
        let mut records = vec![with_capacity("half", 2, 4), record("unknown")];
        records[1].current_participants = 2;

        sort(&mut records, SortKey::Popular, true, now());
        assert_eq!(ids(&records), vec!["unknown", "half"]);
    }

    #[test]
    fn test_host_level_missing_treated_as_zero() {
        let mut records = vec![record("levelled"), record("unlevelled")];
        records[0].host_level = Some(1);

        sort(&mut records, SortKey::HostLevel, false, now());
        assert_eq!(ids(&records), vec!["unlevelled", "levelled"]);
    }
}
