//! Monday–Sunday week window

use chrono::{Days, Local, NaiveDate, Weekday};
use moim_common::time::format_iso_date;

/// The Monday–Sunday calendar range currently fetched from the feed.
///
/// The sole unit the feed is ever queried with. Replaced wholesale by
/// explicit week navigation, never changed by filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    /// Monday
    start: NaiveDate,
    /// Sunday
    end: NaiveDate,
}

impl WeekWindow {
    /// The week containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        let start = date.week(Weekday::Mon).first_day();
        Self {
            start,
            end: start + Days::new(6),
        }
    }

    /// The week containing today, in local time
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn next(&self) -> Self {
        Self {
            start: self.start + Days::new(7),
            end: self.end + Days::new(7),
        }
    }

    pub fn prev(&self) -> Self {
        Self {
            start: self.start - Days::new(7),
            end: self.end - Days::new(7),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// `YYYY-MM-DD` start date for the feed request
    pub fn start_param(&self) -> String {
        format_iso_date(self.start)
    }

    /// `YYYY-MM-DD` end date for the feed request
    pub fn end_param(&self) -> String {
        format_iso_date(self.end)
    }
}
