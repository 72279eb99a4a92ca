//! Data models for moim-md (Meeting Discovery module)

pub mod filter;
pub mod meeting;
pub mod window;

pub use filter::{FilterState, SortKey};
pub use meeting::{MeetingRecord, MeetingStatus, Mission};
pub use window::WeekWindow;
