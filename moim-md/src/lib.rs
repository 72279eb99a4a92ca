//! # moim-md: Meeting Discovery pipeline
//!
//! Loads a week of meeting records from the listing feed, narrows them by
//! several independent criteria, orders them by a selectable key with
//! direction control, paginates the result, and keeps the view fresh with a
//! silent background poll that never degrades a working view on failure.
//!
//! The crate owns no rendering, routes, storage, or CLI. The view layer
//! constructs a [`DiscoveryPipeline`] (optionally behind a
//! [`SelectionBridge`] for date-parameter sync), drives it with selection
//! and filter changes, and renders the [`DiscoveryView`] snapshots it
//! returns.

pub mod config;
pub mod events;
pub mod models;
pub mod pipeline;
pub mod services;

pub use config::DiscoveryConfig;
pub use events::{DiscoveryEvent, EventBus};
pub use models::{FilterState, MeetingRecord, MeetingStatus, Mission, SortKey, WeekWindow};
pub use pipeline::{DiscoveryPipeline, DiscoveryView};
pub use services::{DateParam, FeedError, FeedPage, FeedRequest, HttpFeedClient, MeetingFeed, SelectionBridge};
