//! Collaborator services for meeting discovery

pub mod bridge;
pub mod feed_client;
pub(crate) mod scheduler;

pub use bridge::{DateParam, SelectionBridge};
pub use feed_client::{FeedError, FeedPage, FeedRequest, HttpFeedClient, MeetingFeed};
