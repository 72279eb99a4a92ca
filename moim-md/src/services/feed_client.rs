//! Meetings listing feed client
//!
//! The one suspension point of the pipeline. Everything downstream of the
//! window store is synchronous pure computation.

use crate::models::{MeetingRecord, WeekWindow};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const USER_AGENT: &str = "moim-md/0.1.0";

/// Feed client errors
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// One listing request: a week window plus optional mission scope
#[derive(Debug, Clone)]
pub struct FeedRequest {
    pub window: WeekWindow,
    pub mission_id: Option<String>,
    /// Server-side page size hint; the pipeline paginates client-side
    pub size: u32,
}

/// Raw listing response.
///
/// The server echoes its own pagination metadata; the pipeline paginates
/// client-side and ignores it.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedPage {
    #[serde(default)]
    pub meetings: Vec<MeetingRecord>,
    #[serde(rename = "totalPages")]
    pub total_pages: Option<u32>,
    #[serde(rename = "totalElements")]
    pub total_elements: Option<u64>,
}

/// Source of meeting records for a week window
#[async_trait]
pub trait MeetingFeed: Send + Sync {
    async fn fetch_week(&self, request: &FeedRequest) -> Result<FeedPage, FeedError>;
}

/// HTTP implementation against the meetings listing endpoint
pub struct HttpFeedClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpFeedClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let base_url = base_url.into();

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn request_url(&self, request: &FeedRequest) -> String {
        let mut url = format!(
            "{}/meetings?weekStartDate={}&weekEndDate={}&size={}",
            self.base_url,
            request.window.start_param(),
            request.window.end_param(),
            request.size,
        );

        if let Some(mission_id) = &request.mission_id {
            url.push_str("&missionId=");
            url.push_str(mission_id);
        }

        url
    }
}

#[async_trait]
impl MeetingFeed for HttpFeedClient {
    async fn fetch_week(&self, request: &FeedRequest) -> Result<FeedPage, FeedError> {
        let url = self.request_url(request);

        tracing::debug!(url = %url, "Querying meetings feed");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(FeedError::Api(status.as_u16(), error_text));
        }

        let page: FeedPage = response
            .json()
            .await
            .map_err(|e| FeedError::Parse(e.to_string()))?;

        tracing::debug!(
            count = page.meetings.len(),
            week_start = %request.window.start_param(),
            "Retrieved meetings from feed"
        );

        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn week() -> WeekWindow {
        WeekWindow::containing(NaiveDate::from_ymd_opt(2025, 8, 14).unwrap())
    }

    #[test]
    fn test_client_creation() {
        let client = HttpFeedClient::new("https://api.moim.example", Duration::from_secs(30));
        assert!(client.is_ok());
    }

    #[test]
    fn test_request_url_without_mission() {
        let client =
            HttpFeedClient::new("https://api.moim.example/", Duration::from_secs(30)).unwrap();
        let request = FeedRequest {
            window: week(),
            mission_id: None,
            size: 100,
        };

        assert_eq!(
            client.request_url(&request),
            "https://api.moim.example/meetings?weekStartDate=2025-08-11&weekEndDate=2025-08-17&size=100"
        );
    }

    #[test]
    fn test_request_url_with_mission() {
        let client =
            HttpFeedClient::new("https://api.moim.example", Duration::from_secs(30)).unwrap();
        let request = FeedRequest {
            window: week(),
            mission_id: Some("msn-42".to_string()),
            size: 50,
        };

        assert!(client.request_url(&request).ends_with("&size=50&missionId=msn-42"));
    }

    #[test]
    fn test_feed_page_deserializes_echo_fields() {
        let json = r#"{
            "meetings": [{"id": "mt-1", "status": "recruiting"}],
            "totalPages": 3,
            "totalElements": 57
        }"#;

        let page: FeedPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.meetings.len(), 1);
        assert_eq!(page.total_pages, Some(3));
        assert_eq!(page.total_elements, Some(57));
    }

    #[test]
    fn test_feed_page_tolerates_missing_fields() {
        let page: FeedPage = serde_json::from_str("{}").unwrap();
        assert!(page.meetings.is_empty());
        assert!(page.total_pages.is_none());
    }
}
