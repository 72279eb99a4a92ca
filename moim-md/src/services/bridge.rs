//! Selection bridge: external day/week selection and the `date` parameter
//!
//! Translates the externally chosen single day and week window into
//! pipeline operations, and mirrors the selected day into one external
//! string parameter (URL/query-state) in `YYYY-MM-DD` form. The parameter
//! holder is an injected collaborator; nothing else about filter, sort, or
//! page state is persisted outside the pipeline.

use crate::models::WeekWindow;
use crate::pipeline::DiscoveryPipeline;
use crate::services::feed_client::FeedError;
use chrono::{Local, NaiveDate};
use moim_common::time::{format_iso_date, parse_iso_date};
use std::sync::Arc;
use tracing::warn;

/// The external query-state collaborator holding the `date` parameter
pub trait DateParam: Send + Sync {
    fn read(&self) -> Option<String>;
    fn write(&self, value: &str);
}

/// Bridges external selection events into the discovery pipeline
pub struct SelectionBridge {
    pipeline: Arc<DiscoveryPipeline>,
    param: Arc<dyn DateParam>,
}

impl SelectionBridge {
    pub fn new(pipeline: Arc<DiscoveryPipeline>, param: Arc<dyn DateParam>) -> Self {
        Self { pipeline, param }
    }

    /// Resolve the initial selected day, then perform the initial load.
    ///
    /// A valid `date` parameter is adopted as-is. An absent parameter (a
    /// malformed one counts as absent) defaults to today and is written
    /// back exactly once; there is no recurring sync.
    pub async fn mount(&self) -> Result<NaiveDate, FeedError> {
        let day = match self.read_param_day() {
            Some(day) => day,
            None => {
                let today = Local::now().date_naive();
                self.param.write(&format_iso_date(today));
                today
            }
        };

        self.pipeline.set_day(Some(day)).await;
        self.pipeline.mount().await?;
        Ok(day)
    }

    /// Week navigation: replaces the window (snapped to its Monday–Sunday
    /// week), resets the page, and triggers a foreground load
    pub async fn change_week(&self, date_in_week: NaiveDate) -> Result<(), FeedError> {
        self.pipeline
            .set_week(WeekWindow::containing(date_in_week))
            .await
    }

    /// Day selection: re-filters cached data, resets the page, mirrors the
    /// parameter. Never fetches.
    pub async fn change_day(&self, day: Option<NaiveDate>) {
        self.pipeline.set_day(day).await;
        if let Some(day) = day {
            self.param.write(&format_iso_date(day));
        }
    }

    fn read_param_day(&self) -> Option<NaiveDate> {
        let raw = self.param.read()?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match parse_iso_date(trimmed) {
            Some(day) => Some(day),
            None => {
                warn!(value = trimmed, "Ignoring malformed date parameter");
                None
            }
        }
    }
}
