//! Refresh scheduler: foreground loads and background polling
//!
//! Two distinct triggers drive the same fetch routine. A foreground load is
//! one the user is implicitly waiting on: it flags `is_foreground_loading`
//! and clears the store on failure so navigation never shows another week's
//! stale data. A background poll is silent: it flags
//! `is_background_refreshing` and on failure leaves last-known-good data in
//! place. Every fetch is tagged with the window token captured at dispatch;
//! completions whose token no longer matches the store are discarded.

use crate::config::DiscoveryConfig;
use crate::events::{DiscoveryEvent, EventBus};
use crate::models::WeekWindow;
use crate::pipeline::PipelineState;
use crate::services::feed_client::{FeedError, FeedRequest, MeetingFeed};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub(crate) struct RefreshScheduler {
    feed: Arc<dyn MeetingFeed>,
    state: Arc<RwLock<PipelineState>>,
    events: EventBus,
    poll_interval: Duration,
    mission_id: Option<String>,
    fetch_size_hint: u32,
    /// Cancelled on pipeline teardown; parent of every poll-task token
    lifecycle: CancellationToken,
    /// Token of the currently bound poll task, if any
    poll_task: Mutex<Option<CancellationToken>>,
}

impl RefreshScheduler {
    pub(crate) fn new(
        feed: Arc<dyn MeetingFeed>,
        state: Arc<RwLock<PipelineState>>,
        events: EventBus,
        config: &DiscoveryConfig,
    ) -> Self {
        Self {
            feed,
            state,
            events,
            poll_interval: config.poll_interval,
            mission_id: config.mission_id.clone(),
            fetch_size_hint: config.fetch_size_hint,
            lifecycle: CancellationToken::new(),
            poll_task: Mutex::new(None),
        }
    }

    fn request_for(&self, window: WeekWindow) -> FeedRequest {
        FeedRequest {
            window,
            mission_id: self.mission_id.clone(),
            size: self.fetch_size_hint,
        }
    }

    /// Foreground load for window generation `token`.
    ///
    /// On failure the store is cleared: the view shows an explicit empty
    /// state with the error surfaced to the caller, and retry happens by
    /// re-triggering the same week.
    pub(crate) async fn load_foreground(&self, token: u64) -> Result<(), FeedError> {
        let request = {
            let mut state = self.state.write().await;
            if !state.store.is_current(token) {
                return Ok(());
            }
            state.store.meta_mut().is_foreground_loading = true;
            self.request_for(state.store.window())
        };
        self.events
            .emit(DiscoveryEvent::RefreshStarted { background: false });

        let result = self.feed.fetch_week(&request).await;

        let mut state = self.state.write().await;
        if !state.store.is_current(token) || self.lifecycle.is_cancelled() {
            debug!(token, "Dropping foreground response for superseded window");
            return Ok(());
        }
        state.store.meta_mut().is_foreground_loading = false;

        match result {
            Ok(page) => {
                let record_count = page.meetings.len();
                let fetched_at = moim_common::time::now();
                state.store.replace_records(page.meetings, fetched_at);
                info!(
                    record_count,
                    week_start = %request.window.start_param(),
                    "Foreground load complete"
                );
                self.events.emit(DiscoveryEvent::RefreshCompleted {
                    background: false,
                    record_count,
                    timestamp: fetched_at,
                });
                Ok(())
            }
            Err(e) => {
                state.store.clear_records();
                warn!(error = %e, week_start = %request.window.start_param(), "Foreground load failed");
                self.events.emit(DiscoveryEvent::RefreshFailed {
                    background: false,
                    error: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// One background poll cycle for window generation `token`.
    ///
    /// Failures are swallowed here: last-known-good data stays visible and
    /// the next tick is the retry mechanism.
    pub(crate) async fn poll_once(&self, token: u64) {
        let request = {
            let mut state = self.state.write().await;
            if !state.store.is_current(token) {
                return;
            }
            // One fetch cycle at a time: foreground and background flags
            // are mutually exclusive, and polls never stack
            if state.store.meta().is_foreground_loading
                || state.store.meta().is_background_refreshing
            {
                debug!("Skipping poll tick; a fetch is already in flight");
                return;
            }
            state.store.meta_mut().is_background_refreshing = true;
            self.request_for(state.store.window())
        };
        self.events
            .emit(DiscoveryEvent::RefreshStarted { background: true });

        let result = self.feed.fetch_week(&request).await;

        let mut state = self.state.write().await;
        if !state.store.is_current(token) || self.lifecycle.is_cancelled() {
            debug!(token, "Dropping poll response for superseded window");
            return;
        }
        state.store.meta_mut().is_background_refreshing = false;

        match result {
            Ok(page) => {
                let record_count = page.meetings.len();
                let fetched_at = moim_common::time::now();
                state.store.replace_records(page.meetings, fetched_at);
                debug!(record_count, "Background refresh complete");
                self.events.emit(DiscoveryEvent::RefreshCompleted {
                    background: true,
                    record_count,
                    timestamp: fetched_at,
                });
            }
            Err(e) => {
                warn!(error = %e, "Background refresh failed; keeping previous records");
                self.events.emit(DiscoveryEvent::RefreshFailed {
                    background: true,
                    error: e.to_string(),
                });
            }
        }
    }

    /// Bind the poll timer to window generation `token`, cancelling any
    /// previously bound timer.
    pub(crate) async fn start_polling(self: Arc<Self>, token: u64) {
        let task_token = self.lifecycle.child_token();
        if let Some(previous) = self.poll_task.lock().await.replace(task_token.clone()) {
            previous.cancel();
        }

        let scheduler = Arc::clone(&self);
        let poll_interval = self.poll_interval;
        tokio::spawn(async move {
            // First tick lands one full interval after binding; the
            // foreground load for this window has just been dispatched
            let mut interval =
                time::interval_at(time::Instant::now() + poll_interval, poll_interval);

            info!(
                interval_secs = poll_interval.as_secs(),
                token, "Background poll started"
            );

            loop {
                tokio::select! {
                    _ = task_token.cancelled() => {
                        debug!(token, "Background poll stopped");
                        break;
                    }
                    _ = interval.tick() => {
                        scheduler.poll_once(token).await;
                    }
                }
            }
        });
    }

    /// Stop the bound poll timer without tearing down the scheduler
    pub(crate) async fn stop_polling(&self) {
        if let Some(task_token) = self.poll_task.lock().await.take() {
            task_token.cancel();
        }
    }

    /// Teardown: cancels polling and turns in-flight completions into no-ops
    pub(crate) fn shutdown(&self) {
        self.lifecycle.cancel();
    }
}
