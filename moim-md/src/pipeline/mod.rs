//! Meeting discovery pipeline
//!
//! Control flow: week window → feed fetch → window store → criteria filter
//! → ranking engine → pagination slicer → visible page. Fetching happens
//! only on mount, week navigation, explicit reload, and the background
//! poll; every filter, sort, and page change re-runs the pure chain against
//! the cached record set.

pub mod filter;
pub mod paginate;
pub mod rank;
pub mod store;

use crate::config::DiscoveryConfig;
use crate::events::{DiscoveryEvent, EventBus};
use crate::models::{FilterState, MeetingRecord, WeekWindow};
use crate::services::feed_client::{FeedError, MeetingFeed};
use crate::services::scheduler::RefreshScheduler;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

pub use paginate::PageSlice;
pub use store::{RefreshMetadata, WindowStore};

/// Everything the view layer needs to render the visible page
#[derive(Debug, Clone)]
pub struct DiscoveryView {
    pub meetings: Vec<MeetingRecord>,
    /// Requested page (1-based)
    pub page: u32,
    pub total_pages: u32,
    /// Count of all records matching the current filter, before slicing
    pub total_filtered: usize,
    pub is_foreground_loading: bool,
    pub is_background_refreshing: bool,
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

/// Mutable pipeline state behind one lock
pub(crate) struct PipelineState {
    pub(crate) store: WindowStore,
    pub(crate) filter: FilterState,
    pub(crate) page: u32,
}

/// Owns the discovery state and drives the fetch/filter/rank/paginate
/// chain.
///
/// One controller per discovery screen. Collaborators (the feed, the date
/// parameter) are injected; there are no ambient singletons. All methods
/// take `&self`: state lives behind an internal lock so the controller can
/// be shared via `Arc` with the poll task.
pub struct DiscoveryPipeline {
    state: Arc<RwLock<PipelineState>>,
    scheduler: Arc<RefreshScheduler>,
    events: EventBus,
    page_size: usize,
}

impl DiscoveryPipeline {
    /// Build a pipeline for the current week. Nothing is fetched until
    /// [`DiscoveryPipeline::mount`].
    pub fn new(feed: Arc<dyn MeetingFeed>, config: DiscoveryConfig) -> Self {
        Self::with_window(feed, config, WeekWindow::current())
    }

    /// Build a pipeline with an explicit starting window
    pub fn with_window(
        feed: Arc<dyn MeetingFeed>,
        config: DiscoveryConfig,
        window: WeekWindow,
    ) -> Self {
        let events = EventBus::new(64);
        let state = Arc::new(RwLock::new(PipelineState {
            store: WindowStore::new(window),
            filter: FilterState::default(),
            page: 1,
        }));
        let scheduler = Arc::new(RefreshScheduler::new(
            feed,
            Arc::clone(&state),
            events.clone(),
            &config,
        ));

        Self {
            state,
            scheduler,
            events,
            page_size: config.page_size,
        }
    }

    /// Initial foreground load for the starting window, plus poll binding
    pub async fn mount(&self) -> Result<(), FeedError> {
        let token = self.state.read().await.store.token();
        Arc::clone(&self.scheduler).start_polling(token).await;
        self.scheduler.load_foreground(token).await
    }

    /// Replace the week window: page reset, poll rebind, foreground load.
    ///
    /// Any fetch still in flight for the previous window is superseded and
    /// its response will be discarded.
    pub async fn set_week(&self, week: WeekWindow) -> Result<(), FeedError> {
        let token = {
            let mut state = self.state.write().await;
            state.page = 1;
            state.store.set_window(week)
        };
        self.events.emit(DiscoveryEvent::WindowChanged {
            week_start: week.start(),
            week_end: week.end(),
        });
        Arc::clone(&self.scheduler).start_polling(token).await;
        self.scheduler.load_foreground(token).await
    }

    /// Change the selected day: re-filters cached data, never fetches
    pub async fn set_day(&self, day: Option<NaiveDate>) {
        let mut state = self.state.write().await;
        if state.filter.selected_day != day {
            state.filter.selected_day = day;
            state.page = 1;
        }
    }

    /// Mutate the filter; any actual change resets the page to 1
    pub async fn update_filter(&self, mutate: impl FnOnce(&mut FilterState)) {
        let mut state = self.state.write().await;
        let before = state.filter.clone();
        mutate(&mut state.filter);
        if state.filter != before {
            state.page = 1;
        }
    }

    /// Select a page. Out-of-range values yield empty slices from
    /// [`DiscoveryPipeline::view`]; nothing is fetched.
    pub async fn set_page(&self, page: u32) {
        self.state.write().await.page = page;
    }

    /// Retry the current window in the foreground
    pub async fn reload(&self) -> Result<(), FeedError> {
        let token = self.state.read().await.store.token();
        self.scheduler.load_foreground(token).await
    }

    /// Trigger one background refresh cycle outside the timer cadence
    pub async fn poll_now(&self) {
        let token = self.state.read().await.store.token();
        self.scheduler.poll_once(token).await;
    }

    /// Pause the background poll; the next window change rebinds it
    pub async fn stop_polling(&self) {
        self.scheduler.stop_polling().await;
    }

    /// Current filter snapshot
    pub async fn filter(&self) -> FilterState {
        self.state.read().await.filter.clone()
    }

    /// Current week window
    pub async fn week(&self) -> WeekWindow {
        self.state.read().await.store.window()
    }

    /// Observe refresh lifecycle and window changes
    pub fn subscribe(&self) -> broadcast::Receiver<DiscoveryEvent> {
        self.events.subscribe()
    }

    /// Run the pure filter → rank → paginate chain against the cached
    /// record set
    pub async fn view(&self) -> DiscoveryView {
        self.view_at(moim_common::time::now()).await
    }

    /// [`DiscoveryPipeline::view`] with an explicit deadline-ranking
    /// anchor, for deterministic callers
    pub async fn view_at(&self, now: DateTime<Utc>) -> DiscoveryView {
        let state = self.state.read().await;

        let mut matching = filter::apply(state.store.records(), &state.filter);
        rank::sort(
            &mut matching,
            state.filter.sort_key,
            state.filter.descending,
            now,
        );
        let slice = paginate::slice(&matching, state.page, self.page_size);

        let meta = state.store.meta();
        DiscoveryView {
            meetings: slice.meetings,
            page: slice.page,
            total_pages: slice.total_pages,
            total_filtered: slice.total_count,
            is_foreground_loading: meta.is_foreground_loading,
            is_background_refreshing: meta.is_background_refreshing,
            last_refreshed_at: meta.last_refreshed_at,
        }
    }

    /// Teardown: cancel polling; fetches resolving afterwards are no-ops
    pub fn shutdown(&self) {
        self.scheduler.shutdown();
    }
}

impl Drop for DiscoveryPipeline {
    fn drop(&mut self) {
        self.shutdown();
    }
}
