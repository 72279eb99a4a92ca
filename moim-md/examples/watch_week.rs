//! Drive the discovery pipeline against a live feed and log each refresh.
//!
//! ```text
//! MOIM_FEED_BASE_URL=https://api.moim.example cargo run --example watch_week
//! ```

use moim_md::{
    DiscoveryConfig, DiscoveryEvent, DiscoveryPipeline, HttpFeedClient, MeetingFeed,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = DiscoveryConfig::resolve()?;
    let feed: Arc<dyn MeetingFeed> = Arc::new(HttpFeedClient::new(
        config.feed_base_url.clone(),
        config.request_timeout,
    )?);
    let pipeline = Arc::new(DiscoveryPipeline::new(feed, config));

    let mut events = pipeline.subscribe();
    pipeline.mount().await?;

    let view = pipeline.view().await;
    info!(
        total = view.total_filtered,
        pages = view.total_pages,
        "Initial week loaded"
    );
    for meeting in &view.meetings {
        info!(id = %meeting.id, status = ?meeting.status, "meeting");
    }

    // Background polls keep arriving every few minutes; log them until
    // interrupted
    while let Ok(event) = events.recv().await {
        match event {
            DiscoveryEvent::RefreshCompleted {
                background,
                record_count,
                ..
            } => info!(background, record_count, "Refresh complete"),
            other => info!(event = ?other, "Discovery event"),
        }
    }

    Ok(())
}
