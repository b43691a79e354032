//! Single-slot cache of the processed discharge dataset
//!
//! The store owns one snapshot at a time. A snapshot is built by fetching the
//! feed, parsing it and deduplicating the records; it replaces the previous
//! one atomically. Readers always see either the old or the new snapshot,
//! never a partial one.

use crate::app::models::DischargeRecord;
use crate::app::services::feed_parser::{FeedParser, ParseStats};
use crate::app::services::feed_source::{FeedSource, HttpFeedSource};
use crate::app::services::record_processor::{DeduplicationStats, RecordProcessor};
use crate::config::Config;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// One fully processed load of the feed
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Canonical records, one per (object, country, date)
    pub records: Vec<DischargeRecord>,
    pub parse_stats: ParseStats,
    pub dedup_stats: DeduplicationStats,
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

/// Loader and cache for the discharge dataset
#[derive(Debug)]
pub struct DischargeStore<S> {
    source: S,
    parser: FeedParser,
    processor: RecordProcessor,
    fallback_on_reload_failure: bool,
    slot: RwLock<Option<Arc<Snapshot>>>,
    load_guard: Mutex<()>,
}

impl DischargeStore<HttpFeedSource> {
    /// Store reading the feed URL from configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(HttpFeedSource::new(config.feed_url.clone()), config)
    }
}

impl<S: FeedSource> DischargeStore<S> {
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            source,
            parser: FeedParser::new(&config.parsing),
            processor: RecordProcessor::new(),
            fallback_on_reload_failure: config.cache.fallback_on_reload_failure,
            slot: RwLock::new(None),
            load_guard: Mutex::new(()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Cached snapshot, loading it on first use
    ///
    /// Concurrent first calls share a single fetch.
    pub async fn get(&self) -> Result<Arc<Snapshot>> {
        if let Some(snapshot) = self.cached().await {
            return Ok(snapshot);
        }

        let _guard = self.load_guard.lock().await;
        // Another caller may have finished loading while we waited
        if let Some(snapshot) = self.cached().await {
            return Ok(snapshot);
        }
        self.fetch_and_store().await
    }

    /// Fetch, parse and deduplicate the feed, replacing the cached snapshot
    ///
    /// On failure the previous snapshot, if any, stays in place.
    pub async fn load(&self) -> Result<Arc<Snapshot>> {
        let _guard = self.load_guard.lock().await;
        self.fetch_and_store().await
    }

    /// Reload, serving the previous snapshot if the reload fails
    ///
    /// Falls back only when `cache.fallback_on_reload_failure` is enabled
    /// and a snapshot exists; otherwise behaves exactly like [`Self::load`].
    pub async fn get_or_stale(&self) -> Result<Arc<Snapshot>> {
        match self.load().await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) if self.fallback_on_reload_failure => match self.cached().await {
                Some(stale) => {
                    warn!(
                        "Reload from {} failed ({}); serving snapshot loaded at {}",
                        self.source.describe(),
                        e,
                        stale.loaded_at
                    );
                    Ok(stale)
                }
                None => Err(e),
            },
            Err(e) => Err(e),
        }
    }

    /// Drop the cached snapshot so the next `get` reloads
    pub async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        if slot.take().is_some() {
            debug!("Discharge cache invalidated");
        }
    }

    /// Peek at the cached snapshot without loading
    pub async fn cached(&self) -> Option<Arc<Snapshot>> {
        self.slot.read().await.clone()
    }

    /// Cached snapshot or `Error::NotLoaded`
    pub async fn require_loaded(&self) -> Result<Arc<Snapshot>> {
        self.cached().await.ok_or(Error::NotLoaded)
    }

    async fn fetch_and_store(&self) -> Result<Arc<Snapshot>> {
        let source_name = self.source.describe();
        let text = self.source.fetch_text().await?;

        let parsed = self.parser.parse_text(&text, &source_name)?;
        let parse_stats = parsed.stats;
        let processed = self.processor.process_records(parsed.records);

        let snapshot = Arc::new(Snapshot {
            records: processed.records,
            parse_stats,
            dedup_stats: processed.stats,
            loaded_at: Utc::now(),
        });

        *self.slot.write().await = Some(Arc::clone(&snapshot));
        info!(
            "Loaded {} discharge records from {}",
            snapshot.record_count(),
            source_name
        );
        Ok(snapshot)
    }
}
