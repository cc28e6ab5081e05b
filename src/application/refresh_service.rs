// Background refresh cycle - fetch, parse, propagate, classify, swap
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::application::cache::SatelliteCache;
use crate::application::element_feed::{load_sources, ElementFeed};
use crate::domain::classifier;
use crate::domain::elements::{self, OrbitalElementRecord};
use crate::domain::propagation::Propagator;
use crate::domain::satellite::SatelliteSnapshot;
use crate::infrastructure::config::TrackerSettings;

/// Counters from one refresh cycle, for logging and tests.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub sources_ok: usize,
    pub sources_failed: usize,
    pub parsed: usize,
    pub corrupt: usize,
    pub propagated: usize,
    pub dropped: usize,
    pub committed: bool,
}

/// Owns the periodic refresh loop. Communicates with request handlers
/// only through the cache's atomic snapshot swap; a cycle that fails
/// partway discards its partial result.
pub struct RefreshService {
    feed: Arc<dyn ElementFeed>,
    cache: Arc<SatelliteCache>,
    propagator: Propagator,
    settings: TrackerSettings,
}

impl RefreshService {
    pub fn new(
        feed: Arc<dyn ElementFeed>,
        cache: Arc<SatelliteCache>,
        settings: TrackerSettings,
    ) -> Self {
        let propagator = Propagator::new(settings.propagation_horizon_days);
        Self {
            feed,
            cache,
            propagator,
            settings,
        }
    }

    /// Run the refresh loop forever. The first cycle starts immediately.
    pub async fn run(self) {
        // interval() panics on zero; clamp a misconfigured cadence
        let secs = self.settings.refresh_interval_secs.max(1);
        let mut ticker = tokio::time::interval(Duration::from_secs(secs));
        loop {
            ticker.tick().await;
            let outcome = self.refresh_once().await;
            tracing::info!(
                sources_ok = outcome.sources_ok,
                sources_failed = outcome.sources_failed,
                parsed = outcome.parsed,
                corrupt = outcome.corrupt,
                propagated = outcome.propagated,
                dropped = outcome.dropped,
                committed = outcome.committed,
                "refresh cycle finished"
            );
        }
    }

    /// One full fetch-parse-propagate-swap cycle.
    pub async fn refresh_once(&self) -> RefreshOutcome {
        self.cache.set_refreshing(true);
        let outcome = self.run_cycle().await;
        self.cache.set_refreshing(false);
        outcome
    }

    async fn run_cycle(&self) -> RefreshOutcome {
        let mut outcome = RefreshOutcome::default();

        let batch = load_sources(self.feed.as_ref(), &self.settings.feeds).await;
        outcome.sources_ok = batch.payloads.len();
        outcome.sources_failed = batch.failed_sources;

        if batch.payloads.is_empty() {
            tracing::warn!("all element feed sources failed; keeping previous snapshots");
            self.cache.mark_stale();
            return outcome;
        }

        let records = self.collect_records(&batch.payloads, &mut outcome);

        let now = Utc::now();
        let mut satellites = HashMap::with_capacity(records.len());
        for record in records {
            match self.propagator.propagate(&record, now) {
                Ok(state) => {
                    let category = classifier::classify(&record.name, record.catalog_id);
                    satellites.insert(
                        record.catalog_id,
                        SatelliteSnapshot {
                            catalog_id: record.catalog_id,
                            name: record.name.clone(),
                            category,
                            state,
                            timestamp: now,
                            record,
                        },
                    );
                    outcome.propagated += 1;
                }
                Err(e) => {
                    tracing::debug!("dropping satellite {}: {}", record.catalog_id, e);
                    outcome.dropped += 1;
                }
            }
        }

        if satellites.is_empty() {
            tracing::warn!("refresh produced no usable snapshots; keeping previous contents");
            self.cache.mark_stale();
            return outcome;
        }

        self.cache.commit(satellites, now);
        outcome.committed = true;
        outcome
    }

    /// Parse every payload, deduplicating by catalog id (first occurrence
    /// wins) and capping the total at the configured limit.
    fn collect_records(
        &self,
        payloads: &[String],
        outcome: &mut RefreshOutcome,
    ) -> Vec<OrbitalElementRecord> {
        let mut seen = HashSet::new();
        let mut records = Vec::new();
        for payload in payloads {
            match elements::parse_batch(payload) {
                Ok(parsed) => {
                    outcome.corrupt += parsed.corrupt_count;
                    for record in parsed.records {
                        if records.len() >= self.settings.max_satellites {
                            break;
                        }
                        if seen.insert(record.catalog_id) {
                            records.push(record);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("discarding feed payload: {}", e);
                }
            }
        }
        outcome.parsed = records.len();
        records
    }
}
