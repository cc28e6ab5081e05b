// Tracking service - read-side use cases over the satellite cache
use std::sync::Arc;

use chrono::Duration;
use thiserror::Error;

use crate::application::cache::{CacheSnapshot, SatelliteCache};
use crate::domain::classifier::Category;
use crate::domain::geo::Geodetic;
use crate::domain::propagation::Propagator;
use crate::domain::satellite::SatelliteSnapshot;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("no orbital data has been loaded yet")]
    CacheEmpty,
    #[error("satellite {0} is not in the catalog")]
    NotFound(u64),
}

#[derive(Debug)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// Read-side service. Only ever clones the committed cache snapshot;
/// never triggers a refresh.
#[derive(Clone)]
pub struct TrackingService {
    cache: Arc<SatelliteCache>,
    propagator: Propagator,
}

impl TrackingService {
    pub fn new(cache: Arc<SatelliteCache>, propagator: Propagator) -> Self {
        Self { cache, propagator }
    }

    /// The last committed cache snapshot.
    pub fn snapshot(&self) -> Result<Arc<CacheSnapshot>, ServiceError> {
        self.cache.load().ok_or(ServiceError::CacheEmpty)
    }

    /// One satellite plus the snapshot-level stale flag.
    pub fn satellite(&self, catalog_id: u64) -> Result<(SatelliteSnapshot, bool), ServiceError> {
        let snapshot = self.snapshot()?;
        snapshot
            .satellites
            .get(&catalog_id)
            .cloned()
            .map(|satellite| (satellite, snapshot.stale))
            .ok_or(ServiceError::NotFound(catalog_id))
    }

    /// Sample the ground track ahead of the cached state. Per-point
    /// propagation failures leave gaps rather than failing the request.
    pub fn ground_track(
        &self,
        catalog_id: u64,
        minutes: i64,
        points: usize,
    ) -> Result<Vec<Geodetic>, ServiceError> {
        let (satellite, _) = self.satellite(catalog_id)?;
        let points = points.max(2);
        let step_ms = (minutes.max(1) * 60_000) / (points as i64 - 1);

        let mut track = Vec::with_capacity(points);
        for i in 0..points {
            let at = satellite.timestamp + Duration::milliseconds(step_ms * i as i64);
            if let Ok(state) = self.propagator.propagate(&satellite.record, at) {
                track.push(state.geodetic);
            }
        }
        Ok(track)
    }

    /// Cached object count per category, in fixed category order.
    pub fn category_counts(&self) -> Result<Vec<CategoryCount>, ServiceError> {
        let snapshot = self.snapshot()?;
        Ok(Category::ALL
            .iter()
            .map(|&category| CategoryCount {
                category,
                count: snapshot
                    .satellites
                    .values()
                    .filter(|s| s.category == category)
                    .count(),
            })
            .collect())
    }
}
