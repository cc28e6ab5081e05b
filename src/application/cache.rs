// Process-wide satellite cache with atomic whole-snapshot replacement
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::domain::satellite::SatelliteSnapshot;

/// Refresh lifecycle as observed by readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Empty,
    Refreshing,
    Ready,
    Stale,
}

/// One fully-committed refresh result. Every snapshot in `satellites`
/// shares `refreshed_at`; readers never see a mixed-cycle mapping.
#[derive(Debug, Clone)]
pub struct CacheSnapshot {
    pub satellites: HashMap<u64, SatelliteSnapshot>,
    pub refreshed_at: DateTime<Utc>,
    pub stale: bool,
}

/// Shared cache. The refresh task builds a complete `CacheSnapshot` off
/// to the side and swaps it in; readers clone the `Arc` under a read
/// lock held only for the pointer copy, so they never block on a refresh
/// in progress.
#[derive(Debug, Default)]
pub struct SatelliteCache {
    current: RwLock<Option<Arc<CacheSnapshot>>>,
    refreshing: AtomicBool,
}

impl SatelliteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last committed snapshot, if any cycle has succeeded yet.
    pub fn load(&self) -> Option<Arc<CacheSnapshot>> {
        self.current.read().expect("cache lock poisoned").clone()
    }

    /// Commit a freshly-built snapshot set as the new current cache.
    pub fn commit(
        &self,
        satellites: HashMap<u64, SatelliteSnapshot>,
        refreshed_at: DateTime<Utc>,
    ) {
        let snapshot = Arc::new(CacheSnapshot {
            satellites,
            refreshed_at,
            stale: false,
        });
        *self.current.write().expect("cache lock poisoned") = Some(snapshot);
    }

    /// Flag the current contents stale, retaining them for readers.
    /// A no-op while the cache has never been populated.
    pub fn mark_stale(&self) {
        let mut guard = self.current.write().expect("cache lock poisoned");
        if let Some(snapshot) = guard.as_ref() {
            if !snapshot.stale {
                let mut stale = (**snapshot).clone();
                stale.stale = true;
                *guard = Some(Arc::new(stale));
            }
        }
    }

    pub fn set_refreshing(&self, refreshing: bool) {
        self.refreshing.store(refreshing, Ordering::SeqCst);
    }

    pub fn state(&self) -> CacheState {
        if self.refreshing.load(Ordering::SeqCst) {
            return CacheState::Refreshing;
        }
        match self.load() {
            None => CacheState::Empty,
            Some(snapshot) if snapshot.stale => CacheState::Stale,
            Some(_) => CacheState::Ready,
        }
    }
}
