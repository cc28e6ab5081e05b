// Satellite snapshot domain model
use chrono::{DateTime, Utc};

use crate::domain::classifier::Category;
use crate::domain::elements::OrbitalElementRecord;
use crate::domain::propagation::PropagatedState;

/// Propagated, classified view of one object at a refresh instant.
/// Recomputed and replaced wholesale each cycle, never mutated in place.
#[derive(Debug, Clone)]
pub struct SatelliteSnapshot {
    pub catalog_id: u64,
    pub name: String,
    pub category: Category,
    pub state: PropagatedState,
    pub timestamp: DateTime<Utc>,
    pub record: OrbitalElementRecord,
}

impl SatelliteSnapshot {
    /// Coarse orbit regime from the geodetic altitude.
    pub fn orbit_type(&self) -> &'static str {
        let altitude = self.state.geodetic.altitude_km;
        if altitude < 2000.0 {
            "LEO"
        } else if altitude < 35000.0 {
            "MEO"
        } else {
            "GEO"
        }
    }
}
