// SGP4 propagation of element records to a geocentric state
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::elements::OrbitalElementRecord;
use crate::domain::geo::{self, Geodetic};

#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("SGP4 rejected element set: {0}")]
    Model(String),
    #[error("propagation produced a non-finite state")]
    NonFinite,
}

/// Instantaneous geocentric state of one object.
#[derive(Debug, Clone, Copy)]
pub struct PropagatedState {
    /// TEME position in kilometers
    pub position_km: [f64; 3],
    /// TEME velocity in kilometers per second
    pub velocity_km_s: [f64; 3],
    /// WGS84 subpoint derived from the position
    pub geodetic: Geodetic,
    /// Set when the requested timestamp falls outside the accuracy horizon
    pub degraded: bool,
}

impl PropagatedState {
    pub fn speed_km_s(&self) -> f64 {
        let [vx, vy, vz] = self.velocity_km_s;
        (vx * vx + vy * vy + vz * vz).sqrt()
    }
}

/// Propagates element records with SGP4. Stateless: identical
/// (record, timestamp) inputs give bit-identical outputs.
#[derive(Debug, Clone)]
pub struct Propagator {
    horizon_minutes: f64,
}

impl Propagator {
    pub fn new(horizon_days: f64) -> Self {
        Self {
            horizon_minutes: horizon_days * 1440.0,
        }
    }

    pub fn propagate(
        &self,
        record: &OrbitalElementRecord,
        at: DateTime<Utc>,
    ) -> Result<PropagatedState, PropagationError> {
        let elements = sgp4::Elements::from_tle(
            Some(record.name.clone()),
            record.line1.as_bytes(),
            record.line2.as_bytes(),
        )
        .map_err(|e| PropagationError::Model(e.to_string()))?;
        let constants = sgp4::Constants::from_elements(&elements)
            .map_err(|e| PropagationError::Model(e.to_string()))?;

        let minutes = minutes_since_epoch(record, at);
        let prediction = constants
            .propagate(sgp4::MinutesSinceEpoch(minutes))
            .map_err(|e| PropagationError::Model(e.to_string()))?;

        let position_km = prediction.position;
        let velocity_km_s = prediction.velocity;
        let finite = position_km.iter().all(|v| v.is_finite())
            && velocity_km_s.iter().all(|v| v.is_finite());
        if !finite {
            return Err(PropagationError::NonFinite);
        }

        let gmst = geo::gmst_radians(at);
        let geodetic = geo::ecef_to_geodetic(geo::teme_to_ecef(position_km, gmst));

        Ok(PropagatedState {
            position_km,
            velocity_km_s,
            geodetic,
            degraded: minutes.abs() > self.horizon_minutes,
        })
    }
}

fn minutes_since_epoch(record: &OrbitalElementRecord, at: DateTime<Utc>) -> f64 {
    // Millisecond resolution is far below SGP4 model accuracy
    (at.naive_utc() - record.epoch).num_milliseconds() as f64 / 60_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::elements::test_fixtures::{gps_text, iss_text, leo_text};
    use crate::domain::elements::{parse_batch, OrbitalElementRecord};
    use chrono::Duration;

    fn parse_one(raw: &str) -> OrbitalElementRecord {
        parse_batch(raw).unwrap().records.remove(0)
    }

    #[test]
    fn test_iss_at_epoch_is_a_consistent_leo_state() {
        let record = parse_one(&iss_text());
        let propagator = Propagator::new(30.0);
        let state = propagator.propagate(&record, record.epoch.and_utc()).unwrap();

        assert!(!state.degraded);
        assert!(state.geodetic.altitude_km > 350.0 && state.geodetic.altitude_km < 480.0);
        assert!(state.speed_km_s() > 7.4 && state.speed_km_s() < 7.9);
        assert!(state.geodetic.latitude_deg.abs() <= record.inclination_deg + 0.5);
    }

    #[test]
    fn test_propagation_is_deterministic() {
        let record = parse_one(&iss_text());
        let propagator = Propagator::new(30.0);
        let at = record.epoch.and_utc() + Duration::hours(3);

        let first = propagator.propagate(&record, at).unwrap();
        let second = propagator.propagate(&record, at).unwrap();
        assert_eq!(first.position_km, second.position_km);
        assert_eq!(first.velocity_km_s, second.velocity_km_s);
    }

    #[test]
    fn test_beyond_horizon_is_degraded_not_fatal() {
        let record = parse_one(&leo_text());
        let propagator = Propagator::new(30.0);
        let at = record.epoch.and_utc() + Duration::days(90);

        let state = propagator.propagate(&record, at).unwrap();
        assert!(state.degraded);
        assert!(state.position_km.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_within_horizon_is_not_degraded() {
        let record = parse_one(&leo_text());
        let propagator = Propagator::new(30.0);

        let before = propagator
            .propagate(&record, record.epoch.and_utc() - Duration::days(29))
            .unwrap();
        let after = propagator
            .propagate(&record, record.epoch.and_utc() + Duration::days(29))
            .unwrap();
        assert!(!before.degraded);
        assert!(!after.degraded);
    }

    #[test]
    fn test_gps_orbit_reaches_meo_altitude() {
        let record = parse_one(&gps_text());
        let propagator = Propagator::new(30.0);
        let state = propagator.propagate(&record, record.epoch.and_utc()).unwrap();

        assert!(state.geodetic.altitude_km > 19_000.0 && state.geodetic.altitude_km < 21_500.0);
    }
}
