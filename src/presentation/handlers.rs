// HTTP request handlers and JSON response shapes
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::tracking_service::ServiceError;
use crate::domain::classifier::Category;
use crate::domain::geo::Geodetic;
use crate::domain::satellite::SatelliteSnapshot;
use crate::presentation::app_state::AppState;

#[derive(Serialize)]
pub struct VelocityView {
    pub x_km_s: f64,
    pub y_km_s: f64,
    pub z_km_s: f64,
    pub speed_km_s: f64,
}

#[derive(Serialize)]
pub struct SatelliteView {
    pub id: u64,
    pub name: String,
    pub category: Category,
    pub color: &'static str,
    pub position: Geodetic,
    pub velocity: VelocityView,
    pub timestamp: String,
    pub stale: bool,
    pub degraded: bool,
}

#[derive(Serialize)]
pub struct SatelliteListView {
    pub timestamp: String,
    pub stale: bool,
    pub count: usize,
    pub satellites: Vec<SatelliteView>,
}

#[derive(Serialize)]
pub struct OrbitView {
    pub altitude_km: f64,
    pub inclination_deg: f64,
    pub eccentricity: f64,
    pub period_minutes: Option<f64>,
    pub orbit_type: &'static str,
    pub speed_km_s: f64,
}

#[derive(Serialize)]
pub struct ElementSetView {
    pub epoch: String,
    pub international_designator: Option<String>,
    pub revolution_number: u64,
    pub line1: String,
    pub line2: String,
}

#[derive(Serialize)]
pub struct EciPositionView {
    pub x_km: f64,
    pub y_km: f64,
    pub z_km: f64,
}

#[derive(Serialize)]
pub struct SatelliteDetailView {
    pub id: u64,
    pub name: String,
    pub category: Category,
    pub category_name: &'static str,
    pub color: &'static str,
    pub position: Geodetic,
    pub position_eci: EciPositionView,
    pub velocity: VelocityView,
    pub orbit: OrbitView,
    pub elements: ElementSetView,
    pub timestamp: String,
    pub stale: bool,
    pub degraded: bool,
}

#[derive(Serialize)]
pub struct GroundTrackView {
    pub id: u64,
    pub points: Vec<Geodetic>,
}

#[derive(Serialize)]
pub struct CategoryView {
    pub category: Category,
    pub name: &'static str,
    pub color: &'static str,
    pub count: usize,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Deserialize)]
pub struct TrackQuery {
    pub minutes: Option<i64>,
    pub points: Option<usize>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current positions of every cached satellite
pub async fn get_satellites(State(state): State<Arc<AppState>>) -> Response {
    match state.tracking_service.snapshot() {
        Ok(snapshot) => {
            let mut satellites: Vec<SatelliteView> = snapshot
                .satellites
                .values()
                .map(|s| satellite_view(s, snapshot.stale))
                .collect();
            satellites.sort_by_key(|s| s.id);

            Json(SatelliteListView {
                timestamp: format_timestamp(snapshot.refreshed_at),
                stale: snapshot.stale,
                count: satellites.len(),
                satellites,
            })
            .into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Detailed view of one satellite
pub async fn get_satellite(
    Path(id): Path<u64>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.tracking_service.satellite(id) {
        Ok((satellite, stale)) => Json(detail_view(&satellite, stale)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Sampled ground track ahead of the cached state
pub async fn get_track(
    Path(id): Path<u64>,
    Query(query): Query<TrackQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let minutes = query.minutes.unwrap_or(120).clamp(1, 1440);
    let points = query.points.unwrap_or(100).clamp(2, 500);

    match state.tracking_service.ground_track(id, minutes, points) {
        Ok(points) => Json(GroundTrackView { id, points }).into_response(),
        Err(e) => error_response(e),
    }
}

/// Category metadata with cached object counts
pub async fn get_categories(State(state): State<Arc<AppState>>) -> Response {
    match state.tracking_service.category_counts() {
        Ok(counts) => {
            let categories: Vec<CategoryView> = counts
                .into_iter()
                .map(|c| CategoryView {
                    category: c.category,
                    name: c.category.display_name(),
                    color: c.category.color(),
                    count: c.count,
                })
                .collect();
            Json(categories).into_response()
        }
        Err(e) => error_response(e),
    }
}

fn satellite_view(satellite: &SatelliteSnapshot, stale: bool) -> SatelliteView {
    SatelliteView {
        id: satellite.catalog_id,
        name: satellite.name.clone(),
        category: satellite.category,
        color: satellite.category.color(),
        position: satellite.state.geodetic,
        velocity: velocity_view(satellite),
        timestamp: format_timestamp(satellite.timestamp),
        stale,
        degraded: satellite.state.degraded,
    }
}

fn detail_view(satellite: &SatelliteSnapshot, stale: bool) -> SatelliteDetailView {
    let record = &satellite.record;
    let [x_km, y_km, z_km] = satellite.state.position_km;
    SatelliteDetailView {
        id: satellite.catalog_id,
        name: satellite.name.clone(),
        category: satellite.category,
        category_name: satellite.category.display_name(),
        color: satellite.category.color(),
        position: satellite.state.geodetic,
        position_eci: EciPositionView { x_km, y_km, z_km },
        velocity: velocity_view(satellite),
        orbit: OrbitView {
            altitude_km: satellite.state.geodetic.altitude_km,
            inclination_deg: record.inclination_deg,
            eccentricity: record.eccentricity,
            period_minutes: record.period_minutes(),
            orbit_type: satellite.orbit_type(),
            speed_km_s: satellite.state.speed_km_s(),
        },
        elements: ElementSetView {
            epoch: format_timestamp(record.epoch.and_utc()),
            international_designator: record.international_designator.clone(),
            revolution_number: record.revolution_number,
            line1: record.line1.clone(),
            line2: record.line2.clone(),
        },
        timestamp: format_timestamp(satellite.timestamp),
        stale,
        degraded: satellite.state.degraded,
    }
}

fn velocity_view(satellite: &SatelliteSnapshot) -> VelocityView {
    let [x, y, z] = satellite.state.velocity_km_s;
    VelocityView {
        x_km_s: x,
        y_km_s: y,
        z_km_s: z,
        speed_km_s: satellite.state.speed_km_s(),
    }
}

fn error_response(error: ServiceError) -> Response {
    let status = match error {
        ServiceError::CacheEmpty => StatusCode::SERVICE_UNAVAILABLE,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
    };
    (status, Json(ErrorBody { error: error.to_string() })).into_response()
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classifier;
    use crate::domain::elements::test_fixtures::iss_text;
    use crate::domain::elements::parse_batch;
    use crate::domain::propagation::Propagator;

    fn iss_snapshot() -> SatelliteSnapshot {
        let record = parse_batch(&iss_text()).unwrap().records.remove(0);
        let at = record.epoch.and_utc();
        let state = Propagator::new(30.0).propagate(&record, at).unwrap();
        SatelliteSnapshot {
            catalog_id: record.catalog_id,
            name: record.name.clone(),
            category: classifier::classify(&record.name, record.catalog_id),
            state,
            timestamp: at,
            record,
        }
    }

    #[test]
    fn test_satellite_view_mapping() {
        let snapshot = iss_snapshot();
        let view = satellite_view(&snapshot, true);
        assert_eq!(view.id, 25544);
        assert_eq!(view.category, Category::Iss);
        assert!(view.stale);
        assert!((view.velocity.speed_km_s - snapshot.state.speed_km_s()).abs() < 1e-12);
        assert!(view.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_detail_view_carries_element_set() {
        let snapshot = iss_snapshot();
        let view = detail_view(&snapshot, false);
        assert_eq!(view.orbit.orbit_type, "LEO");
        assert_eq!(view.elements.line1, snapshot.record.line1);
        assert!(view.orbit.period_minutes.unwrap() > 90.0);

        let radius = (view.position_eci.x_km.powi(2)
            + view.position_eci.y_km.powi(2)
            + view.position_eci.z_km.powi(2))
        .sqrt();
        assert!(radius > 6500.0 && radius < 7000.0);
    }

    #[test]
    fn test_error_status_mapping() {
        assert_eq!(
            error_response(ServiceError::CacheEmpty).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            error_response(ServiceError::NotFound(7)).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_category_serializes_with_display_casing() {
        let json = serde_json::to_string(&Category::Iss).unwrap();
        assert_eq!(json, "\"ISS\"");
        let json = serde_json::to_string(&Category::Weather).unwrap();
        assert_eq!(json, "\"Weather\"");
    }
}
