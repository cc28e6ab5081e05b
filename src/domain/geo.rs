// Geocentric frame conversions - TEME to ECEF to WGS84 geodetic
use chrono::{DateTime, Utc};
use serde::Serialize;

/// WGS84 semi-major axis in kilometers
const WGS84_A_KM: f64 = 6378.137;
/// WGS84 flattening
const WGS84_F: f64 = 1.0 / 298.257223563;

/// Geodetic subpoint of a satellite.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Geodetic {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}

/// Greenwich Mean Sidereal Time in radians (IAU 1982 model).
pub fn gmst_radians(at: DateTime<Utc>) -> f64 {
    let jd = julian_date(at);
    let t = (jd - 2451545.0) / 36525.0;
    let gmst_deg = 280.46061837
        + 360.98564736629 * (jd - 2451545.0)
        + 0.000387933 * t * t
        - t * t * t / 38_710_000.0;
    gmst_deg.rem_euclid(360.0).to_radians()
}

fn julian_date(at: DateTime<Utc>) -> f64 {
    // The Unix epoch falls on JD 2440587.5
    at.timestamp_millis() as f64 / 86_400_000.0 + 2_440_587.5
}

/// Rotate a TEME vector into the Earth-fixed frame by the given sidereal
/// angle.
pub fn teme_to_ecef(teme_km: [f64; 3], gmst_rad: f64) -> [f64; 3] {
    let (sin_g, cos_g) = gmst_rad.sin_cos();
    [
        teme_km[0] * cos_g + teme_km[1] * sin_g,
        -teme_km[0] * sin_g + teme_km[1] * cos_g,
        teme_km[2],
    ]
}

/// Convert an ECEF position to a WGS84 geodetic subpoint.
pub fn ecef_to_geodetic(ecef_km: [f64; 3]) -> Geodetic {
    let [x, y, z] = ecef_km;
    let e2 = WGS84_F * (2.0 - WGS84_F);
    let p = (x * x + y * y).sqrt();
    let longitude = y.atan2(x);

    let mut latitude = z.atan2(p * (1.0 - e2));
    let mut n = WGS84_A_KM;
    for _ in 0..5 {
        n = WGS84_A_KM / (1.0 - e2 * latitude.sin() * latitude.sin()).sqrt();
        latitude = (z + e2 * n * latitude.sin()).atan2(p);
    }

    // Near the polar axis the p/cos(lat) form loses precision
    let altitude = if p > 1e-6 {
        p / latitude.cos() - n
    } else {
        z.abs() - n * (1.0 - e2)
    };

    Geodetic {
        latitude_deg: latitude.to_degrees(),
        longitude_deg: longitude.to_degrees(),
        altitude_km: altitude,
    }
}
