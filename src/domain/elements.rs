// Orbital element records and TLE batch parsing
use chrono::NaiveDateTime;
use thiserror::Error;

/// One object's Keplerian-style element set, parsed from a two-line
/// element record. Immutable after parse; the verbatim lines are kept so
/// the propagator can rebuild the SGP4 state without re-fetching.
#[derive(Debug, Clone)]
pub struct OrbitalElementRecord {
    pub catalog_id: u64,
    pub name: String,
    pub international_designator: Option<String>,
    pub epoch: NaiveDateTime,
    pub inclination_deg: f64,
    pub right_ascension_deg: f64,
    pub eccentricity: f64,
    pub argument_of_perigee_deg: f64,
    pub mean_anomaly_deg: f64,
    pub mean_motion_rev_day: f64,
    pub revolution_number: u64,
    pub line1: String,
    pub line2: String,
}

impl OrbitalElementRecord {
    /// Orbital period in minutes, or None for a degenerate mean motion.
    pub fn period_minutes(&self) -> Option<f64> {
        if self.mean_motion_rev_day > 0.0 {
            Some(1440.0 / self.mean_motion_rev_day)
        } else {
            None
        }
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("element feed text contained no records")]
    EmptyFeed,
}

/// Result of parsing one raw feed payload.
#[derive(Debug, Default)]
pub struct ParsedBatch {
    pub records: Vec<OrbitalElementRecord>,
    pub corrupt_count: usize,
}

/// Parse a raw TLE payload into element records.
///
/// Accepts both 3-line groups (name line followed by the two element
/// lines) and bare 2-line groups. A malformed record is skipped and
/// counted; only structurally empty input is an error.
pub fn parse_batch(raw: &str) -> Result<ParsedBatch, ParseError> {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim_end)
        .map(|l| l.trim_start_matches('\u{feff}'))
        .filter(|l| !l.trim().is_empty())
        .collect();
    if lines.is_empty() {
        return Err(ParseError::EmptyFeed);
    }

    let mut batch = ParsedBatch::default();
    let mut i = 0;
    while i < lines.len() {
        let (name, line1, line2) = if is_line1(lines[i]) {
            if i + 1 >= lines.len() {
                batch.corrupt_count += 1;
                break;
            }
            let group = (None, lines[i], lines[i + 1]);
            i += 2;
            group
        } else {
            if i + 2 >= lines.len() {
                // Trailing name line with no element lines behind it
                batch.corrupt_count += 1;
                break;
            }
            let group = (Some(lines[i].trim()), lines[i + 1], lines[i + 2]);
            i += 3;
            group
        };

        match parse_record(name, line1, line2) {
            Some(record) => batch.records.push(record),
            None => batch.corrupt_count += 1,
        }
    }

    Ok(batch)
}

fn is_line1(line: &str) -> bool {
    line.starts_with("1 ") && line.len() == 69
}

fn is_line2(line: &str) -> bool {
    line.starts_with("2 ") && line.len() == 69
}

/// Parse one TLE group; None when the record is malformed.
fn parse_record(name: Option<&str>, line1: &str, line2: &str) -> Option<OrbitalElementRecord> {
    if !is_line1(line1) || !is_line2(line2) {
        return None;
    }

    let elements = sgp4::Elements::from_tle(
        name.map(|n| n.to_string()),
        line1.as_bytes(),
        line2.as_bytes(),
    )
    .ok()?;

    let name = elements
        .object_name
        .clone()
        .unwrap_or_else(|| format!("OBJECT {}", elements.norad_id));

    Some(OrbitalElementRecord {
        catalog_id: elements.norad_id,
        name,
        international_designator: elements.international_designator.clone(),
        epoch: elements.datetime,
        inclination_deg: elements.inclination,
        right_ascension_deg: elements.right_ascension,
        eccentricity: elements.eccentricity,
        argument_of_perigee_deg: elements.argument_of_perigee,
        mean_anomaly_deg: elements.mean_anomaly,
        mean_motion_rev_day: elements.mean_motion,
        revolution_number: elements.revolution_number,
        line1: line1.to_string(),
        line2: line2.to_string(),
    })
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    /// Reference ISS element set with valid checksums.
    pub const ISS_NAME: &str = "ISS (ZARYA)";
    pub const ISS_LINE1: &str =
        "1 25544U 98067A   20194.88612269 -.00002218  00000-0 -31515-4 0  9992";
    pub const ISS_LINE2: &str =
        "2 25544  51.6461 221.2784 0001413  89.1723 280.4612 15.49507896236008";

    /// Drag-free LEO element set with a 2026-01-01 epoch, checksums valid.
    pub const LEO_NAME: &str = "TESTSAT 1";
    pub const LEO_LINE1: &str =
        "1 90001U 24001A   26001.00000000  .00000000  00000-0  00000-0 0  9996";
    pub const LEO_LINE2: &str =
        "2 90001  51.6400 339.7900 0001000  92.8300 267.3100 15.50000000123457";

    /// Drag-free MEO element set in a GPS-like orbit, checksums valid.
    pub const GPS_NAME: &str = "NAVSTAR 76 (USA 266)";
    pub const GPS_LINE1: &str =
        "1 41328U 16007A   26001.00000000  .00000000  00000-0  00000-0 0  9991";
    pub const GPS_LINE2: &str =
        "2 41328  54.9700 200.0000 0004000 190.0000 170.0000  2.00560000054326";

    pub fn iss_text() -> String {
        format!("{}\n{}\n{}\n", ISS_NAME, ISS_LINE1, ISS_LINE2)
    }

    pub fn leo_text() -> String {
        format!("{}\n{}\n{}\n", LEO_NAME, LEO_LINE1, LEO_LINE2)
    }

    pub fn gps_text() -> String {
        format!("{}\n{}\n{}\n", GPS_NAME, GPS_LINE1, GPS_LINE2)
    }
}
