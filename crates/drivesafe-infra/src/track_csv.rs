//! GPS track loader
//!
//! Expected columns (header optional):
//! timestamp, latitude, longitude, [speed_mps]
//!
//! Timestamps are RFC 3339 (converted to the offset's wall time) or
//! `YYYY-MM-DD HH:MM:SS`. Rows that fail to parse are skipped with a warning.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime};
use drivesafe_domain::model::TrackSample;
use drivesafe_types::Result;
use tracing::warn;

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];

/// Load track samples from a CSV file, in file order
pub fn load_track_from_csv(path: &Path) -> Result<Vec<TrackSample>> {
    let file = std::fs::File::open(path)?;
    load_track(file)
}

/// Load track samples from any CSV reader
pub fn load_track<R: Read>(reader: R) -> Result<Vec<TrackSample>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut samples = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let row_num = row_idx + 1;
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!(row = row_num, error = %e, "skipping undecodable track row");
                continue;
            }
        };
        match parse_record(&record) {
            Some(sample) => samples.push(sample),
            None if row_idx == 0 && looks_like_header(&record) => {}
            None => warn!(row = row_num, "skipping malformed track row"),
        }
    }
    Ok(samples)
}

fn looks_like_header(record: &csv::StringRecord) -> bool {
    record.iter().any(|field| {
        let field = field.to_lowercase();
        field.contains("time") || field.contains("lat") || field.contains("lon")
    })
}

fn parse_record(record: &csv::StringRecord) -> Option<TrackSample> {
    if record.len() < 3 {
        return None;
    }
    let timestamp = parse_timestamp(record.get(0)?)?;
    let latitude: f64 = record.get(1)?.parse().ok()?;
    let longitude: f64 = record.get(2)?.parse().ok()?;
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }
    let speed_mps = record
        .get(3)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|s| s.is_finite() && *s >= 0.0);

    Some(TrackSample::new(timestamp, latitude, longitude, speed_mps))
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}
