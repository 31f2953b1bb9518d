//! Fire-detection feed parsing and filtering
//!
//! The upstream feed (NASA FIRMS) is comma-delimited text with a header row
//! naming the columns; data rows are zipped against the header by position.
//! Malformed rows are dropped, never an error. Parsing, the continental
//! bounding-box filter, and the high-confidence policy filter are separate
//! steps so they compose and test independently.

use serde::Serialize;
use tracing::debug;

/// Contiguous-US bounding box used for the served fire list
pub const CONUS_LAT: (f64, f64) = (25.0, 49.0);
pub const CONUS_LON: (f64, f64) = (-125.0, -66.0);

/// Provider-assigned certainty label for a detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Nominal,
    High,
}

impl Confidence {
    /// Parse a provider label. VIIRS feeds abbreviate to `l`/`n`/`h`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Some(Self::Low),
            "n" | "nominal" => Some(Self::Nominal),
            "h" | "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// One active fire detection
#[derive(Debug, Clone, Serialize)]
pub struct FireRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub confidence: Confidence,
    /// Brightness temperature, absent for some instruments
    pub brightness: Option<f64>,
    pub acq_date: String,
    pub acq_time: String,
}

impl FireRecord {
    /// Inside the contiguous-US bounding box
    #[must_use]
    pub fn in_continental_us(&self) -> bool {
        (CONUS_LAT.0..=CONUS_LAT.1).contains(&self.latitude)
            && (CONUS_LON.0..=CONUS_LON.1).contains(&self.longitude)
    }

    #[must_use]
    pub fn is_high_confidence(&self) -> bool {
        self.confidence == Confidence::High
    }
}

/// Parse a header-led delimited feed into fire records.
///
/// A row is dropped when its field count mismatches the header, when
/// latitude or longitude fails to parse or equals zero (zero-filled rows
/// are unparsed rows), or when the confidence label is unrecognized.
#[must_use]
pub fn parse(feed_text: &str) -> Vec<FireRecord> {
    let mut lines = feed_text.lines().filter(|l| !l.trim().is_empty());
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let header: Vec<&str> = header_line.split(',').map(str::trim).collect();

    let column = |name: &str| header.iter().position(|h| *h == name);
    let Some(lat_idx) = column("latitude") else {
        return Vec::new();
    };
    let Some(lon_idx) = column("longitude") else {
        return Vec::new();
    };
    let Some(conf_idx) = column("confidence") else {
        return Vec::new();
    };
    let date_idx = column("acq_date");
    let time_idx = column("acq_time");
    // MODIS names the column brightness, VIIRS bright_ti4.
    let brightness_idx = column("brightness").or_else(|| column("bright_ti4"));

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for line in lines {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != header.len() {
            dropped += 1;
            continue;
        }

        let (Ok(latitude), Ok(longitude)) =
            (fields[lat_idx].parse::<f64>(), fields[lon_idx].parse::<f64>())
        else {
            dropped += 1;
            continue;
        };
        if latitude == 0.0 || longitude == 0.0 {
            dropped += 1;
            continue;
        }
        let Some(confidence) = Confidence::parse(fields[conf_idx]) else {
            dropped += 1;
            continue;
        };

        records.push(FireRecord {
            latitude,
            longitude,
            confidence,
            brightness: brightness_idx.and_then(|i| fields[i].parse().ok()),
            acq_date: date_idx.map(|i| fields[i].to_string()).unwrap_or_default(),
            acq_time: time_idx.map(|i| fields[i].to_string()).unwrap_or_default(),
        });
    }

    if dropped > 0 {
        debug!("Dropped {} malformed fire-feed rows", dropped);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "latitude,longitude,bright_ti4,acq_date,acq_time,confidence";

    fn feed(rows: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn test_well_formed_row_is_retained() {
        let records = parse(&feed(&["40.1,-105.2,330.5,2026-08-26,1830,h"]));
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.latitude, 40.1);
        assert_eq!(record.longitude, -105.2);
        assert_eq!(record.confidence, Confidence::High);
        assert_eq!(record.brightness, Some(330.5));
        assert_eq!(record.acq_date, "2026-08-26");
        assert_eq!(record.acq_time, "1830");
    }

    #[test]
    fn test_column_count_mismatch_dropped() {
        let records = parse(&feed(&["40.1,-105.2,330.5,2026-08-26,h"]));
        assert!(records.is_empty());
    }

    #[test]
    fn test_zero_coordinates_dropped() {
        let records = parse(&feed(&[
            "0,-105.2,330.5,2026-08-26,1830,h",
            "40.1,0,330.5,2026-08-26,1830,h",
        ]));
        assert!(records.is_empty());
    }

    #[test]
    fn test_unparseable_coordinates_dropped() {
        let records = parse(&feed(&["north,-105.2,330.5,2026-08-26,1830,h"]));
        assert!(records.is_empty());
    }

    #[test]
    fn test_unrecognized_confidence_dropped() {
        let records = parse(&feed(&["40.1,-105.2,330.5,2026-08-26,1830,X"]));
        assert!(records.is_empty());
    }

    #[test]
    fn test_confidence_labels() {
        assert_eq!(Confidence::parse("h"), Some(Confidence::High));
        assert_eq!(Confidence::parse("High"), Some(Confidence::High));
        assert_eq!(Confidence::parse("nominal"), Some(Confidence::Nominal));
        assert_eq!(Confidence::parse("l"), Some(Confidence::Low));
        assert_eq!(Confidence::parse("85"), None);
    }

    #[test]
    fn test_missing_brightness_column_is_none() {
        let text = "latitude,longitude,acq_date,acq_time,confidence\n40.1,-105.2,2026-08-26,1830,n";
        let records = parse(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].brightness, None);
    }

    #[test]
    fn test_continental_filter_composes_after_parse() {
        let records = parse(&feed(&[
            "40.1,-105.2,330.5,2026-08-26,1830,h", // Colorado
            "64.8,-147.7,330.5,2026-08-26,1830,h", // Fairbanks, outside bbox
            "40.2,-105.3,330.5,2026-08-26,1830,n", // in bbox, not high
        ]));
        assert_eq!(records.len(), 3);

        let served: Vec<_> = records
            .into_iter()
            .filter(FireRecord::in_continental_us)
            .filter(FireRecord::is_high_confidence)
            .collect();
        assert_eq!(served.len(), 1);
        assert_eq!(served[0].latitude, 40.1);
    }

    #[test]
    fn test_empty_feed() {
        assert!(parse("").is_empty());
        assert!(parse(HEADER).is_empty());
    }
}
