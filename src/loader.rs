//! Loading locations from comma-separated text.
//!
//! Each line holds one record, `label, latitude, longitude`. There is no
//! header and no quoting, so a comma can never appear inside a label.
//! Records that do not have exactly three fields, or whose coordinates do not
//! parse as numbers, are logged and skipped; the rest are returned in source
//! order.

use crate::error::{GeoError, Result};
use crate::validation::validate_location;
use csv::{ErrorKind, ReaderBuilder, StringRecord, Trim};
use geokd_types::Location;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const FIELD_COUNT: usize = 3;

/// Options controlling which records the loader accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderOptions {
    /// Skip records with non-finite or out-of-range coordinates
    #[serde(default)]
    pub validate_coordinates: bool,
}

impl LoaderOptions {
    pub fn strict() -> Self {
        Self {
            validate_coordinates: true,
        }
    }
}

/// Parse one record into a location.
///
/// `line` is only used for error reporting.
///
/// # Examples
///
/// ```
/// use csv::StringRecord;
/// use geokd::loader::parse_record;
///
/// let record = StringRecord::from(vec!["X", "1.0", "2.0"]);
/// let location = parse_record(&record, 1).unwrap();
/// assert_eq!(location.label(), "X");
/// assert_eq!(location.longitude(), 2.0);
///
/// let short = StringRecord::from(vec!["bad line"]);
/// assert!(parse_record(&short, 2).is_err());
/// ```
pub fn parse_record(record: &StringRecord, line: u64) -> Result<Location> {
    if record.len() != FIELD_COUNT {
        return Err(GeoError::malformed(
            line,
            format!("expected {} fields, found {}", FIELD_COUNT, record.len()),
        ));
    }

    let latitude = parse_coordinate(&record[1], "latitude", line)?;
    let longitude = parse_coordinate(&record[2], "longitude", line)?;

    Ok(Location::new(&record[0], latitude, longitude))
}

fn parse_coordinate(field: &str, name: &str, line: u64) -> Result<f64> {
    field
        .parse::<f64>()
        .map_err(|e| GeoError::malformed(line, format!("invalid {} '{}': {}", name, field, e)))
}

/// Read every well-formed record from `reader`.
///
/// Malformed records are skipped with a warning. A read failure stops the
/// scan and returns what was collected up to that point.
pub fn read_locations<R: Read>(reader: R, options: &LoaderOptions) -> Vec<Location> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(reader);

    let mut locations = Vec::new();
    let mut skipped = 0usize;

    for (index, result) in csv_reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                if matches!(e.kind(), ErrorKind::Io(_)) {
                    log::error!("Stopped reading locations: {}", e);
                    break;
                }
                log::warn!("Skipping unreadable record: {}", e);
                skipped += 1;
                continue;
            }
        };

        let line = record
            .position()
            .map(|pos| pos.line())
            .unwrap_or(index as u64 + 1);

        let parsed = parse_record(&record, line).and_then(|location| {
            if options.validate_coordinates {
                validate_location(&location).map_err(|e| GeoError::malformed(line, e.to_string()))?;
            }
            Ok(location)
        });

        match parsed {
            Ok(location) => locations.push(location),
            Err(e) => {
                log::warn!("Skipping {}", e);
                skipped += 1;
            }
        }
    }

    log::debug!(
        "Loaded {} locations, skipped {} records",
        locations.len(),
        skipped
    );
    locations
}

/// Open `path` and read its locations, failing if the file cannot be opened.
pub fn try_load_locations<P: AsRef<Path>>(path: P, options: &LoaderOptions) -> Result<Vec<Location>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| GeoError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(read_locations(BufReader::new(file), options))
}

/// Open `path` and read its locations.
///
/// An unreadable or missing file is logged and yields an empty set; the
/// caller decides whether that is fatal.
pub fn load_locations<P: AsRef<Path>>(path: P, options: &LoaderOptions) -> Vec<Location> {
    match try_load_locations(path, options) {
        Ok(locations) => locations,
        Err(e) => {
            log::error!("{}", e);
            Vec::new()
        }
    }
}
