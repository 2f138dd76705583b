//! Loading of migration records from `<legacy uuid>,<ISO-8601 timestamp>` lines.
//!
//! Accepted timestamp shapes:
//!
//! - RFC 3339 with an offset: `2021-01-01T09:00:00+09:00`, `2021-01-01T00:00:00.250Z`
//! - date and time with a `+HH`, `+HHMM` or `+HH:MM` offset, `T` or space separated, as printed
//!   by PostgreSQL for `timestamptz`: `2021-01-01 00:00:00+00`
//! - date and time without an offset, read as UTC: `2021-01-01T00:00:00`, `2021-01-01 00:00`
//! - a bare date, read as midnight UTC: `2021-01-01`
//!
//! A single malformed line fails the whole read.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use thiserror::Error;

use crate::{MigrationRecord, ParseError, Uuid};

/// Errors that can occur while loading migration records.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: expected 2 comma-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: invalid identifier '{value}': {source}")]
    InvalidId {
        line: usize,
        value: String,
        source: ParseError,
    },

    #[error("line {line}: invalid timestamp '{value}'")]
    InvalidTimestamp { line: usize, value: String },
}

impl LoadError {
    /// Returns the 1-based number of the offending line, if the error is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io(_) => None,
            Self::FieldCount { line, .. }
            | Self::InvalidId { line, .. }
            | Self::InvalidTimestamp { line, .. } => Some(*line),
        }
    }
}

// `%#z` takes `+HH`, `+HHMM` and `+HH:MM`, which covers PostgreSQL `timestamptz` output
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%d %H:%M:%S%.f%#z"];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Reads every line of `reader` into a [`MigrationRecord`].
///
/// # Examples
///
/// ```rust
/// use uuid7_migrate::input::read_records;
///
/// let text = "11111111-1111-1111-1111-111111111111,2021-01-01T00:00:00Z\n";
/// let records = read_records(text.as_bytes())?;
/// assert_eq!(records[0].original_ts_ms, 1_609_459_200_000);
/// # Ok::<(), uuid7_migrate::input::LoadError>(())
/// ```
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<MigrationRecord>, LoadError> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        records.push(parse_line(index + 1, &line?)?);
    }
    log::debug!("loaded {} migration records", records.len());
    Ok(records)
}

/// Opens `path` and reads it with [`read_records`].
pub fn read_records_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<MigrationRecord>, LoadError> {
    let path = path.as_ref();
    log::debug!("reading migration records from {}", path.display());
    read_records(BufReader::new(File::open(path)?))
}

/// Parses one `<legacy uuid>,<timestamp>` line.
pub fn parse_line(line: usize, text: &str) -> Result<MigrationRecord, LoadError> {
    let fields: Vec<&str> = text.trim().split(',').map(str::trim).collect();
    let [id, ts] = fields[..] else {
        return Err(LoadError::FieldCount {
            line,
            found: fields.len(),
        });
    };

    let legacy_id = id.parse::<Uuid>().map_err(|source| LoadError::InvalidId {
        line,
        value: id.to_owned(),
        source,
    })?;
    let original_ts_ms = parse_timestamp(ts)
        .and_then(|dt| u64::try_from(dt.timestamp_millis()).ok())
        .ok_or_else(|| LoadError::InvalidTimestamp {
            line,
            value: ts.to_owned(),
        })?;

    Ok(MigrationRecord::new(legacy_id, original_ts_ms))
}

/// Parses an ISO-8601 timestamp; values without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
