// Normalized run records parsed from raw CSV rows
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use std::collections::HashMap;

/// One charted run: a canonical UTC timestamp plus the parsed value of
/// every timing column.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRecord {
    pub timestamp: String,
    pub values: HashMap<String, f64>,
}

impl RunRecord {
    pub fn new(timestamp: String, values: HashMap<String, f64>) -> Self {
        Self { timestamp, values }
    }

    /// Value of a timing column, 0.0 when the column is absent.
    pub fn value(&self, column: &str) -> f64 {
        self.values.get(column).copied().unwrap_or(0.0)
    }
}

/// How a numeric cell that fails to parse is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CoercionPolicy {
    /// Substitute 0.0 and keep the row.
    #[default]
    Zero,
    /// Drop the whole row.
    Skip,
    /// Abort the run.
    Fail,
}

/// Parse a permissive ISO-8601 timestamp and renormalize it to canonical
/// UTC with an explicit offset. A trailing "Z" is accepted as UTC, and
/// offset-less stamps are taken as UTC. Returns None for anything that is
/// not a timestamp; callers drop such rows.
pub fn normalize_timestamp(raw: &str) -> Option<String> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(canonical(parsed.with_timezone(&Utc)));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(canonical(naive.and_utc()));
        }
    }
    None
}

fn canonical(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}
