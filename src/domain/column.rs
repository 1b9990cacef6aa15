// Column classification for run-history CSV headers

/// Kind of a non-timestamp CSV column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Elapsed-duration column charted as a series.
    Timing,
    /// Anything else; ignored by the chart.
    Other,
}

impl ColumnKind {
    /// Classify a header name. A column is a timing column when its name
    /// ends with the literal suffix "Time" (case-sensitive) or contains
    /// "total" in any case.
    pub fn of(name: &str) -> Self {
        if name.ends_with("Time") || is_total_label(name) {
            ColumnKind::Timing
        } else {
            ColumnKind::Other
        }
    }
}

/// True when the label names an aggregate "total" series.
pub fn is_total_label(label: &str) -> bool {
    label.to_lowercase().contains("total")
}

/// A timing column resolved against a concrete header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingColumn {
    pub index: usize,
    pub name: String,
}

/// Find timing columns in header order. Index 0 is the timestamp column
/// by convention and is never considered.
pub fn timing_columns(header: &[String]) -> Vec<TimingColumn> {
    header
        .iter()
        .enumerate()
        .skip(1)
        .filter(|(_, name)| ColumnKind::of(name) == ColumnKind::Timing)
        .map(|(index, name)| TimingColumn {
            index,
            name: name.clone(),
        })
        .collect()
}
