// CSV file source for run-duration history
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Raw parsed table: trimmed header plus trimmed data rows. Rows may be
/// ragged; downstream indexing is bounds-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the table, or None when the file is absent or holds fewer
    /// than two lines (header plus at least one data row). Fully blank
    /// rows are discarded here.
    pub fn load(&self) -> Result<Option<CsvTable>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;

        let mut lines: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record =
                record.with_context(|| format!("reading {}", self.path.display()))?;
            lines.push(record.iter().map(|cell| cell.trim().to_string()).collect());
        }

        if lines.len() < 2 {
            return Ok(None);
        }

        let header = lines.remove(0);
        let rows: Vec<Vec<String>> = lines
            .into_iter()
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .collect();

        Ok(Some(CsvTable { header, rows }))
    }
}
