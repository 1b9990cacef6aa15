// Chart assembly service - folds raw CSV rows into a renderable document
use crate::domain::chart::{self, ChartDocument, Dataset};
use crate::domain::column::{self, TimingColumn};
use crate::domain::record::{normalize_timestamp, CoercionPolicy, RunRecord};
use crate::domain::window::WindowPolicy;
use crate::infrastructure::csv_source::CsvTable;
use thiserror::Error;

/// Fatal pre-render failures. Each variant renders a distinct message so
/// callers and tests can tell the failure modes apart.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("CSV not found or empty at {path}")]
    CsvUnreadable { path: String },
    #[error("No timing columns detected in CSV header: {header:?}")]
    NoTimingColumns { header: Vec<String> },
    #[error("No valid rows with timestamps found")]
    NoValidRecords,
    #[error("Unparsable numeric cell in column '{column}': {value:?}")]
    BadNumericCell { column: String, value: String },
}

#[derive(Debug, Clone)]
pub struct ChartService {
    window: WindowPolicy,
    on_bad_value: CoercionPolicy,
}

impl ChartService {
    pub fn new(window: WindowPolicy, on_bad_value: CoercionPolicy) -> Self {
        Self {
            window,
            on_bad_value,
        }
    }

    /// Full assembly: classify the header, normalize rows into records,
    /// select the trailing window, and build the chart document.
    pub fn build_document(&self, table: &CsvTable) -> Result<ChartDocument, PipelineError> {
        let timing = column::timing_columns(&table.header);
        if timing.is_empty() {
            return Err(PipelineError::NoTimingColumns {
                header: table.header.clone(),
            });
        }

        let records = self.normalize_rows(&table.rows, &timing)?;
        if records.is_empty() {
            return Err(PipelineError::NoValidRecords);
        }

        let window = self.window.select(&records);
        tracing::debug!(
            "charting {} of {} normalized records",
            window.len(),
            records.len()
        );

        let labels: Vec<String> = window.iter().map(|r| r.timestamp.clone()).collect();
        let datasets = Self::build_datasets(&timing, window);
        let title = format!(
            "Per-run elapsed times (stacked) — last {} runs — unit: ms",
            window.len()
        );

        Ok(ChartDocument::stacked_bar(title, labels, datasets))
    }

    /// Rows with an unparsable timestamp are skipped outright. Numeric
    /// cells follow the configured coercion policy.
    fn normalize_rows(
        &self,
        rows: &[Vec<String>],
        timing: &[TimingColumn],
    ) -> Result<Vec<RunRecord>, PipelineError> {
        let mut records = Vec::with_capacity(rows.len());

        'row: for row in rows {
            let Some(timestamp) = row.first().and_then(|cell| normalize_timestamp(cell)) else {
                continue;
            };

            let mut values = std::collections::HashMap::with_capacity(timing.len());
            for col in timing {
                // Short rows read as "0"
                let raw = row.get(col.index).map(String::as_str).unwrap_or("0");
                let parsed = match raw.parse::<f64>() {
                    Ok(v) => v,
                    Err(_) => match self.on_bad_value {
                        CoercionPolicy::Zero => 0.0,
                        CoercionPolicy::Skip => {
                            tracing::debug!(
                                "dropping row at {}: bad value {:?} in {}",
                                timestamp,
                                raw,
                                col.name
                            );
                            continue 'row;
                        }
                        CoercionPolicy::Fail => {
                            return Err(PipelineError::BadNumericCell {
                                column: col.name.clone(),
                                value: raw.to_string(),
                            });
                        }
                    },
                };
                values.insert(col.name.clone(), parsed);
            }

            records.push(RunRecord::new(timestamp, values));
        }

        Ok(records)
    }

    /// One bar dataset per timing column in header order, colored from the
    /// fixed palette by column index. Every column whose name reads as a
    /// "total" is lifted out of the stack and appended as an overlay line
    /// after the bars.
    fn build_datasets(timing: &[TimingColumn], window: &[RunRecord]) -> Vec<Dataset> {
        let mut bars = Vec::new();
        let mut overlays = Vec::new();

        for (idx, col) in timing.iter().enumerate() {
            let data: Vec<f64> = window.iter().map(|r| r.value(&col.name)).collect();
            if column::is_total_label(&col.name) {
                overlays.push(Dataset::overlay_line(col.name.clone(), data));
            } else {
                bars.push(Dataset::stacked_bar(
                    col.name.clone(),
                    data,
                    chart::palette_color(idx),
                ));
            }
        }

        bars.extend(overlays);
        bars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::CoercionPolicy;

    fn table(header: &[&str], rows: &[&[&str]]) -> CsvTable {
        CsvTable {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    fn service(points: usize) -> ChartService {
        ChartService::new(
            WindowPolicy {
                points,
                days: 7,
                interval_minutes: 5,
                max_points: 800,
            },
            CoercionPolicy::Zero,
        )
    }

    #[test]
    fn test_no_timing_columns_is_fatal() {
        let err = service(0)
            .build_document(&table(&["ts", "baz"], &[&["2024-01-01T00:00:00Z", "1"]]))
            .unwrap_err();
        assert!(matches!(err, PipelineError::NoTimingColumns { .. }));
        assert!(err.to_string().contains("No timing columns"));
    }

    #[test]
    fn test_no_valid_records_is_fatal() {
        let err = service(0)
            .build_document(&table(&["ts", "fooTime"], &[&["not-a-date", "1"]]))
            .unwrap_err();
        assert!(matches!(err, PipelineError::NoValidRecords));
    }

    #[test]
    fn test_bad_cell_coerced_to_zero_by_default() {
        let doc = service(0)
            .build_document(&table(
                &["ts", "fooTime", "bar_total"],
                &[&["2024-01-01T00:00:00Z", "12.5", "bad"]],
            ))
            .unwrap();
        assert_eq!(doc.data.labels, vec!["2024-01-01T00:00:00+00:00"]);
        // fooTime keeps its value, bar_total coerces to 0.0
        assert_eq!(doc.data.datasets[0].label, "fooTime");
        assert_eq!(doc.data.datasets[0].data, vec![12.5]);
        let total = doc.data.datasets.iter().find(|d| d.label == "bar_total").unwrap();
        assert_eq!(total.data, vec![0.0]);
    }

    #[test]
    fn test_skip_policy_drops_row() {
        let svc = ChartService::new(
            WindowPolicy {
                points: 0,
                days: 7,
                interval_minutes: 5,
                max_points: 800,
            },
            CoercionPolicy::Skip,
        );
        let doc = svc
            .build_document(&table(
                &["ts", "fooTime"],
                &[
                    &["2024-01-01T00:00:00Z", "bad"],
                    &["2024-01-01T00:05:00Z", "2.0"],
                ],
            ))
            .unwrap();
        assert_eq!(doc.data.labels, vec!["2024-01-01T00:05:00+00:00"]);
    }

    #[test]
    fn test_fail_policy_aborts() {
        let svc = ChartService::new(
            WindowPolicy {
                points: 0,
                days: 7,
                interval_minutes: 5,
                max_points: 800,
            },
            CoercionPolicy::Fail,
        );
        let err = svc
            .build_document(&table(&["ts", "fooTime"], &[&["2024-01-01T00:00:00Z", "bad"]]))
            .unwrap_err();
        assert!(matches!(err, PipelineError::BadNumericCell { .. }));
    }

    #[test]
    fn test_short_row_reads_as_zero() {
        let doc = service(0)
            .build_document(&table(
                &["ts", "fooTime", "writeTime"],
                &[&["2024-01-01T00:00:00Z", "1.5"]],
            ))
            .unwrap();
        let write = doc.data.datasets.iter().find(|d| d.label == "writeTime").unwrap();
        assert_eq!(write.data, vec![0.0]);
    }

    #[test]
    fn test_total_column_becomes_trailing_line() {
        let doc = service(0)
            .build_document(&table(
                &["ts", "readTime", "writeTime", "total"],
                &[&["2024-01-01T00:00:00Z", "1", "2", "3"]],
            ))
            .unwrap();
        let datasets = &doc.data.datasets;
        assert_eq!(datasets.len(), 3);
        assert_eq!(datasets[0].label, "readTime");
        assert_eq!(datasets[1].label, "writeTime");
        assert!(!datasets[0].is_line());
        assert_eq!(datasets[0].stack, datasets[1].stack);
        // Overlay appended last, no stack id
        assert_eq!(datasets[2].label, "total");
        assert!(datasets[2].is_line());
        assert!(datasets[2].stack.is_none());
    }

    #[test]
    fn test_every_total_column_overlays() {
        let doc = service(0)
            .build_document(&table(
                &["ts", "readTime", "subTotal", "grandTotal"],
                &[&["2024-01-01T00:00:00Z", "1", "2", "3"]],
            ))
            .unwrap();
        let lines: Vec<&str> = doc
            .data
            .datasets
            .iter()
            .filter(|d| d.is_line())
            .map(|d| d.label.as_str())
            .collect();
        assert_eq!(lines, vec!["subTotal", "grandTotal"]);
        assert_eq!(doc.data.datasets[0].label, "readTime");
    }

    #[test]
    fn test_title_embeds_point_count() {
        let doc = service(0)
            .build_document(&table(
                &["ts", "fooTime"],
                &[
                    &["2024-01-01T00:00:00Z", "1"],
                    &["2024-01-01T00:05:00Z", "2"],
                ],
            ))
            .unwrap();
        assert!(doc.title().contains("last 2 runs"));
    }

    #[test]
    fn test_windowing_applies_before_building() {
        let rows: Vec<Vec<String>> = (0..10)
            .map(|i| vec![format!("2024-01-01T00:{:02}:00Z", i), i.to_string()])
            .collect();
        let table = CsvTable {
            header: vec!["ts".to_string(), "fooTime".to_string()],
            rows,
        };
        let doc = service(3).build_document(&table).unwrap();
        assert_eq!(doc.data.labels.len(), 3);
        assert_eq!(doc.data.labels[0], "2024-01-01T00:07:00+00:00");
        assert_eq!(doc.data.datasets[0].data, vec![7.0, 8.0, 9.0]);
    }
}
