use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::student::{RecordError, StudentRecord, CAREER_ASPIRATION_COLUMN};
use crate::models::subject::Subject;

/// Student rows loaded once at startup. Rows stay as raw text and are
/// validated into a `StudentRecord` when selected.
#[derive(Debug, Clone)]
pub struct StudentDataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    loaded_at: DateTime<Utc>,
}

/// Selecting a row failed.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("row {row} does not exist (dataset has {len} rows)")]
    OutOfBounds { row: usize, len: usize },

    #[error("row {row} is malformed: {source}")]
    Malformed {
        row: usize,
        #[source]
        source: RecordError,
    },
}

/// Reads the CSV dataset at `path`.
pub fn load_dataset(path: &Path) -> Result<StudentDataset> {
    info!("Loading student dataset from {}", path.display());

    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open dataset '{}'", path.display()))?;
    let dataset = StudentDataset::from_reader(file)
        .with_context(|| format!("Failed to parse dataset '{}'", path.display()))?;

    info!("Student dataset loaded: {} rows", dataset.len());
    Ok(dataset)
}

impl StudentDataset {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()
            .context("Dataset has no header row")?
            .iter()
            .map(str::to_string)
            .collect();

        let expected = Subject::ALL
            .iter()
            .map(Subject::column)
            .chain(std::iter::once(CAREER_ASPIRATION_COLUMN));
        for column in expected {
            if !headers.iter().any(|h| h == column) {
                warn!("Dataset header is missing column '{column}'; every row will be malformed");
            }
        }

        let mut rows = Vec::new();
        for (index, record) in csv_reader.records().enumerate() {
            let record = record.with_context(|| format!("Unreadable CSV record at row {index}"))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Self {
            headers,
            rows,
            loaded_at: Utc::now(),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Validates and returns the student at `row`.
    pub fn record(&self, row: usize) -> Result<StudentRecord, RowError> {
        let values = self.rows.get(row).ok_or(RowError::OutOfBounds {
            row,
            len: self.rows.len(),
        })?;

        let fields: HashMap<&str, &str> = self
            .headers
            .iter()
            .map(String::as_str)
            .zip(values.iter().map(String::as_str))
            .collect();

        StudentRecord::from_fields(row, |column| fields.get(column).copied())
            .map_err(|source| RowError::Malformed { row, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "id,first_name,career_aspiration,math_score,physics_score,chemistry_score,biology_score,english_score,geography_score,history_score";

    fn dataset(body: &str) -> StudentDataset {
        let csv = format!("{HEADER}\n{body}");
        StudentDataset::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_first_row_is_parsed() {
        let ds = dataset("1,Paul,Lawyer,80,60,90,50,85,40,30\n2,Ann,Doctor,70,70,70,70,70,70,70\n");
        assert_eq!(ds.len(), 2);
        let record = ds.record(0).unwrap();
        assert_eq!(record.career_aspiration, "Lawyer");
        assert_eq!(record.scores.get(Subject::English), 85);
    }

    #[test]
    fn test_rows_are_selectable_by_index() {
        let ds = dataset("1,Paul,Lawyer,80,60,90,50,85,40,30\n2,Ann,Doctor,71,72,73,74,75,76,77\n");
        let record = ds.record(1).unwrap();
        assert_eq!(record.row, 1);
        assert_eq!(record.career_aspiration, "Doctor");
        assert_eq!(record.scores.get(Subject::History), 77);
    }

    #[test]
    fn test_row_past_end_is_out_of_bounds() {
        let ds = dataset("1,Paul,Lawyer,80,60,90,50,85,40,30\n");
        assert!(matches!(
            ds.record(5),
            Err(RowError::OutOfBounds { row: 5, len: 1 })
        ));
    }

    #[test]
    fn test_bad_row_does_not_poison_others() {
        let ds = dataset("1,Paul,Lawyer,80,60,abc,50,85,40,30\n2,Ann,Doctor,70,70,70,70,70,70,70\n");
        match ds.record(0) {
            Err(RowError::Malformed { row, source }) => {
                assert_eq!(row, 0);
                assert!(matches!(source, RecordError::NonNumeric { .. }));
            }
            other => panic!("expected malformed row, got {other:?}"),
        }
        assert!(ds.record(1).is_ok());
    }

    #[test]
    fn test_missing_column_is_reported_per_record() {
        let csv = "career_aspiration,math_score\nLawyer,80\n";
        let ds = StudentDataset::from_reader(csv.as_bytes()).unwrap();
        let err = ds.record(0).unwrap_err();
        assert!(err.to_string().contains("physics_score"), "{err}");
    }

    #[test]
    fn test_ragged_csv_fails_to_load() {
        let csv = format!("{HEADER}\n1,Paul,Lawyer,80\n");
        assert!(StudentDataset::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_load_dataset_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        writeln!(file, "1,Paul,Artist,10,20,30,40,50,60,70").unwrap();
        let ds = load_dataset(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        assert!(!ds.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_dataset(Path::new("/nonexistent/studies_career.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open dataset"));
    }
}
