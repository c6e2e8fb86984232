//! Dataset and threshold ingest.
//!
//! Two small text formats:
//!
//! - dataset: two whitespace-separated numeric columns per line
//! - threshold: exactly one non-empty line holding a single number
//!
//! Design goals:
//! - **Row-level validation** for the dataset (skip bad lines, but report what happened)
//! - **Strict** threshold parsing (a run cannot proceed without one)
//! - **Separation of concerns**: no fitting logic here

use std::fs;
use std::path::Path;

use crate::domain::SampleSet;
use crate::error::IngestError;

/// A dataset line that was skipped.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// 1-based line number in the source file.
    pub line: usize,
    pub content: String,
    pub message: String,
}

/// Ingest output: usable samples + skipped lines.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub samples: SampleSet,
    pub row_errors: Vec<RowError>,
    /// Non-empty lines seen.
    pub lines_read: usize,
    pub lines_used: usize,
}

/// Read a two-column dataset file.
pub fn read_dataset(path: &Path) -> Result<Dataset, IngestError> {
    let text = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = parse_dataset(&text);
    for err in &dataset.row_errors {
        tracing::warn!(
            line = err.line,
            "skipping dataset line '{}': {}",
            err.content,
            err.message
        );
    }
    if dataset.samples.is_empty() {
        return Err(IngestError::EmptyDataset {
            path: path.to_path_buf(),
            skipped: dataset.row_errors.len(),
        });
    }
    tracing::info!(
        path = %path.display(),
        used = dataset.lines_used,
        skipped = dataset.row_errors.len(),
        "dataset loaded"
    );

    Ok(dataset)
}

/// Parse dataset text. Never fails; an empty result is the caller's problem.
pub fn parse_dataset(text: &str) -> Dataset {
    let mut samples = SampleSet::default();
    let mut row_errors = Vec::new();
    let mut lines_read = 0usize;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        lines_read += 1;

        match parse_row(line) {
            Ok((x, y)) => samples.push(x, y),
            Err(message) => row_errors.push(RowError {
                line: idx + 1,
                content: line.to_string(),
                message,
            }),
        }
    }

    Dataset {
        lines_used: samples.len(),
        samples,
        row_errors,
        lines_read,
    }
}

fn parse_row(line: &str) -> Result<(f64, f64), String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [x, y] = fields.as_slice() else {
        return Err(format!("expected 2 columns, found {}", fields.len()));
    };
    Ok((parse_value(x)?, parse_value(y)?))
}

fn parse_value(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(format!("non-finite value '{s}'")),
        Err(_) => Err(format!("not a number: '{s}'")),
    }
}

/// Read a single-value threshold file.
pub fn read_threshold(path: &Path) -> Result<f64, IngestError> {
    let text = fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let xth = parse_threshold(&text).map_err(|reason| IngestError::MalformedThreshold {
        path: path.to_path_buf(),
        reason,
    })?;
    tracing::info!(path = %path.display(), xth, "threshold loaded");
    Ok(xth)
}

/// Parse threshold text: exactly one non-empty line, one finite number.
pub fn parse_threshold(text: &str) -> Result<f64, String> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let [line] = lines.as_slice() else {
        return Err(format!(
            "expected exactly one non-empty line, found {}",
            lines.len()
        ));
    };
    parse_value(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_skips_blank_and_malformed_lines() {
        let text = "0 1.5\n\n  1\t2.5  \n2 3 4\n3 abc\n4 5e-1\n";
        let d = parse_dataset(text);

        assert_eq!(d.samples.x(), &[0.0, 1.0, 4.0]);
        assert_eq!(d.samples.y(), &[1.5, 2.5, 0.5]);
        assert_eq!(d.lines_read, 5);
        assert_eq!(d.lines_used, 3);

        let lines: Vec<usize> = d.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![4, 5]);
        assert_eq!(d.row_errors[0].message, "expected 2 columns, found 3");
        assert_eq!(d.row_errors[1].content, "3 abc");
    }

    #[test]
    fn dataset_rejects_non_finite_values() {
        let d = parse_dataset("1 NaN\ninf 2\n3 4\n");
        assert_eq!(d.samples.len(), 1);
        assert_eq!(d.row_errors.len(), 2);
    }

    #[test]
    fn all_malformed_dataset_reports_skipped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dataset.txt");
        fs::write(&path, "x y\n1\n\n2 3 4\n").unwrap();

        let err = read_dataset(&path).unwrap_err();
        assert!(
            matches!(err, IngestError::EmptyDataset { skipped: 3, .. }),
            "{err:?}"
        );
        assert!(err.to_string().contains("3 malformed line(s) skipped"), "{err}");
    }

    #[test]
    fn threshold_accepts_single_padded_line() {
        assert_eq!(parse_threshold("\n  42.5 \n\n").unwrap(), 42.5);
    }

    #[test]
    fn threshold_rejects_wrong_line_count() {
        let err = parse_threshold("1\n2\n").unwrap_err();
        assert!(err.contains("found 2"), "{err}");
        assert!(parse_threshold("   \n").is_err());
    }

    #[test]
    fn threshold_rejects_unparsable_value() {
        assert!(parse_threshold("12 13").unwrap_err().contains("not a number"));
        assert!(parse_threshold("NaN").is_err());
    }
}
