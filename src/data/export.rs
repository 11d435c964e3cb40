//! Flat-file export of the raw and cleaned catalog copies.

use crate::data::record::Dataset;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write CSV: {0}")]
    CsvError(#[from] PolarsError),
}

impl ExportError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Create `dir` and its parents if needed.
pub fn ensure_dir(dir: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))
}

/// Write the dataset with its full schema, header included.
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let mut file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut df = dataset.frame().clone();
    CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;

    info!(path = %path.display(), rows = df.height(), "wrote csv");
    Ok(())
}

/// Write a text file, creating parent directories.
pub fn write_text(contents: &str, path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    fs::write(path, contents).map_err(|e| ExportError::io(path, e))?;
    info!(path = %path.display(), bytes = contents.len(), "wrote text");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::DataLoader;
    use crate::data::record::{ContentType, Record};

    #[test]
    fn csv_copy_reloads_identically() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![
            Record {
                content_type: Some(ContentType::Movie),
                title: Some("Alpha".to_string()),
                country: Some("US, UK".to_string()),
                rating: Some("PG".to_string()),
                release_year: 2015,
                listed_in: Some("Dramas, Comedies".to_string()),
                ..Default::default()
            },
            Record {
                content_type: Some(ContentType::TvShow),
                director: Some("Lee".to_string()),
                release_year: 1999,
                ..Default::default()
            },
        ];
        let dataset = Dataset::from_records(&records).unwrap();

        let path = dir.path().join("nested").join("copy.csv");
        write_csv(&dataset, &path).unwrap();

        let reloaded = DataLoader::default().load_csv(&path).unwrap();
        assert_eq!(reloaded.field_names(), dataset.field_names());
        assert_eq!(reloaded.records().unwrap(), records);
    }

    #[test]
    fn text_is_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.txt");
        write_text("line one\nline two", &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "line one\nline two");
    }
}
