//! CSV Data Loader Module
//! Handles catalog CSV loading and schema validation using Polars.

use crate::data::record::{Dataset, COL_RELEASE_YEAR, REQUIRED_COLUMNS};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("Schema violation: {0}")]
    SchemaViolation(String),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
}

/// Loads the catalog CSV into a `Dataset`.
///
/// Every column is read as text; empty fields become nulls. A row with more
/// fields than the header aborts the load, a row with fewer fields is padded
/// with nulls by the reader. `release_year` is then parsed into Int32 and
/// must hold an integer on every row.
pub struct DataLoader {
    default_file_name: String,
}

impl DataLoader {
    /// `default_file_name` is looked up when the input path is a directory.
    pub fn new(default_file_name: impl Into<String>) -> Self {
        Self {
            default_file_name: default_file_name.into(),
        }
    }

    /// Map a file or folder path to the CSV file to read.
    pub fn resolve_path(&self, input: &Path) -> Result<PathBuf, LoaderError> {
        if !input.exists() {
            return Err(LoaderError::InputNotFound(input.to_path_buf()));
        }

        if input.is_dir() {
            let candidate = input.join(&self.default_file_name);
            if !candidate.is_file() {
                return Err(LoaderError::InputNotFound(candidate));
            }
            return Ok(candidate);
        }

        Ok(input.to_path_buf())
    }

    /// Load and validate a catalog CSV.
    pub fn load_csv(&self, input: &Path) -> Result<Dataset, LoaderError> {
        let path = self.resolve_path(input)?;
        info!(path = %path.display(), "loading catalog");

        let mut df = LazyCsvReader::new(&path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_truncate_ragged_lines(false)
            .with_ignore_errors(false)
            .finish()?
            .collect()?;

        Self::check_columns(&df)?;

        let years = Self::parse_release_years(&df)?;
        df.with_column(years)?;

        debug!(rows = df.height(), columns = df.width(), "catalog loaded");
        Ok(Dataset::from_validated_frame(df))
    }

    fn check_columns(df: &DataFrame) -> Result<(), LoaderError> {
        let present: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| !present.iter().any(|p| p == name))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(LoaderError::SchemaViolation(format!(
                "missing column(s): {}",
                missing.join(", ")
            )))
        }
    }

    fn parse_release_years(df: &DataFrame) -> Result<Column, LoaderError> {
        let raw = df.column(COL_RELEASE_YEAR)?.as_materialized_series().str()?;

        let mut years: Vec<i32> = Vec::with_capacity(raw.len());
        for (idx, value) in raw.into_iter().enumerate() {
            let year = value
                .and_then(|v| v.trim().parse::<i32>().ok())
                .ok_or_else(|| {
                    LoaderError::SchemaViolation(format!(
                        "row {}: release_year {:?} is not an integer",
                        idx + 1,
                        value.unwrap_or("")
                    ))
                })?;
            years.push(year);
        }

        Ok(Column::new(COL_RELEASE_YEAR.into(), years))
    }
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new("netflix_data.csv")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::{ContentType, COL_DIRECTOR, COL_RATING};
    use std::fs;

    const HEADER: &str =
        "show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in";

    fn write_csv(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn missing_path_is_input_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataLoader::default()
            .load_csv(&dir.path().join("nope.csv"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::InputNotFound(_)));
    }

    #[test]
    fn loads_rows_in_order_with_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let body = format!(
            "{HEADER}\n\
             s1,Movie,Alpha,Ann,,\"United States, India\",\"May 1, 2020\",2015,,90 min,\"Dramas, Comedies\"\n\
             s2,TV Show,Beta,,Bob,,,2005,TV-MA,2 Seasons,Kids' TV\n"
        );
        let path = write_csv(dir.path(), "catalog.csv", &body);

        let dataset = DataLoader::default().load_csv(&path).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.field_names()[0], "show_id");

        let records = dataset.records().unwrap();
        assert_eq!(records[0].content_type, Some(ContentType::Movie));
        assert_eq!(records[0].country.as_deref(), Some("United States, India"));
        assert_eq!(records[0].cast, None);
        assert_eq!(records[0].rating, None);
        assert_eq!(records[0].release_year, 2015);
        assert_eq!(records[1].content_type, Some(ContentType::TvShow));
        assert_eq!(records[1].director, None);
        assert_eq!(records[1].release_year, 2005);

        let nulls = dataset.null_counts();
        let count = |name: &str| nulls.iter().find(|(n, _)| n == name).unwrap().1;
        assert_eq!(count(COL_DIRECTOR), 1);
        assert_eq!(count(COL_RATING), 1);
    }

    #[test]
    fn directory_input_uses_default_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let body = format!(
            "{HEADER}\ns1,Movie,Alpha,Ann,Cat,US,\"May 1, 2020\",2015,R,90 min,Dramas\n"
        );
        write_csv(dir.path(), "netflix_data.csv", &body);

        let dataset = DataLoader::default().load_csv(dir.path()).unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn directory_without_default_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataLoader::default().load_csv(dir.path()).unwrap_err();
        assert!(matches!(err, LoaderError::InputNotFound(p) if p.ends_with("netflix_data.csv")));
    }

    #[test]
    fn missing_required_column_is_schema_violation() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "catalog.csv",
            "type,title,director,cast,country,date_added,release_year,listed_in\n\
             Movie,Alpha,Ann,Cat,US,x,2015,Dramas\n",
        );

        let err = DataLoader::default().load_csv(&path).unwrap_err();
        match err {
            LoaderError::SchemaViolation(msg) => assert!(msg.contains("rating")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_integer_year_names_the_row() {
        let dir = tempfile::tempdir().unwrap();
        let body = format!(
            "{HEADER}\n\
             s1,Movie,Alpha,Ann,Cat,US,x,2015,R,90 min,Dramas\n\
             s2,Movie,Beta,Ann,Cat,US,x,soon,R,90 min,Dramas\n"
        );
        let path = write_csv(dir.path(), "catalog.csv", &body);

        let err = DataLoader::default().load_csv(&path).unwrap_err();
        match err {
            LoaderError::SchemaViolation(msg) => assert!(msg.starts_with("row 2")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn row_with_extra_fields_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let body = format!(
            "{HEADER}\n\
             s1,Movie,Alpha,Ann,Cat,US,x,2015,R,90 min,Dramas,surplus\n"
        );
        let path = write_csv(dir.path(), "catalog.csv", &body);

        assert!(DataLoader::default().load_csv(&path).is_err());
    }

    #[test]
    fn short_row_is_padded_with_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let body = format!(
            "{HEADER}\n\
             s1,Movie,Alpha,Ann,Cat,US,x,2015,R,90 min,Dramas\n\
             s2,Movie,B,D,C,US,x,2016\n"
        );
        let path = write_csv(dir.path(), "catalog.csv", &body);

        let dataset = DataLoader::default().load_csv(&path).unwrap();
        assert_eq!(dataset.len(), 2);

        let records = dataset.records().unwrap();
        assert_eq!(records[1].release_year, 2016);
        assert_eq!(records[1].rating, None);
        assert_eq!(records[1].duration, None);
        assert_eq!(records[1].listed_in, None);
    }
}
