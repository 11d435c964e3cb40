//! Data Cleaner Module
//! Fills missing values in the nominal catalog columns with fixed sentinels.

use crate::config::Sentinels;
use crate::data::record::Dataset;
use polars::prelude::*;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum CleanerError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Schema violation: column '{0}' not found")]
    MissingColumn(String),
}

/// Null counts for one imputed column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNulls {
    pub field: String,
    pub sentinel: String,
    pub before: usize,
    pub after: usize,
}

/// Before/after null counts for every imputed column, in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningSummary {
    pub fields: Vec<FieldNulls>,
}

impl CleaningSummary {
    pub fn total_filled(&self) -> usize {
        self.fields.iter().map(|f| f.before - f.after).sum()
    }
}

/// Replaces nulls in director, cast, country, date_added and rating.
///
/// Non-null values are never touched, so a second pass is a no-op.
pub struct DataCleaner {
    sentinels: Sentinels,
}

impl DataCleaner {
    pub fn new(sentinels: Sentinels) -> Self {
        Self { sentinels }
    }

    /// Current null count of each imputed column.
    pub fn count_nulls(&self, dataset: &Dataset) -> Result<Vec<(String, usize)>, CleanerError> {
        self.sentinels
            .columns()
            .iter()
            .map(|(name, _)| {
                let column = dataset
                    .frame()
                    .column(name)
                    .map_err(|_| CleanerError::MissingColumn(name.to_string()))?;
                Ok((name.to_string(), column.null_count()))
            })
            .collect()
    }

    /// Fill nulls in place and report what changed.
    pub fn clean(&self, dataset: &mut Dataset) -> Result<CleaningSummary, CleanerError> {
        let before = self.count_nulls(dataset)?;

        let fills: Vec<Expr> = self
            .sentinels
            .columns()
            .iter()
            .map(|(name, sentinel)| col(*name).fill_null(lit(*sentinel)))
            .collect();

        let cleaned = dataset.frame().clone().lazy().with_columns(fills).collect()?;
        dataset.replace_frame(cleaned);

        let after = self.count_nulls(dataset)?;

        let fields: Vec<FieldNulls> = self
            .sentinels
            .columns()
            .iter()
            .zip(before.into_iter().zip(after))
            .map(|((name, sentinel), ((_, before), (_, after)))| FieldNulls {
                field: name.to_string(),
                sentinel: sentinel.to_string(),
                before,
                after,
            })
            .collect();

        let summary = CleaningSummary { fields };
        debug!(filled = summary.total_filled(), "cleaning complete");
        Ok(summary)
    }
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self::new(Sentinels::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::{ContentType, Record};

    fn dirty() -> Dataset {
        Dataset::from_records(&[
            Record {
                content_type: Some(ContentType::Movie),
                director: Some("Ava".to_string()),
                country: Some("US, UK".to_string()),
                listed_in: Some("Drama".to_string()),
                release_year: 2015,
                ..Default::default()
            },
            Record {
                content_type: Some(ContentType::TvShow),
                rating: Some("TV-MA".to_string()),
                cast: Some("Lee".to_string()),
                release_year: 2005,
                ..Default::default()
            },
        ])
        .unwrap()
    }

    #[test]
    fn fills_every_designated_null() {
        let mut dataset = dirty();
        let summary = DataCleaner::default().clean(&mut dataset).unwrap();

        assert!(summary.fields.iter().all(|f| f.after == 0));
        let rating = summary.fields.iter().find(|f| f.field == "rating").unwrap();
        assert_eq!(rating.before, 1);
        assert_eq!(summary.total_filled(), 6);

        let records = dataset.records().unwrap();
        assert_eq!(records[0].rating.as_deref(), Some("Not Rated"));
        assert_eq!(records[0].cast.as_deref(), Some("Unknown"));
        assert_eq!(records[1].date_added.as_deref(), Some("Not Available"));
        assert_eq!(records[1].country.as_deref(), Some("Unknown"));
    }

    #[test]
    fn leaves_present_values_and_other_columns_alone() {
        let mut dataset = dirty();
        DataCleaner::default().clean(&mut dataset).unwrap();

        let records = dataset.records().unwrap();
        assert_eq!(records[0].director.as_deref(), Some("Ava"));
        assert_eq!(records[1].rating.as_deref(), Some("TV-MA"));
        assert_eq!(records[0].title, None);
        assert_eq!(records[1].listed_in, None);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let cleaner = DataCleaner::default();
        let mut once = dirty();
        cleaner.clean(&mut once).unwrap();

        let mut twice = once.clone();
        let second = cleaner.clean(&mut twice).unwrap();

        assert_eq!(second.total_filled(), 0);
        assert_eq!(once.records().unwrap(), twice.records().unwrap());
    }

    #[test]
    fn sentinels_can_be_substituted() {
        let sentinels = Sentinels {
            rating: "UNRATED".to_string(),
            ..Sentinels::default()
        };
        let mut dataset = dirty();
        DataCleaner::new(sentinels).clean(&mut dataset).unwrap();

        let records = dataset.records().unwrap();
        assert_eq!(records[0].rating.as_deref(), Some("UNRATED"));
    }
}
