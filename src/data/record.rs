//! Catalog Record Module
//! Typed row view and the frame-backed dataset shared by every stage.

use polars::prelude::*;
use std::fmt;

pub const COL_TYPE: &str = "type";
pub const COL_TITLE: &str = "title";
pub const COL_DIRECTOR: &str = "director";
pub const COL_CAST: &str = "cast";
pub const COL_COUNTRY: &str = "country";
pub const COL_DATE_ADDED: &str = "date_added";
pub const COL_RELEASE_YEAR: &str = "release_year";
pub const COL_RATING: &str = "rating";
pub const COL_DURATION: &str = "duration";
pub const COL_LISTED_IN: &str = "listed_in";

/// Columns the pipeline reads; a file without one of them is rejected.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    COL_TYPE,
    COL_DIRECTOR,
    COL_CAST,
    COL_COUNTRY,
    COL_DATE_ADDED,
    COL_RELEASE_YEAR,
    COL_RATING,
    COL_LISTED_IN,
];

/// Kind of title. Labels other than the two known ones are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentType {
    Movie,
    TvShow,
    Other(String),
}

impl ContentType {
    pub fn parse(label: &str) -> Self {
        match label.trim() {
            "Movie" => ContentType::Movie,
            "TV Show" => ContentType::TvShow,
            other => ContentType::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
            ContentType::Other(label) => label,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One catalog title.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    pub content_type: Option<ContentType>,
    pub title: Option<String>,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub country: Option<String>,
    pub date_added: Option<String>,
    pub release_year: i32,
    pub rating: Option<String>,
    pub duration: Option<String>,
    /// Comma separated genre list.
    pub listed_in: Option<String>,
}

/// Ordered catalog backed by a polars DataFrame.
///
/// The frame keeps every input column, including ones the analysis never
/// reads, so exported copies carry the input schema. `release_year` is
/// always an Int32 column; every other column is text.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
}

impl Dataset {
    /// Wrap a frame that already satisfies the schema rules (see `DataLoader`).
    pub(crate) fn from_validated_frame(df: DataFrame) -> Self {
        Self { df }
    }

    /// Build a dataset from typed rows.
    pub fn from_records(records: &[Record]) -> PolarsResult<Self> {
        fn text<F>(records: &[Record], name: &str, field: F) -> Column
        where
            F: Fn(&Record) -> Option<&str>,
        {
            let values: Vec<Option<&str>> = records.iter().map(|r| field(r)).collect();
            Column::new(name.into(), values)
        }

        let years: Vec<i32> = records.iter().map(|r| r.release_year).collect();

        let df = DataFrame::new(vec![
            text(records, COL_TYPE, |r| r.content_type.as_ref().map(|t| t.label())),
            text(records, COL_TITLE, |r| r.title.as_deref()),
            text(records, COL_DIRECTOR, |r| r.director.as_deref()),
            text(records, COL_CAST, |r| r.cast.as_deref()),
            text(records, COL_COUNTRY, |r| r.country.as_deref()),
            text(records, COL_DATE_ADDED, |r| r.date_added.as_deref()),
            Column::new(COL_RELEASE_YEAR.into(), years),
            text(records, COL_RATING, |r| r.rating.as_deref()),
            text(records, COL_DURATION, |r| r.duration.as_deref()),
            text(records, COL_LISTED_IN, |r| r.listed_in.as_deref()),
        ])?;

        Ok(Self { df })
    }

    /// Materialize typed rows in input order.
    pub fn records(&self) -> PolarsResult<Vec<Record>> {
        let content_type = self.text_column(COL_TYPE)?;
        let title = self.optional_text_column(COL_TITLE)?;
        let director = self.text_column(COL_DIRECTOR)?;
        let cast = self.text_column(COL_CAST)?;
        let country = self.text_column(COL_COUNTRY)?;
        let date_added = self.text_column(COL_DATE_ADDED)?;
        let release_year = self.release_years()?;
        let rating = self.text_column(COL_RATING)?;
        let duration = self.optional_text_column(COL_DURATION)?;
        let listed_in = self.text_column(COL_LISTED_IN)?;

        let owned = |ca: &StringChunked, i: usize| ca.get(i).map(str::to_string);

        Ok((0..self.len())
            .map(|i| Record {
                content_type: content_type.get(i).map(ContentType::parse),
                title: title.and_then(|ca| owned(ca, i)),
                director: owned(director, i),
                cast: owned(cast, i),
                country: owned(country, i),
                date_added: owned(date_added, i),
                release_year: release_year.get(i).unwrap_or_default(),
                rating: owned(rating, i),
                duration: duration.and_then(|ca| owned(ca, i)),
                listed_in: owned(listed_in, i),
            })
            .collect())
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Column names in file order.
    pub fn field_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.column(name).is_ok()
    }

    /// Borrow a text column.
    pub fn text_column(&self, name: &str) -> PolarsResult<&StringChunked> {
        self.df.column(name)?.as_materialized_series().str()
    }

    fn optional_text_column(&self, name: &str) -> PolarsResult<Option<&StringChunked>> {
        if self.has_column(name) {
            self.text_column(name).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn release_years(&self) -> PolarsResult<&Int32Chunked> {
        self.df
            .column(COL_RELEASE_YEAR)?
            .as_materialized_series()
            .i32()
    }

    /// Null count for every column, in file order.
    pub fn null_counts(&self) -> Vec<(String, usize)> {
        self.df
            .get_columns()
            .iter()
            .map(|col| (col.name().to_string(), col.null_count()))
            .collect()
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub(crate) fn replace_frame(&mut self, df: DataFrame) {
        self.df = df;
    }

    /// First `n` rows for console previews.
    pub fn head(&self, n: usize) -> DataFrame {
        self.df.head(Some(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record {
                content_type: Some(ContentType::Movie),
                title: Some("First".to_string()),
                country: Some("US, UK".to_string()),
                release_year: 2015,
                listed_in: Some("Drama".to_string()),
                ..Default::default()
            },
            Record {
                content_type: Some(ContentType::TvShow),
                rating: Some("TV-MA".to_string()),
                release_year: 2005,
                ..Default::default()
            },
        ]
    }

    #[test]
    fn content_type_labels() {
        assert_eq!(ContentType::parse("Movie"), ContentType::Movie);
        assert_eq!(ContentType::parse(" TV Show "), ContentType::TvShow);
        assert_eq!(
            ContentType::parse("Short"),
            ContentType::Other("Short".to_string())
        );
        assert_eq!(ContentType::TvShow.to_string(), "TV Show");
    }

    #[test]
    fn records_survive_the_frame() {
        let records = sample();
        let dataset = Dataset::from_records(&records).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records().unwrap(), records);
    }

    #[test]
    fn null_counts_cover_every_column() {
        let dataset = Dataset::from_records(&sample()).unwrap();
        let counts = dataset.null_counts();
        assert_eq!(counts.len(), dataset.field_names().len());
        let rating = counts.iter().find(|(name, _)| name == COL_RATING).unwrap();
        assert_eq!(rating.1, 1);
        let director = counts.iter().find(|(name, _)| name == COL_DIRECTOR).unwrap();
        assert_eq!(director.1, 2);
    }
}
