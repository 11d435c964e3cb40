//! Data module - CSV loading, cleaning and export

mod cleaner;
mod export;
mod loader;
mod record;

pub use cleaner::{CleanerError, CleaningSummary, DataCleaner, FieldNulls};
pub use export::{ensure_dir, write_csv, write_text, ExportError};
pub use loader::{DataLoader, LoaderError};
pub use record::{
    ContentType, Dataset, Record, COL_CAST, COL_COUNTRY, COL_DATE_ADDED, COL_DIRECTOR,
    COL_DURATION, COL_LISTED_IN, COL_RATING, COL_RELEASE_YEAR, COL_TITLE, COL_TYPE,
    REQUIRED_COLUMNS,
};
