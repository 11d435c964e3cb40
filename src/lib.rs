//! Catalog Lens - Media Catalog Exploration & Reporting
//!
//! Loads a catalog CSV, imputes missing nominal fields, computes descriptive
//! statistics and writes a text report plus bar charts.

pub mod charts;
pub mod config;
pub mod data;
pub mod logging;
pub mod menu;
pub mod pipeline;
pub mod report;
pub mod stats;

pub use config::AnalysisConfig;
pub use pipeline::{ChartMode, Pipeline, RunOptions, RunSummary, Stage, StageError};
