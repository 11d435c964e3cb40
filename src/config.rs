//! Analysis Configuration Module
//! Sentinels, rating categories, thresholds and output names used by the pipeline.

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Replacement strings for the five imputed columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Sentinels {
    pub director: String,
    pub cast: String,
    pub country: String,
    pub date_added: String,
    pub rating: String,
}

impl Default for Sentinels {
    fn default() -> Self {
        Self {
            director: "Unknown".to_string(),
            cast: "Unknown".to_string(),
            country: "Unknown".to_string(),
            date_added: "Not Available".to_string(),
            rating: "Not Rated".to_string(),
        }
    }
}

impl Sentinels {
    /// (column, sentinel) pairs in report order.
    pub fn columns(&self) -> [(&'static str, &str); 5] {
        [
            ("director", self.director.as_str()),
            ("cast", self.cast.as_str()),
            ("country", self.country.as_str()),
            ("date_added", self.date_added.as_str()),
            ("rating", self.rating.as_str()),
        ]
    }
}

/// Audience buckets for age ratings. A rating listed in none of them is
/// left out of every category count.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RatingCategories {
    pub mature: Vec<String>,
    pub family: Vec<String>,
    pub general: Vec<String>,
}

impl Default for RatingCategories {
    fn default() -> Self {
        fn owned(labels: &[&str]) -> Vec<String> {
            labels.iter().map(|s| s.to_string()).collect()
        }

        Self {
            mature: owned(&["TV-MA", "R", "NC-17", "NR", "UR"]),
            family: owned(&["G", "PG", "TV-Y", "TV-Y7", "TV-G", "TV-PG"]),
            general: owned(&["PG-13", "TV-14"]),
        }
    }
}

/// File names written into the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputNames {
    /// Looked up inside the input path when it is a directory.
    pub input_file: String,
    pub raw_copy: String,
    pub cleaned_copy: String,
    pub report: String,
    pub visualizations_dir: String,
}

impl Default for OutputNames {
    fn default() -> Self {
        Self {
            input_file: "netflix_data.csv".to_string(),
            raw_copy: "Netflix_shows_movies.csv".to_string(),
            cleaned_copy: "Netflix_shows_movies_CLEANED.csv".to_string(),
            report: "Netflix_exploration_report.txt".to_string(),
            visualizations_dir: "visualizations".to_string(),
        }
    }
}

/// Everything the pipeline treats as tunable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub sentinels: Sentinels,
    pub rating_categories: RatingCategories,
    /// Titles released in or after this year count as recent.
    pub recent_year_threshold: i32,
    pub report_top_n: usize,
    pub genre_chart_top_n: usize,
    pub rating_chart_top_n: usize,
    pub outputs: OutputNames,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sentinels: Sentinels::default(),
            rating_categories: RatingCategories::default(),
            recent_year_threshold: 2010,
            report_top_n: 10,
            genre_chart_top_n: 10,
            rating_chart_top_n: 8,
            outputs: OutputNames::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load a JSON config file. Keys left out keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}
