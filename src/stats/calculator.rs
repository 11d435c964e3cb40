//! Statistics Calculator Module
//! Computes the six descriptive statistic groups of the catalog report.

use crate::config::{AnalysisConfig, RatingCategories};
use crate::data::{ContentType, Dataset, COL_COUNTRY, COL_LISTED_IN, COL_RATING, COL_TYPE};
use crate::stats::frequency::{multi_value_counts, top_n, value_counts, FrequencyEntry};
use polars::prelude::*;
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Dataset is empty; percentages are undefined")]
    EmptyDataset,
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Share of `count` in `total`, as a percentage. Zero when `total` is zero.
pub fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}

/// Size and shape of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub total_records: usize,
    pub field_names: Vec<String>,
}

/// Counts per content type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeBreakdown {
    pub total: usize,
    pub movies: usize,
    pub tv_shows: usize,
    /// Every non-null type label, ranked.
    pub values: Vec<FrequencyEntry>,
}

impl TypeBreakdown {
    pub fn count(&self, kind: &ContentType) -> usize {
        match kind {
            ContentType::Movie => self.movies,
            ContentType::TvShow => self.tv_shows,
            ContentType::Other(label) => self
                .values
                .iter()
                .find(|e| &e.label == label)
                .map(|e| e.count)
                .unwrap_or(0),
        }
    }

    pub fn percent(&self, kind: &ContentType) -> f64 {
        percent(self.count(kind), self.total)
    }

    /// Movies per TV show; `None` when there are no TV shows.
    pub fn movie_to_show_ratio(&self) -> Option<f64> {
        if self.tv_shows == 0 {
            None
        } else {
            Some(self.movies as f64 / self.tv_shows as f64)
        }
    }
}

/// Recent vs older titles around a threshold year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearTrend {
    pub threshold: i32,
    pub total: usize,
    /// release_year >= threshold
    pub recent: usize,
    pub older: usize,
    pub min_year: i32,
    pub max_year: i32,
}

impl YearTrend {
    pub fn recent_percent(&self) -> f64 {
        percent(self.recent, self.total)
    }

    pub fn older_percent(&self) -> f64 {
        percent(self.older, self.total)
    }
}

/// Rating frequencies and audience category counts.
///
/// A rating outside all three categories is counted in `unclassified` only,
/// so the three category percentages need not sum to 100.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingBreakdown {
    pub total: usize,
    pub top: Vec<FrequencyEntry>,
    pub mature: usize,
    pub family: usize,
    pub general: usize,
    pub unclassified: usize,
}

impl RatingBreakdown {
    pub fn mature_percent(&self) -> f64 {
        percent(self.mature, self.total)
    }

    pub fn family_percent(&self) -> f64 {
        percent(self.family, self.total)
    }

    pub fn general_percent(&self) -> f64 {
        percent(self.general, self.total)
    }
}

/// Top labels of a comma separated multi-value column.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub top: Vec<FrequencyEntry>,
    pub distinct_labels: usize,
}

/// Everything the reporter and the chart renderer consume.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateReport {
    pub overview: Overview,
    pub types: TypeBreakdown,
    pub years: YearTrend,
    pub ratings: RatingBreakdown,
    pub countries: Distribution,
    pub genres: Distribution,
    /// Genre table sized for charts.
    pub genre_chart: Vec<FrequencyEntry>,
    /// Rating table sized for charts.
    pub rating_chart: Vec<FrequencyEntry>,
}

/// Pure statistic functions over a cleaned dataset.
pub struct StatsCalculator;

impl StatsCalculator {
    fn ensure_not_empty(dataset: &Dataset) -> Result<(), StatsError> {
        if dataset.is_empty() {
            Err(StatsError::EmptyDataset)
        } else {
            Ok(())
        }
    }

    pub fn overview(dataset: &Dataset) -> Result<Overview, StatsError> {
        Self::ensure_not_empty(dataset)?;
        Ok(Overview {
            total_records: dataset.len(),
            field_names: dataset.field_names(),
        })
    }

    pub fn type_breakdown(dataset: &Dataset) -> Result<TypeBreakdown, StatsError> {
        Self::ensure_not_empty(dataset)?;
        let column = dataset.text_column(COL_TYPE)?;

        let values = value_counts(column.into_iter().flatten());
        let count_of = |kind: ContentType| {
            values
                .iter()
                .filter(|e| ContentType::parse(&e.label) == kind)
                .map(|e| e.count)
                .sum::<usize>()
        };

        Ok(TypeBreakdown {
            total: dataset.len(),
            movies: count_of(ContentType::Movie),
            tv_shows: count_of(ContentType::TvShow),
            values,
        })
    }

    pub fn year_trend(dataset: &Dataset, threshold: i32) -> Result<YearTrend, StatsError> {
        Self::ensure_not_empty(dataset)?;
        let years = dataset.release_years()?;

        let mut recent = 0;
        let mut older = 0;
        let mut min_year = i32::MAX;
        let mut max_year = i32::MIN;
        for year in years.into_iter().flatten() {
            if year >= threshold {
                recent += 1;
            } else {
                older += 1;
            }
            min_year = min_year.min(year);
            max_year = max_year.max(year);
        }

        Ok(YearTrend {
            threshold,
            total: dataset.len(),
            recent,
            older,
            min_year,
            max_year,
        })
    }

    /// All ratings ranked by frequency; nulls are skipped.
    pub fn ranked_ratings(dataset: &Dataset) -> Result<Vec<FrequencyEntry>, StatsError> {
        Self::ensure_not_empty(dataset)?;
        let column = dataset.text_column(COL_RATING)?;
        Ok(value_counts(column.into_iter().flatten()))
    }

    /// Category counts and the top `top` ratings from a ranked rating table.
    fn rating_breakdown(
        total: usize,
        ranked: &[FrequencyEntry],
        categories: &RatingCategories,
        top: usize,
    ) -> RatingBreakdown {
        fn set(labels: &[String]) -> HashSet<&str> {
            labels.iter().map(String::as_str).collect()
        }
        let mature = set(&categories.mature);
        let family = set(&categories.family);
        let general = set(&categories.general);

        let mut breakdown = RatingBreakdown {
            total,
            top: top_n(ranked.to_vec(), top),
            mature: 0,
            family: 0,
            general: 0,
            unclassified: 0,
        };

        for entry in ranked {
            let label = entry.label.as_str();
            let mut classified = false;
            if mature.contains(label) {
                breakdown.mature += entry.count;
                classified = true;
            }
            if family.contains(label) {
                breakdown.family += entry.count;
                classified = true;
            }
            if general.contains(label) {
                breakdown.general += entry.count;
                classified = true;
            }
            if !classified {
                breakdown.unclassified += entry.count;
            }
        }

        breakdown
    }

    /// Ranked labels of a comma separated column, flattened across rows.
    pub fn ranked_multi_value(
        dataset: &Dataset,
        column: &str,
    ) -> Result<Vec<FrequencyEntry>, StatsError> {
        Self::ensure_not_empty(dataset)?;
        let values = dataset.text_column(column)?;
        Ok(multi_value_counts(values.into_iter().flatten()))
    }

    fn distribution(ranked: &[FrequencyEntry], top: usize) -> Distribution {
        Distribution {
            top: top_n(ranked.to_vec(), top),
            distinct_labels: ranked.len(),
        }
    }

    /// Compute every statistic group. The groups only read the dataset, so
    /// they run in parallel.
    pub fn compute_report(
        dataset: &Dataset,
        config: &AnalysisConfig,
    ) -> Result<AggregateReport, StatsError> {
        let overview = Self::overview(dataset)?;
        let total = overview.total_records;

        let ((types, years), (ratings, (countries, genres))) = rayon::join(
            || {
                rayon::join(
                    || Self::type_breakdown(dataset),
                    || Self::year_trend(dataset, config.recent_year_threshold),
                )
            },
            || {
                rayon::join(
                    || Self::ranked_ratings(dataset),
                    || {
                        rayon::join(
                            || Self::ranked_multi_value(dataset, COL_COUNTRY),
                            || Self::ranked_multi_value(dataset, COL_LISTED_IN),
                        )
                    },
                )
            },
        );

        let ranked_ratings = ratings?;
        let ranked_countries = countries?;
        let ranked_genres = genres?;

        let report = AggregateReport {
            overview,
            types: types?,
            years: years?,
            ratings: Self::rating_breakdown(
                total,
                &ranked_ratings,
                &config.rating_categories,
                config.report_top_n,
            ),
            countries: Self::distribution(&ranked_countries, config.report_top_n),
            genres: Self::distribution(&ranked_genres, config.report_top_n),
            genre_chart: top_n(ranked_genres, config.genre_chart_top_n),
            rating_chart: top_n(ranked_ratings, config.rating_chart_top_n),
        };

        debug!(
            records = total,
            countries = report.countries.distinct_labels,
            genres = report.genres.distinct_labels,
            "aggregation complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataCleaner, Record};

    fn record(kind: ContentType, year: i32) -> Record {
        Record {
            content_type: Some(kind),
            release_year: year,
            ..Default::default()
        }
    }

    fn cleaned(records: Vec<Record>) -> Dataset {
        let mut dataset = Dataset::from_records(&records).unwrap();
        DataCleaner::default().clean(&mut dataset).unwrap();
        dataset
    }

    fn two_title_catalog() -> Dataset {
        cleaned(vec![
            Record {
                country: Some("US, UK".to_string()),
                listed_in: Some("Drama".to_string()),
                ..record(ContentType::Movie, 2015)
            },
            Record {
                rating: Some("TV-MA".to_string()),
                country: Some("US".to_string()),
                listed_in: Some("Drama, Comedy".to_string()),
                ..record(ContentType::TvShow, 2005)
            },
        ])
    }

    #[test]
    fn two_title_catalog_report() {
        let dataset = two_title_catalog();
        assert_eq!(
            dataset.records().unwrap()[0].rating.as_deref(),
            Some("Not Rated")
        );

        let report = StatsCalculator::compute_report(&dataset, &AnalysisConfig::default()).unwrap();

        assert_eq!(report.overview.total_records, 2);
        assert_eq!(report.types.movies, 1);
        assert_eq!(report.types.tv_shows, 1);
        assert_eq!(format!("{:.1}", report.types.percent(&ContentType::Movie)), "50.0");
        assert_eq!(format!("{:.1}", report.types.percent(&ContentType::TvShow)), "50.0");
        assert_eq!(report.types.movie_to_show_ratio(), Some(1.0));

        assert_eq!(report.years.recent, 1);
        assert_eq!(report.years.older, 1);
        assert_eq!(report.years.min_year, 2005);
        assert_eq!(report.years.max_year, 2015);

        assert_eq!(
            report.countries.top,
            vec![FrequencyEntry::new("US", 2), FrequencyEntry::new("UK", 1)]
        );
        assert_eq!(
            report.genres.top,
            vec![FrequencyEntry::new("Drama", 2), FrequencyEntry::new("Comedy", 1)]
        );
        assert_eq!(report.genre_chart, report.genres.top);
    }

    #[test]
    fn no_tv_shows_leaves_ratio_undefined() {
        let dataset = cleaned(vec![
            record(ContentType::Movie, 2001),
            record(ContentType::Movie, 2002),
        ]);

        let types = StatsCalculator::type_breakdown(&dataset).unwrap();
        assert_eq!(types.movies, 2);
        assert_eq!(types.tv_shows, 0);
        assert_eq!(types.movie_to_show_ratio(), None);
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let dataset = Dataset::from_records(&[]).unwrap();
        let err =
            StatsCalculator::compute_report(&dataset, &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, StatsError::EmptyDataset));
        assert!(matches!(
            StatsCalculator::year_trend(&dataset, 2010),
            Err(StatsError::EmptyDataset)
        ));
    }

    #[test]
    fn known_types_never_exceed_total() {
        let dataset = cleaned(vec![
            record(ContentType::Movie, 2019),
            record(ContentType::Other("Short".to_string()), 2019),
            Record {
                release_year: 2019,
                ..Default::default()
            },
            record(ContentType::TvShow, 2019),
        ]);

        let types = StatsCalculator::type_breakdown(&dataset).unwrap();
        assert_eq!(types.movies + types.tv_shows, 2);
        assert!(types.movies + types.tv_shows <= types.total);
        assert_eq!(types.count(&ContentType::Other("Short".to_string())), 1);
    }

    #[test]
    fn year_buckets_cover_every_record() {
        let dataset = cleaned(
            [1942, 2009, 2010, 2021, 1999]
                .into_iter()
                .map(|y| record(ContentType::Movie, y))
                .collect(),
        );

        let trend = StatsCalculator::year_trend(&dataset, 2010).unwrap();
        assert_eq!(trend.recent + trend.older, dataset.len());
        assert_eq!(trend.recent, 2);
        assert_eq!(trend.min_year, 1942);
        assert_eq!(trend.max_year, 2021);
        assert_eq!(format!("{:.1}", trend.older_percent()), "60.0");
    }

    #[test]
    fn unlisted_ratings_fall_outside_every_category() {
        let ranked = vec![
            FrequencyEntry::new("TV-MA", 4),
            FrequencyEntry::new("TV-14", 3),
            FrequencyEntry::new("Not Rated", 2),
            FrequencyEntry::new("PG", 1),
        ];

        let breakdown =
            StatsCalculator::rating_breakdown(10, &ranked, &RatingCategories::default(), 10);
        assert_eq!(breakdown.mature, 4);
        assert_eq!(breakdown.general, 3);
        assert_eq!(breakdown.family, 1);
        assert_eq!(breakdown.unclassified, 2);
        let classified =
            breakdown.mature_percent() + breakdown.general_percent() + breakdown.family_percent();
        assert_eq!(format!("{:.1}", classified), "80.0");
    }

    #[test]
    fn zero_total_gives_zero_percentages() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(3, 0), 0.0);

        let ranked = vec![FrequencyEntry::new("TV-MA", 2)];
        let breakdown =
            StatsCalculator::rating_breakdown(0, &ranked, &RatingCategories::default(), 10);
        assert_eq!(breakdown.mature, 2);
        assert_eq!(breakdown.mature_percent(), 0.0);
        assert!(!breakdown.family_percent().is_nan());
    }

    #[test]
    fn rating_table_respects_top_sizes() {
        let ratings = [
            "TV-MA", "TV-14", "R", "PG", "G", "NR", "TV-Y", "TV-Y7", "TV-G", "PG-13", "UR", "NC-17",
        ];
        let records: Vec<Record> = ratings
            .iter()
            .enumerate()
            .flat_map(|(i, r)| {
                (0..(ratings.len() - i)).map(move |_| Record {
                    rating: Some(r.to_string()),
                    ..record(ContentType::Movie, 2020)
                })
            })
            .collect();
        let dataset = cleaned(records);

        let report = StatsCalculator::compute_report(&dataset, &AnalysisConfig::default()).unwrap();
        assert_eq!(report.ratings.top.len(), 10);
        assert_eq!(report.rating_chart.len(), 8);
        assert_eq!(report.ratings.top[0], FrequencyEntry::new("TV-MA", 12));
        assert_eq!(report.rating_chart[..], report.ratings.top[..8]);
        assert_eq!(report.ratings.unclassified, 0);
    }
}
