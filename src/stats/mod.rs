//! Stats module - Descriptive catalog statistics

mod calculator;
mod frequency;

pub use calculator::{
    percent, AggregateReport, Distribution, Overview, RatingBreakdown, StatsCalculator,
    StatsError, TypeBreakdown, YearTrend,
};
pub use frequency::{
    multi_value_counts, split_multi_value, top_n, value_counts, FrequencyCounter, FrequencyEntry,
};
