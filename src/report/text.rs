//! Text Report Module
//! Formats an `AggregateReport` as the plain-text exploration report.
//!
//! Layout (sections always appear in this order):
//! 1. DATASET OVERVIEW
//! 2. CONTENT TYPE BREAKDOWN
//! 3. RELEASE YEAR TRENDS
//! 4. AGE RATINGS ANALYSIS
//! 5. GEOGRAPHIC DISTRIBUTION
//! 6. GENRE DISTRIBUTION

use crate::data::ContentType;
use crate::stats::{percent, AggregateReport, FrequencyEntry};
use std::fmt::Write;

pub const RULE_WIDTH: usize = 50;

pub const SECTION_HEADERS: [&str; 6] = [
    "1. DATASET OVERVIEW",
    "2. CONTENT TYPE BREAKDOWN",
    "3. RELEASE YEAR TRENDS",
    "4. AGE RATINGS ANALYSIS",
    "5. GEOGRAPHIC DISTRIBUTION",
    "6. GENRE DISTRIBUTION",
];

/// Three-line banner: rule, centered title, rule.
pub fn banner(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule}\n{title:^width$}\n{rule}", width = RULE_WIDTH)
}

/// Thousands separators for counts ("8,807").
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Two-column table, labels left aligned to the widest one.
pub fn format_table(heading: &str, entries: &[FrequencyEntry]) -> String {
    let width = entries
        .iter()
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(0)
        .max(heading.len());

    let mut out = format!("{heading:<width$}  count");
    for entry in entries {
        let _ = write!(out, "\n{:<width$}  {}", entry.label, entry.count);
    }
    out
}

/// Builds the report text.
pub struct ReportWriter;

impl ReportWriter {
    /// Render every section; `generated_at` is stamped into the title line.
    pub fn render(report: &AggregateReport, generated_at: &str) -> String {
        let mut lines: Vec<String> = Vec::new();
        lines.push(format!("Netflix Content Analysis Report ({generated_at})"));
        lines.push(format!("{}\n", "=".repeat(RULE_WIDTH)));

        Self::overview(report, &mut lines);
        Self::content_types(report, &mut lines);
        Self::release_years(report, &mut lines);
        Self::ratings(report, &mut lines);
        Self::geography(report, &mut lines);
        Self::genres(report, &mut lines);

        lines.join("\n")
    }

    fn section(lines: &mut Vec<String>, index: usize) {
        lines.push(SECTION_HEADERS[index].to_string());
        lines.push("-".repeat(RULE_WIDTH));
    }

    fn overview(report: &AggregateReport, lines: &mut Vec<String>) {
        Self::section(lines, 0);
        let overview = &report.overview;
        lines.push(format!(
            "Total titles analyzed: {}",
            group_thousands(overview.total_records)
        ));
        lines.push(format!(
            "Data columns available: [{}]",
            overview
                .field_names
                .iter()
                .map(|name| format!("'{name}'"))
                .collect::<Vec<_>>()
                .join(", ")
        ));
        lines.push(
            "\nThis dataset contains information about Netflix movies and TV shows, including:"
                .to_string(),
        );
        lines.push("- Title, director, and cast members".to_string());
        lines.push("- Country of origin and content categories".to_string());
        lines.push("- Release year and when added to Netflix".to_string());
        lines.push("- Duration and age rating\n".to_string());
    }

    fn content_types(report: &AggregateReport, lines: &mut Vec<String>) {
        Self::section(lines, 1);
        let types = &report.types;
        lines.push(format!(
            "Movies: {} ({:.1}%)",
            group_thousands(types.movies),
            types.percent(&ContentType::Movie)
        ));
        lines.push(format!(
            "TV Shows: {} ({:.1}%)",
            group_thousands(types.tv_shows),
            types.percent(&ContentType::TvShow)
        ));

        let other = types.total - types.movies - types.tv_shows;
        if other > 0 {
            lines.push(format!(
                "Other or missing type: {} ({:.1}%)",
                group_thousands(other),
                percent(other, types.total)
            ));
        }

        match types.movie_to_show_ratio() {
            Some(ratio) => {
                lines.push(format!("\nFor every TV show, there are {ratio:.1} movies"));
                let lean = if types.movies >= types.tv_shows {
                    "more heavily toward movies than TV shows"
                } else {
                    "more heavily toward TV shows than movies"
                };
                lines.push(format!("\nThis shows Netflix's catalog leans {lean}.\n"));
            }
            None => {
                lines.push(
                    "\nMovie to TV show ratio: undefined (the catalog has no TV shows)\n"
                        .to_string(),
                );
            }
        }
    }

    fn release_years(report: &AggregateReport, lines: &mut Vec<String>) {
        Self::section(lines, 2);
        let years = &report.years;
        lines.push(format!(
            "Content released in {} or later: {} ({:.1}%)",
            years.threshold,
            group_thousands(years.recent),
            years.recent_percent()
        ));
        lines.push(format!(
            "Content released before {}: {} ({:.1}%)",
            years.threshold,
            group_thousands(years.older),
            years.older_percent()
        ));
        lines.push(format!("\nNewest content: {}", years.max_year));
        lines.push(format!("Oldest content: {}", years.min_year));
        lines.push(
            "\nThis indicates Netflix offers a mix of recent and classic content.\n".to_string(),
        );
    }

    fn ratings(report: &AggregateReport, lines: &mut Vec<String>) {
        Self::section(lines, 3);
        let ratings = &report.ratings;
        lines.push("Most common content ratings:".to_string());
        lines.push(format_table("rating", &ratings.top));

        lines.push("\nContent Categories:".to_string());
        lines.push(format!(
            "- Adult-oriented: {} titles ({:.1}%)",
            group_thousands(ratings.mature),
            ratings.mature_percent()
        ));
        lines.push(format!(
            "- Family-friendly: {} titles ({:.1}%)",
            group_thousands(ratings.family),
            ratings.family_percent()
        ));
        lines.push(format!(
            "- General audience: {} titles ({:.1}%)",
            group_thousands(ratings.general),
            ratings.general_percent()
        ));
        if ratings.unclassified > 0 {
            lines.push(format!(
                "  ({} titles carry a rating outside these categories)",
                group_thousands(ratings.unclassified)
            ));
        }
        lines.push(
            "\nThis breakdown helps understand the target audience for Netflix's content.\n"
                .to_string(),
        );
    }

    fn geography(report: &AggregateReport, lines: &mut Vec<String>) {
        Self::section(lines, 4);
        lines.push(format!(
            "Top {} countries producing content:",
            report.countries.top.len()
        ));
        lines.push(format_table("country", &report.countries.top));
        lines.push("\nThis shows where Netflix sources most of its content from.\n".to_string());
    }

    fn genres(report: &AggregateReport, lines: &mut Vec<String>) {
        Self::section(lines, 5);
        lines.push(format!(
            "Top {} most common genres/categories:",
            report.genres.top.len()
        ));
        lines.push(format_table("listed_in", &report.genres.top));
        lines.push("\nThis reveals the most popular types of content on Netflix.\n".to_string());
    }
}
