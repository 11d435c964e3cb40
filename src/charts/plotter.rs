//! Chart Plotter Module
//! Chart data, visual styles and color palettes for the catalog bar charts.

use crate::stats::{AggregateReport, FrequencyEntry};
use plotters::style::RGBColor;
use std::fmt;

/// Solid fills for the single-color styles.
pub const DODGER_BLUE: RGBColor = RGBColor(30, 144, 255);
pub const MEDIUM_SEA_GREEN: RGBColor = RGBColor(60, 179, 113);
pub const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
pub const TOMATO: RGBColor = RGBColor(255, 99, 71);
pub const GRID_GRAY: RGBColor = RGBColor(220, 220, 220);

/// Anchor colors for the dark-to-warm gradient used on genre charts.
pub const ROCKET: [RGBColor; 5] = [
    RGBColor(53, 25, 62),   // Deep purple
    RGBColor(112, 31, 87),  // Plum
    RGBColor(177, 32, 80),  // Crimson
    RGBColor(230, 81, 61),  // Red orange
    RGBColor(245, 159, 112), // Peach
];

/// Anchor colors for the blue-to-yellow gradient used on rating charts.
pub const VIRIDIS: [RGBColor; 5] = [
    RGBColor(68, 1, 84),    // Purple
    RGBColor(59, 82, 139),  // Blue
    RGBColor(33, 145, 140), // Teal
    RGBColor(94, 201, 98),  // Green
    RGBColor(253, 231, 37), // Yellow
];

/// Which table a chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Genres,
    Ratings,
}

impl ChartKind {
    pub fn file_stem(self) -> &'static str {
        match self {
            ChartKind::Genres => "genres",
            ChartKind::Ratings => "ratings",
        }
    }

    /// Label of the category axis.
    pub fn category_label(self) -> &'static str {
        match self {
            ChartKind::Genres => "Genre",
            ChartKind::Ratings => "Rating",
        }
    }

    pub fn canvas_size(self) -> (u32, u32) {
        match self {
            ChartKind::Genres => (1200, 600),
            ChartKind::Ratings => (1000, 600),
        }
    }

    fn gradient(self) -> &'static [RGBColor] {
        match self {
            ChartKind::Genres => &ROCKET,
            ChartKind::Ratings => &VIRIDIS,
        }
    }
}

/// Visual treatment of a bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartStyle {
    /// Gradient palette, one color per bar.
    Stylized,
    /// Single solid color.
    Basic,
    /// Solid color with outlines, count labels and a value grid.
    Annotated,
}

impl ChartStyle {
    pub const ALL: [ChartStyle; 3] =
        [ChartStyle::Stylized, ChartStyle::Basic, ChartStyle::Annotated];

    pub fn name(self) -> &'static str {
        match self {
            ChartStyle::Stylized => "Stylized",
            ChartStyle::Basic => "Basic",
            ChartStyle::Annotated => "Annotated",
        }
    }

    pub fn file_suffix(self) -> &'static str {
        match self {
            ChartStyle::Stylized => "stylized",
            ChartStyle::Basic => "basic",
            ChartStyle::Annotated => "annotated",
        }
    }
}

impl fmt::Display for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bar direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Chart data for a single frequency table
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub kind: ChartKind,
    pub entries: Vec<FrequencyEntry>,
}

impl ChartData {
    pub fn new(kind: ChartKind, entries: Vec<FrequencyEntry>) -> Self {
        Self { kind, entries }
    }

    pub fn genres(report: &AggregateReport) -> Self {
        Self::new(ChartKind::Genres, report.genre_chart.clone())
    }

    pub fn ratings(report: &AggregateReport) -> Self {
        Self::new(ChartKind::Ratings, report.rating_chart.clone())
    }

    pub fn max_count(&self) -> usize {
        self.entries.iter().map(|e| e.count).max().unwrap_or(0)
    }

    pub fn title(&self, style: ChartStyle) -> String {
        match self.kind {
            ChartKind::Genres => {
                format!("Top {} Genres on Netflix ({})", self.entries.len(), style)
            }
            ChartKind::Ratings => format!("Content Ratings Distribution ({})", style),
        }
    }

    /// Output file name, e.g. `genres_annotated.png`.
    pub fn file_name(&self, style: ChartStyle) -> String {
        format!("{}_{}.png", self.kind.file_stem(), style.file_suffix())
    }

    /// Genre charts are always horizontal; the stylized rating chart is
    /// horizontal while the other rating styles stand upright.
    pub fn orientation(&self, style: ChartStyle) -> Orientation {
        match (self.kind, style) {
            (ChartKind::Genres, _) => Orientation::Horizontal,
            (ChartKind::Ratings, ChartStyle::Stylized) => Orientation::Horizontal,
            (ChartKind::Ratings, _) => Orientation::Vertical,
        }
    }

    /// Fill color of bar `index` (0 = most frequent).
    pub fn bar_color(&self, style: ChartStyle, index: usize) -> RGBColor {
        match (style, self.kind) {
            (ChartStyle::Stylized, kind) => {
                let t = if self.entries.len() > 1 {
                    index as f64 / (self.entries.len() - 1) as f64
                } else {
                    0.0
                };
                gradient(kind.gradient(), t)
            }
            (ChartStyle::Basic, ChartKind::Genres) => DODGER_BLUE,
            (ChartStyle::Basic, ChartKind::Ratings) => SKY_BLUE,
            (ChartStyle::Annotated, ChartKind::Genres) => MEDIUM_SEA_GREEN,
            (ChartStyle::Annotated, ChartKind::Ratings) => TOMATO,
        }
    }
}

/// Linear interpolation across evenly spaced anchors, `t` in [0, 1].
pub fn gradient(anchors: &[RGBColor], t: f64) -> RGBColor {
    match anchors.len() {
        0 => RGBColor(0, 0, 0),
        1 => anchors[0],
        n => {
            let scaled = t.clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = (scaled.floor() as usize).min(n - 2);
            let frac = scaled - lower as f64;
            let (a, b) = (anchors[lower], anchors[lower + 1]);
            let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
            RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
        }
    }
}
