//! Static Chart Renderer
//! Draws the catalog frequency tables as PNG bar charts with plotters.
//!
//! Layout:
//! 1. Title centered above the plot: "{table} ({style})"
//! 2. Category axis with one tick per label, most frequent first
//! 3. Value axis "Number of Titles"
//! 4. Annotated style only: bar outlines, count labels, light value grid

use crate::charts::plotter::{ChartData, ChartStyle, Orientation, GRID_GRAY};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

const VALUE_LABEL: &str = "Number of Titles";
const BAR_HALF_WIDTH: f64 = 0.35;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Nothing to plot for {0}")]
    NoData(String),
    #[error("Chart rendering failed for {path}: {message}")]
    Render { path: String, message: String },
}

type DrawResult = Result<(), Box<dyn Error>>;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render one chart to `path` (PNG).
    pub fn render_to_file(
        data: &ChartData,
        style: ChartStyle,
        path: &Path,
    ) -> Result<(), ChartError> {
        if data.entries.is_empty() {
            return Err(ChartError::NoData(data.title(style)));
        }

        Self::draw(data, style, path).map_err(|e| ChartError::Render {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        debug!(path = %path.display(), style = %style, "chart rendered");
        Ok(())
    }

    /// Render all three styles into `dir`; returns the written paths.
    pub fn render_all(data: &ChartData, dir: &Path) -> Result<Vec<PathBuf>, ChartError> {
        ChartStyle::ALL
            .iter()
            .map(|&style| {
                let path = dir.join(data.file_name(style));
                Self::render_to_file(data, style, &path).map(|_| path)
            })
            .collect()
    }

    fn draw(data: &ChartData, style: ChartStyle, path: &Path) -> DrawResult {
        let root = BitMapBackend::new(path, data.kind.canvas_size()).into_drawing_area();
        root.fill(&WHITE)?;

        match data.orientation(style) {
            Orientation::Horizontal => Self::draw_horizontal(&root, data, style)?,
            Orientation::Vertical => Self::draw_vertical(&root, data, style)?,
        }

        root.present()?;
        Ok(())
    }

    /// Headroom past the longest bar for count labels.
    fn value_axis_max(data: &ChartData, style: ChartStyle) -> f64 {
        let max = data.max_count().max(1) as f64;
        match style {
            ChartStyle::Annotated => max * 1.12,
            _ => max * 1.05,
        }
    }

    /// Label for the category tick nearest `pos`, where slot 0 holds `labels[0]`.
    fn category_label(labels: &[String], pos: f64, reversed: bool) -> String {
        let slot = pos.round();
        if (pos - slot).abs() > 0.01 || slot < 0.0 || slot as usize >= labels.len() {
            return String::new();
        }
        let slot = slot as usize;
        let idx = if reversed { labels.len() - 1 - slot } else { slot };
        labels[idx].clone()
    }

    fn draw_horizontal(
        root: &DrawingArea<BitMapBackend, Shift>,
        data: &ChartData,
        style: ChartStyle,
    ) -> DrawResult {
        let n = data.entries.len();
        let labels: Vec<String> = data.entries.iter().map(|e| e.label.clone()).collect();
        let longest = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u32;
        let x_max = Self::value_axis_max(data, style);

        let mut chart = ChartBuilder::on(root)
            .caption(data.title(style), ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(40 + longest * 8)
            .build_cartesian_2d(0f64..x_max, -0.5f64..(n as f64 - 0.5))?;

        // slot n-1 is the top of the plot and holds the most frequent label
        let y_formatter = |y: &f64| Self::category_label(&labels, *y, true);
        let x_formatter = |x: &f64| format!("{:.0}", x);

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(VALUE_LABEL)
            .y_desc(data.kind.category_label())
            .y_labels(n)
            .y_label_formatter(&y_formatter)
            .x_label_formatter(&x_formatter)
            .label_style(("sans-serif", 15))
            .disable_y_mesh();
        if style == ChartStyle::Annotated {
            mesh.light_line_style(GRID_GRAY).bold_line_style(GRID_GRAY);
        } else {
            mesh.disable_x_mesh();
        }
        mesh.draw()?;

        for (i, entry) in data.entries.iter().enumerate() {
            let y = (n - 1 - i) as f64;
            let count = entry.count as f64;
            let color = data.bar_color(style, i);
            chart.draw_series(std::iter::once(Rectangle::new(
                [(0.0, y - BAR_HALF_WIDTH), (count, y + BAR_HALF_WIDTH)],
                color.filled(),
            )))?;

            if style == ChartStyle::Annotated {
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(0.0, y - BAR_HALF_WIDTH), (count, y + BAR_HALF_WIDTH)],
                    BLACK.stroke_width(1),
                )))?;
                chart.draw_series(std::iter::once(Text::new(
                    entry.count.to_string(),
                    (count + x_max * 0.01, y + 0.15),
                    ("sans-serif", 15).into_font(),
                )))?;
            }
        }

        Ok(())
    }

    fn draw_vertical(
        root: &DrawingArea<BitMapBackend, Shift>,
        data: &ChartData,
        style: ChartStyle,
    ) -> DrawResult {
        let n = data.entries.len();
        let labels: Vec<String> = data.entries.iter().map(|e| e.label.clone()).collect();
        let y_max = Self::value_axis_max(data, style);

        let mut chart = ChartBuilder::on(root)
            .caption(data.title(style), ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)?;

        let x_formatter = |x: &f64| Self::category_label(&labels, *x, false);
        let y_formatter = |y: &f64| format!("{:.0}", y);

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(data.kind.category_label())
            .y_desc(VALUE_LABEL)
            .x_labels(n)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .label_style(("sans-serif", 15))
            .disable_x_mesh();
        if style == ChartStyle::Basic {
            mesh.disable_y_mesh();
        } else {
            mesh.light_line_style(GRID_GRAY).bold_line_style(GRID_GRAY);
        }
        mesh.draw()?;

        for (i, entry) in data.entries.iter().enumerate() {
            let x = i as f64;
            let count = entry.count as f64;
            let color = data.bar_color(style, i);
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, count)],
                color.filled(),
            )))?;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, count)],
                BLACK.stroke_width(1),
            )))?;

            if style == ChartStyle::Annotated {
                chart.draw_series(std::iter::once(Text::new(
                    entry.count.to_string(),
                    (x - 0.1, count + y_max * 0.04),
                    ("sans-serif", 15).into_font(),
                )))?;
            }
        }

        Ok(())
    }
}
