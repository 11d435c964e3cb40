//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::{gradient, ChartData, ChartKind, ChartStyle, Orientation};
pub use renderer::{ChartError, StaticChartRenderer};
