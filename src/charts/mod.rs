//! Charts module - Chart series and rendering

mod plotter;
mod renderer;

pub use plotter::{BarSeries, ChartData, ChartPlotter, PALETTE};
pub use renderer::{RenderError, StaticChartRenderer};
