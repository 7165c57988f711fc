//! Static Chart Renderer
//! Renders dashboard charts to PNG with plotters.
//!
//! Layout:
//! 1. Title centered on top
//! 2. Grouped bars, one color per series, category labels under each slot
//! 3. Legend in the upper right when there is more than one series

use crate::charts::{ChartData, ChartPlotter};
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Invalid image size {0}x{1}")]
    Size(u32, u32),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render a chart to PNG bytes.
    pub fn render_png(chart: &ChartData, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::Size(width, height));
        }

        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;
            Self::draw_chart(&root, chart)?;
            root.present().map_err(draw_err)?;
        }

        let img = RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Size(width, height))?;
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }

    /// Upper bound of the value axis with headroom for the tallest bar.
    pub fn y_upper(chart: &ChartData) -> f64 {
        let max = chart.max_value();
        if max <= 0.0 {
            1.0
        } else {
            (max * 1.1).ceil()
        }
    }

    fn draw_chart<DB: DrawingBackend>(
        root: &DrawingArea<DB, plotters::coord::Shift>,
        chart: &ChartData,
    ) -> Result<(), RenderError> {
        let slots = chart.categories.len().max(1);
        let series_count = chart.series.len();
        let bar_width = ChartPlotter::bar_width(series_count);

        let mut ctx = ChartBuilder::on(root)
            .caption(&chart.title, ("sans-serif", 24).into_font())
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(slots as f64 - 0.5), 0f64..Self::y_upper(chart))
            .map_err(draw_err)?;

        let categories = &chart.categories;
        let label_for = |x: &f64| -> String {
            if *x < 0.0 || (x - x.round()).abs() > 1e-6 {
                return String::new();
            }
            categories.get(x.round() as usize).cloned().unwrap_or_default()
        };

        ctx.configure_mesh()
            .disable_x_mesh()
            .x_labels(slots)
            .x_label_formatter(&label_for)
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .draw()
            .map_err(draw_err)?;

        for (series_idx, series) in chart.series.iter().enumerate() {
            let (r, g, b) = ChartPlotter::series_rgb(series_idx);
            let color = RGBColor(r, g, b);
            let offset = ChartPlotter::bar_offset(series_idx, series_count);
            let half = bar_width * 0.95 / 2.0;

            ctx.draw_series(series.values.iter().enumerate().map(|(i, &value)| {
                let center = i as f64 + offset;
                Rectangle::new([(center - half, 0.0), (center + half, value)], color.filled())
            }))
            .map_err(draw_err)?
            .label(series.name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        if series_count > 1 {
            ctx.configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(draw_err)?;
        }

        Ok(())
    }
}
