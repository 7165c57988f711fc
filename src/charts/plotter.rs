//! Chart Plotter Module
//! Builds bar-chart series from the report tables and draws them with egui_plot.

use crate::stats::{AgeGroup, DemographicRow, FamilyRow, SurnameCount, TitanicReport};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Plot};
use std::collections::BTreeSet;

/// Series colors (RGB) shared with the static renderer.
pub const PALETTE: [(u8, u8, u8); 6] = [
    (52, 152, 219), // Blue
    (231, 76, 60),  // Red
    (46, 204, 113), // Green
    (155, 89, 182), // Purple
    (243, 156, 18), // Orange
    (26, 188, 156), // Teal
];

/// Fraction of a category slot covered by its bars.
pub const GROUP_WIDTH: f64 = 0.8;

/// One bar series (one color), with a value per category.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// Grouped bar chart ready for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    /// File-name friendly identifier
    pub id: String,
    pub title: String,
    /// Question the chart answers
    pub question: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
}

impl ChartData {
    /// Teen survival rate by class, one series per sex.
    pub fn teen_survival(rows: &[DemographicRow]) -> Self {
        let teens: Vec<&DemographicRow> = rows
            .iter()
            .filter(|r| r.age_group == AgeGroup::Teen)
            .collect();

        let classes: BTreeSet<u8> = teens.iter().map(|r| r.pclass).collect();
        let sexes: BTreeSet<&str> = teens.iter().map(|r| r.sex.as_str()).collect();

        let series = sexes
            .iter()
            .map(|sex| BarSeries {
                name: sex.to_string(),
                values: classes
                    .iter()
                    .map(|class| {
                        teens
                            .iter()
                            .find(|r| r.pclass == *class && r.sex == *sex)
                            .map(|r| r.survival_rate)
                            .unwrap_or(0.0)
                    })
                    .collect(),
            })
            .collect();

        Self {
            id: "teen_survival".to_string(),
            title: "Survival Rate for Teens by Passenger Class and Sex".to_string(),
            question: "What is the survival rate for teens in all passenger classes?".to_string(),
            x_label: "Passenger Class".to_string(),
            y_label: "Survival Rate (%)".to_string(),
            categories: classes.iter().map(|c| c.to_string()).collect(),
            series,
        }
    }

    /// Most common surnames and their head counts. The title names the
    /// requested `top_n`, even when fewer surnames exist.
    pub fn top_families(counts: &[SurnameCount], top_n: usize) -> Self {
        let counts = &counts[..top_n.min(counts.len())];
        Self {
            id: "top_families".to_string(),
            title: format!("Top {} Most Common Families on the Titanic", top_n),
            question: "Which are the most common families (last names) on the Titanic, \
                       and what are their family sizes?"
                .to_string(),
            x_label: "Family (Last Name)".to_string(),
            y_label: "Number of Family Members".to_string(),
            categories: counts.iter().map(|c| c.surname.clone()).collect(),
            series: vec![BarSeries {
                name: "Passengers".to_string(),
                values: counts.iter().map(|c| c.count as f64).collect(),
            }],
        }
    }

    /// Average fare by family size, one series per class.
    pub fn fare_by_family_size(rows: &[FamilyRow]) -> Self {
        let sizes: BTreeSet<u32> = rows.iter().map(|r| r.family_size).collect();
        let classes: BTreeSet<u8> = rows.iter().map(|r| r.pclass).collect();

        let series = classes
            .iter()
            .map(|class| BarSeries {
                name: format!("Class {}", class),
                values: sizes
                    .iter()
                    .map(|size| {
                        rows.iter()
                            .find(|r| r.pclass == *class && r.family_size == *size)
                            .and_then(|r| r.avg_fare)
                            .unwrap_or(0.0)
                    })
                    .collect(),
            })
            .collect();

        Self {
            id: "fare_by_family_size".to_string(),
            title: "Average Fare by Family Size and Class".to_string(),
            question: "How does the fare paid change with family size in each class?"
                .to_string(),
            x_label: "Family Size".to_string(),
            y_label: "Average Fare".to_string(),
            categories: sizes.iter().map(|s| s.to_string()).collect(),
            series,
        }
    }

    /// The three dashboard charts in display order.
    pub fn dashboard(report: &TitanicReport, top_n: usize) -> Vec<ChartData> {
        vec![
            Self::teen_survival(&report.demographics),
            Self::top_families(report.top_surnames(top_n), top_n),
            Self::fare_by_family_size(&report.family_groups),
        ]
    }

    /// Largest finite value across all series, 0.0 if there is none.
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() || self.series.is_empty()
    }
}

/// Draws bar charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Palette entry for a series index.
    pub fn series_rgb(series_index: usize) -> (u8, u8, u8) {
        PALETTE[series_index % PALETTE.len()]
    }

    pub fn series_color(series_index: usize) -> Color32 {
        let (r, g, b) = Self::series_rgb(series_index);
        Color32::from_rgb(r, g, b)
    }

    /// Center offset of a series bar within its category slot.
    pub fn bar_offset(series_index: usize, series_count: usize) -> f64 {
        let width = Self::bar_width(series_count);
        -GROUP_WIDTH / 2.0 + width * (series_index as f64 + 0.5)
    }

    pub fn bar_width(series_count: usize) -> f64 {
        GROUP_WIDTH / series_count.max(1) as f64
    }

    /// Draw a grouped bar chart. X-axis: categories, Y-axis: values.
    pub fn draw_bar_chart(ui: &mut egui::Ui, chart: &ChartData, height: f32) {
        if chart.is_empty() {
            ui.label(RichText::new("No data").color(Color32::GRAY));
            return;
        }

        let series_count = chart.series.len();
        let bar_width = Self::bar_width(series_count);
        let labels = chart.categories.clone();

        Plot::new(format!("bars_{}", chart.id))
            .height(height)
            .legend(Legend::default())
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_y(0.0)
            .include_y(chart.max_value() * 1.1)
            .x_axis_label(chart.x_label.clone())
            .y_axis_label(chart.y_label.clone())
            .x_axis_formatter(move |mark, _range| {
                let value = mark.value;
                if value < 0.0 || (value - value.round()).abs() > 1e-6 {
                    return String::new();
                }
                labels.get(value.round() as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for (series_idx, series) in chart.series.iter().enumerate() {
                    let color = Self::series_color(series_idx);
                    let offset = Self::bar_offset(series_idx, series_count);

                    let bars: Vec<Bar> = series
                        .values
                        .iter()
                        .enumerate()
                        .map(|(i, &value)| {
                            let category = chart.categories.get(i).map(String::as_str).unwrap_or("");
                            Bar::new(i as f64 + offset, value)
                                .width(bar_width * 0.95)
                                .name(format!("{} {}", series.name, category))
                        })
                        .collect();

                    plot_ui.bar_chart(BarChart::new(bars).color(color).name(&series.name));
                }
            });
    }

    /// Draw the demographic table for one age group.
    pub fn draw_demographics_table(ui: &mut egui::Ui, id: &str, rows: &[&DemographicRow]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("demographics_{}", id)))
                    .striped(true)
                    .min_col_width(55.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["Class", "Sex", "Age Group", "N", "Survivors", "Rate (%)"] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for row in rows {
                            ui.label(RichText::new(row.pclass.to_string()).size(11.0));
                            ui.label(RichText::new(&row.sex).size(11.0));
                            ui.label(RichText::new(row.age_group.label()).size(11.0));
                            ui.label(RichText::new(row.n_passengers.to_string()).size(11.0));
                            ui.label(RichText::new(row.n_survivors.to_string()).size(11.0));
                            ui.label(RichText::new(format!("{:.2}", row.survival_rate)).size(11.0));
                            ui.end_row();
                        }
                    });
            });
    }
}
