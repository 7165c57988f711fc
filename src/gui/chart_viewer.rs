//! Chart Viewer Widget
//! Right side scrollable panel showing one card per dashboard chart.

use crate::charts::{ChartData, ChartPlotter};
use crate::stats::{AgeGroup, TitanicReport};
use egui::{Color32, RichText, ScrollArea};

const CARD_SPACING: f32 = 15.0;
const PLOT_HEIGHT: f32 = 320.0;

/// Scrollable list of chart cards.
#[derive(Default)]
pub struct ChartViewer {
    pub charts: Vec<ChartData>,
    pub report: Option<TitanicReport>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the report and rebuild the charts
    pub fn set_report(&mut self, report: TitanicReport, top_n: usize) {
        self.charts = ChartData::dashboard(&report, top_n);
        self.report = Some(report);
    }

    /// Rebuild charts after a settings change
    pub fn refresh(&mut self, top_n: usize) {
        if let Some(report) = &self.report {
            self.charts = ChartData::dashboard(report, top_n);
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        if self.charts.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        }

        let teen_rows = self
            .report
            .as_ref()
            .map(|r| r.age_group_rows(AgeGroup::Teen))
            .unwrap_or_default();

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (idx, chart) in self.charts.iter().enumerate() {
                    Self::draw_chart_card(ui, chart);

                    // Numbers behind the first chart
                    if idx == 0 && !teen_rows.is_empty() {
                        ui.add_space(8.0);
                        ui.collapsing("Teen survival table", |ui| {
                            ChartPlotter::draw_demographics_table(ui, &chart.id, &teen_rows);
                        });
                    }
                    ui.add_space(CARD_SPACING);
                }
            });
    }

    fn draw_chart_card(ui: &mut egui::Ui, chart: &ChartData) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.5, Color32::from_rgb(100, 149, 237)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&chart.title).size(18.0).strong());
                    ui.label(
                        RichText::new(&chart.question)
                            .size(13.0)
                            .italics()
                            .color(Color32::GRAY),
                    );
                    ui.add_space(8.0);
                    ChartPlotter::draw_bar_chart(ui, chart, PLOT_HEIGHT);
                });
            });
    }
}
