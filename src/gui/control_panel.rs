//! Control Panel Widget
//! Left side panel with data source, chart settings and export.

use egui::{Color32, RichText};

/// Largest selectable surname chart size.
pub const MAX_TOP_N: usize = 30;

/// Left side control panel.
pub struct ControlPanel {
    /// URL or path typed by the user
    pub source: String,
    pub top_n: usize,
    pub progress: f32,
    pub status: String,
    pub row_count: usize,
    /// Rows without class, sex or survival flag
    pub incomplete: usize,
    pub busy: bool,
}

impl ControlPanel {
    pub fn new(source: &str, top_n: usize) -> Self {
        Self {
            source: source.to_string(),
            top_n: top_n.clamp(1, MAX_TOP_N),
            progress: 0.0,
            status: "Ready".to_string(),
            row_count: 0,
            incomplete: 0,
            busy: false,
        }
    }

    /// Update progress bar and status text
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }

    /// Update the dataset summary
    pub fn set_summary(&mut self, row_count: usize, incomplete: usize) {
        self.row_count = row_count;
        self.incomplete = incomplete;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚢 Titanic Insights")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Passenger statistics")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.source)
                        .hint_text("URL or CSV path")
                        .desired_width(f32::INFINITY),
                );
                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    ui.add_enabled_ui(!self.busy, |ui| {
                        if ui.button("🔄 Reload").clicked() {
                            action = ControlPanelAction::Reload;
                        }
                        if ui.button("📂 Open CSV").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
                ui.add_space(5.0);
                ui.label(
                    RichText::new(format!(
                        "{} passengers, {} incomplete rows",
                        self.row_count, self.incomplete
                    ))
                    .size(11.0)
                    .color(Color32::GRAY),
                );
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Chart Settings Section =====
        ui.label(RichText::new("⚙️ Chart Settings").size(14.0).strong());
        ui.add_space(5.0);

        let slider = ui.add(
            egui::Slider::new(&mut self.top_n, 1..=MAX_TOP_N).text("Top families"),
        );
        if slider.changed() {
            action = ControlPanelAction::TopNChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Section =====
        ui.add_enabled_ui(!self.busy && self.row_count > 0, |ui| {
            if ui
                .add_sized([ui.available_width(), 32.0], egui::Button::new("💾 Export Report"))
                .clicked()
            {
                action = ControlPanelAction::Export;
            }
        });

        ui.add_space(15.0);

        // ===== Progress Section =====
        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.busy),
        );
        ui.add_space(5.0);
        ui.label(RichText::new(&self.status).size(12.0));

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    Reload,
    BrowseCsv,
    TopNChanged,
    Export,
}
