//! Titanic Insights Main Application
//! Main window with control panel and chart viewer.

use crate::charts::ChartData;
use crate::config::AppConfig;
use crate::data::{DataLoader, PassengerTable};
use crate::export::ReportExporter;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::stats::TitanicReport;
use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use std::time::Duration;

/// Dataset loading result from background thread
enum LoadResult {
    Progress(String),
    Complete {
        source: String,
        table: PassengerTable,
    },
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    config: AppConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DashboardApp {
    /// Create the app around a dataset loaded at startup.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig, table: PassengerTable) -> Self {
        let mut app = Self {
            control_panel: ControlPanel::new(&config.dataset_source, config.top_n),
            chart_viewer: ChartViewer::new(),
            config,
            load_rx: None,
            is_loading: false,
        };
        let source = app.config.dataset_source.clone();
        app.apply_table(&source, table);
        app
    }

    /// Rebuild the report from a fresh passenger table
    fn apply_table(&mut self, source: &str, table: PassengerTable) {
        let report = TitanicReport::build(&table.passengers);
        self.chart_viewer.set_report(report, self.control_panel.top_n);
        self.control_panel.set_summary(table.len(), table.incomplete);
        self.control_panel.set_progress(
            100.0,
            &format!("Loaded {} passengers from {}", table.len(), source),
        );
    }

    /// Load a dataset in a background thread
    fn start_load(&mut self, source: String) {
        if self.is_loading {
            return; // Already loading
        }

        self.control_panel.set_progress(0.0, "Loading dataset...");
        self.is_loading = true;
        self.control_panel.busy = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let timeout = Duration::from_secs(self.config.request_timeout_secs);

        thread::spawn(move || {
            let status = if DataLoader::is_remote(&source) {
                "Downloading dataset..."
            } else {
                "Reading CSV file..."
            };
            let _ = tx.send(LoadResult::Progress(status.to_string()));

            match DataLoader::load_passengers(&source, timeout) {
                Ok(table) => {
                    let _ = tx.send(LoadResult::Complete { source, table });
                }
                Err(e) => {
                    tracing::warn!(%source, error = %e, "Dataset reload failed");
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            let source = path.to_string_lossy().to_string();
            self.control_panel.source = source.clone();
            self.start_load(source);
        }
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_progress(10.0, &status);
                    }
                    LoadResult::Complete { source, table } => {
                        self.apply_table(&source, table);
                        self.config.dataset_source = source;
                        self.finish_loading();
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.finish_loading();
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    fn finish_loading(&mut self) {
        self.is_loading = false;
        self.control_panel.busy = false;
    }

    /// Handle report export - tables as CSV and JSON, charts as PNG
    fn handle_export(&mut self) {
        let Some(report) = self.chart_viewer.report.as_ref() else {
            self.control_panel.set_progress(0.0, "Nothing to export");
            return;
        };

        // Ask user for output location
        let Some(parent) = rfd::FileDialog::new()
            .set_title("Export report into...")
            .pick_folder()
        else {
            return; // User cancelled
        };
        let dir = parent.join(&self.config.export_dir);

        self.control_panel.set_progress(30.0, "Rendering charts...");
        let charts = ChartData::dashboard(report, self.control_panel.top_n);

        match ReportExporter::export(
            report,
            &charts,
            &dir,
            self.config.chart_width,
            self.config.chart_height,
        ) {
            Ok(files) => {
                self.control_panel.set_progress(
                    100.0,
                    &format!("Exported {} files to {}", files.len(), dir.display()),
                );
                if let Err(e) = open::that(&dir) {
                    tracing::warn!(error = %e, "Could not open export folder");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                self.control_panel
                    .set_progress(0.0, &format!("Export error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::Reload => {
                            let source = self.control_panel.source.trim().to_string();
                            self.start_load(source);
                        }
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::TopNChanged => {
                            self.chart_viewer.refresh(self.control_panel.top_n);
                        }
                        ControlPanelAction::Export => self.handle_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
