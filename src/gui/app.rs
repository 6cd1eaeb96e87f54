//! Census Report Application
//! Main window with the municipality selector and the report viewer.

use crate::data::{Dataset, DatasetError};
use crate::gui::{ReportViewer, SelectorAction, SelectorPanel};
use crate::report::MunicipalityReport;
use egui::SidePanel;

/// Main application window.
pub struct CensoApp {
    dataset: &'static Dataset,
    selector: SelectorPanel,
    viewer: ReportViewer,
    report: MunicipalityReport,
}

impl CensoApp {
    /// Load the shared dataset and open the report on the first
    /// municipality. A malformed embedded table aborts startup here.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Result<Self, DatasetError> {
        let dataset = Dataset::shared()?;
        let municipalities: Vec<String> = dataset
            .list_municipalities()
            .into_iter()
            .map(str::to_string)
            .collect();
        let selector = SelectorPanel::new(municipalities);
        let report = MunicipalityReport::for_municipality(dataset, &selector.selected)?;

        Ok(Self {
            dataset,
            selector,
            viewer: ReportViewer::default(),
            report,
        })
    }

    /// Recompute the report for the newly selected municipality.
    fn handle_selection_changed(&mut self) {
        match MunicipalityReport::for_municipality(self.dataset, &self.selector.selected) {
            Ok(report) => self.report = report,
            // the selector only offers known names, so a miss is a wiring
            // bug; keep the last report instead of taking the window down
            Err(error) => log::error!("report refresh failed: {error}"),
        }
    }
}

impl eframe::App for CensoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        SidePanel::left("selector_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.selector.show(ui) {
                        SelectorAction::SelectionChanged => self.handle_selection_changed(),
                        SelectorAction::None => {}
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.viewer.show(ui, self.dataset, &self.report);
        });
    }
}
