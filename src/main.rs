//! Censo RJ - Municipal Demographic Report
//!
//! Interactive census dashboard for the municipalities of Rio de Janeiro state.

mod charts;
mod data;
mod gui;
mod report;

use eframe::egui;
use gui::CensoApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Censo RJ - Relatório Demográfico"),
        ..Default::default()
    };

    eframe::run_native(
        "Censo RJ",
        options,
        Box::new(|cc| Ok(Box::new(CensoApp::new(cc)?))),
    )
}
