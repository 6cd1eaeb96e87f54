//! GUI module - User interface components

mod app;
mod report_viewer;
mod selector_panel;

pub use app::CensoApp;
pub use report_viewer::ReportViewer;
pub use selector_panel::{SelectorAction, SelectorPanel};
