//! Charts module - report chart rendering

mod plotter;

pub use plotter::ChartPlotter;
