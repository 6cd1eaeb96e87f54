//! Report Viewer Widget
//! Central panel: KPI metric cards, charts, and the aggregate tables.

use crate::charts::ChartPlotter;
use crate::data::Dataset;
use crate::report::{format_count, MunicipalityReport, YEAR_2010, YEAR_2022};
use egui::{Color32, RichText, ScrollArea};

const WARNING_COLOR: Color32 = Color32::from_rgb(255, 193, 7);
const GROWTH_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
const SHRINK_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// Scrollable report page for the selected municipality.
#[derive(Default)]
pub struct ReportViewer;

impl ReportViewer {
    pub fn show(&self, ui: &mut egui::Ui, dataset: &Dataset, report: &MunicipalityReport) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_space(5.0);
                ui.label(
                    RichText::new(format!("Análise de {}", report.name))
                        .size(22.0)
                        .strong(),
                );
                ui.label(
                    RichText::new(format!("Região {}", report.region))
                        .size(12.0)
                        .color(Color32::GRAY),
                );
                ui.add_space(10.0);

                Self::draw_kpi_row(ui, report);
                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);

                Self::draw_charts(ui, report);

                ui.add_space(15.0);
                egui::CollapsingHeader::new("Análise Consolidada por Região")
                    .show(ui, |ui| Self::draw_region_table(ui, dataset));

                egui::CollapsingHeader::new("Tabela de Dados Completa")
                    .show(ui, |ui| Self::draw_full_table(ui, dataset));
                ui.add_space(10.0);
            });
    }

    fn draw_kpi_row(ui: &mut egui::Ui, report: &MunicipalityReport) {
        ui.columns(3, |cols| {
            Self::kpi_card(&mut cols[0], "População em 2010", &format_count(report.pop_2010));
            Self::kpi_card(&mut cols[1], "População em 2022", &format_count(report.pop_2022));
            Self::kpi_card(
                &mut cols[2],
                "Crescimento Populacional",
                &format!("{:.2}%", report.growth_pct),
            );
        });
    }

    fn kpi_card(ui: &mut egui::Ui, label: &str, value: &str) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
                ui.label(RichText::new(value).size(20.0).strong());
            });
    }

    fn draw_charts(ui: &mut egui::Ui, report: &MunicipalityReport) {
        ui.columns(2, |cols| {
            cols[0].label(
                RichText::new("Crescimento da População (Absoluto)")
                    .size(14.0)
                    .strong(),
            );
            cols[0].add_space(5.0);
            ChartPlotter::draw_population_bars(&mut cols[0], report);

            let right = &mut cols[1];
            right.label(
                RichText::new("Composição Racial (Percentual)")
                    .size(14.0)
                    .strong(),
            );
            right.add_space(5.0);

            // the estimate warning stays pinned next to the donuts
            egui::Frame::none()
                .stroke(egui::Stroke::new(1.0, WARNING_COLOR))
                .rounding(5.0)
                .inner_margin(8.0)
                .show(right, |ui| {
                    ui.label(
                        RichText::new(format!("⚠ {}", report.caveat))
                            .size(11.0)
                            .color(WARNING_COLOR),
                    );
                });
            right.add_space(8.0);

            right.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(format!(
                            "{} (Total: {})",
                            YEAR_2010,
                            format_count(report.pop_2010)
                        ))
                        .size(12.0),
                    );
                    ChartPlotter::draw_composition_donut(
                        ui,
                        &report.composition,
                        YEAR_2010,
                        150.0,
                    );
                });
                ui.add_space(10.0);
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(format!(
                            "{} (Total: {})",
                            YEAR_2022,
                            format_count(report.pop_2022)
                        ))
                        .size(12.0),
                    );
                    ChartPlotter::draw_composition_donut(
                        ui,
                        &report.composition,
                        YEAR_2022,
                        150.0,
                    );
                });
            });
            right.add_space(8.0);
            ChartPlotter::draw_composition_legend(right, &report.composition);
        });
    }

    fn draw_region_table(ui: &mut egui::Ui, dataset: &Dataset) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("region_table")
                    .striped(true)
                    .min_col_width(90.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["Região", "Pop. 2010", "Pop. 2022", "Crescimento (%)"] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for aggregate in dataset.aggregate_by_region() {
                            ui.label(RichText::new(&aggregate.region).size(11.0));
                            ui.label(RichText::new(format_count(aggregate.pop_2010)).size(11.0));
                            ui.label(RichText::new(format_count(aggregate.pop_2022)).size(11.0));
                            match aggregate.growth_pct {
                                Some(growth) => {
                                    let color =
                                        if growth < 0.0 { SHRINK_COLOR } else { GROWTH_COLOR };
                                    ui.label(
                                        RichText::new(format!("{growth:.2}%"))
                                            .size(11.0)
                                            .color(color),
                                    );
                                }
                                None => {
                                    ui.label(RichText::new("—").size(11.0));
                                }
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    fn draw_full_table(ui: &mut egui::Ui, dataset: &Dataset) {
        ScrollArea::horizontal()
            .id_salt("full_table_scroll")
            .show(ui, |ui| {
                egui::Frame::none()
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .rounding(5.0)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        egui::Grid::new("full_table")
                            .striped(true)
                            .min_col_width(70.0)
                            .spacing([10.0, 4.0])
                            .show(ui, |ui| {
                                for header in [
                                    "Município",
                                    "Região",
                                    "Pop. 2010",
                                    "Pop. 2022",
                                    "% Brancos (2010)",
                                    "% Pretos (2010)",
                                    "Brancos (2010)",
                                    "Pretos (2010)",
                                    "Brancos (est. 2022)",
                                    "Pretos (est. 2022)",
                                ] {
                                    ui.label(RichText::new(header).strong().size(11.0));
                                }
                                ui.end_row();

                                for record in dataset.full_table() {
                                    ui.label(RichText::new(&record.name).size(11.0));
                                    ui.label(RichText::new(&record.region).size(11.0));
                                    ui.label(RichText::new(format_count(record.pop_2010)).size(11.0));
                                    ui.label(RichText::new(format_count(record.pop_2022)).size(11.0));
                                    ui.label(
                                        RichText::new(format!("{:.1}", record.pct_white_2010))
                                            .size(11.0),
                                    );
                                    ui.label(
                                        RichText::new(format!("{:.1}", record.pct_black_2010))
                                            .size(11.0),
                                    );
                                    ui.label(
                                        RichText::new(format_count(record.white_2010)).size(11.0),
                                    );
                                    ui.label(
                                        RichText::new(format_count(record.black_2010)).size(11.0),
                                    );
                                    ui.label(
                                        RichText::new(format_count(record.white_est_2022))
                                            .size(11.0),
                                    );
                                    ui.label(
                                        RichText::new(format_count(record.black_est_2022))
                                            .size(11.0),
                                    );
                                    ui.end_row();
                                }
                            });
                    });
            });
    }
}
