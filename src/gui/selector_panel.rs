//! Selector Panel Widget
//! Left side panel with the municipality dropdown and the data-source note.

use egui::{Color32, ComboBox, RichText};

/// Actions triggered by the selector panel
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorAction {
    None,
    SelectionChanged,
}

/// Left side panel: title block, municipality dropdown, source note.
/// Only names present in the dataset are ever offered.
pub struct SelectorPanel {
    pub selected: String,
    municipalities: Vec<String>,
}

impl SelectorPanel {
    pub fn new(municipalities: Vec<String>) -> Self {
        let selected = municipalities.first().cloned().unwrap_or_default();
        Self {
            selected,
            municipalities,
        }
    }

    /// Draw the panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> SelectorAction {
        let mut action = SelectorAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🏙 Censo RJ")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Relatório Demográfico por Município")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        ui.label(RichText::new("📍 Município").size(14.0).strong());
        ui.add_space(5.0);
        ui.label(
            RichText::new(
                "Selecione um município para visualizar a análise detalhada de sua \
                 população e composição racial.",
            )
            .size(11.0)
            .color(Color32::GRAY),
        );
        ui.add_space(8.0);

        ComboBox::from_id_salt("municipality")
            .width(230.0)
            .selected_text(&self.selected)
            .show_ui(ui, |ui| {
                for name in &self.municipalities {
                    if ui.selectable_label(self.selected == *name, name).clicked()
                        && self.selected != *name
                    {
                        self.selected = name.clone();
                        action = SelectorAction::SelectionChanged;
                    }
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        ui.label(RichText::new("ℹ Fonte dos Dados").size(14.0).strong());
        ui.add_space(5.0);
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(
                        "IBGE, Censos Demográficos de 2010 e 2022. Os números de 2022 \
                         para cor/raça são estimativas baseadas na proporção racial do \
                         Censo de 2010 aplicada à população total de 2022.",
                    )
                    .size(11.0),
                );
            });

        action
    }
}
