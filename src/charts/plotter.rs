//! Chart Plotter Module
//! Report visualizations: egui_plot bar charts plus painter-drawn donut charts.

use crate::report::{MunicipalityReport, RaceCategory, RaceComposition, YEAR_2010, YEAR_2022};
use egui::{Color32, RichText, Shape, Stroke, Vec2};
use egui_plot::{Bar, BarChart, Legend, Plot};

/// Plotly default palette, matching the original report's charts.
pub const WHITE_SERIES_COLOR: Color32 = Color32::from_rgb(99, 110, 250); // Blue
pub const BLACK_SERIES_COLOR: Color32 = Color32::from_rgb(239, 85, 59); // Red
pub const OTHER_SERIES_COLOR: Color32 = Color32::from_rgb(0, 204, 150); // Green

/// Hole fraction of the donut radius, as in the original pie charts.
const DONUT_HOLE_RATIO: f32 = 0.4;
/// Arc step per tessellated quad, in radians.
const SLICE_STEP_RADIANS: f32 = 0.05;

/// Draws the report charts for the selected municipality.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn race_color(race: RaceCategory) -> Color32 {
        match race {
            RaceCategory::White => WHITE_SERIES_COLOR,
            RaceCategory::Black => BLACK_SERIES_COLOR,
        }
    }

    /// Slices for the composition donut and its legend, in draw order.
    pub fn composition_slices(
        composition: &RaceComposition,
    ) -> [(&'static str, f64, Color32); 3] {
        [
            ("Brancos", composition.pct_white, WHITE_SERIES_COLOR),
            ("Pretos", composition.pct_black, BLACK_SERIES_COLOR),
            (
                "Outros (pardos, amarelos, indígenas)",
                composition.pct_other,
                OTHER_SERIES_COLOR,
            ),
        ]
    }

    /// Grouped bar chart of the absolute white/black counts for both years.
    /// X-axis: census year, Y-axis: population.
    pub fn draw_population_bars(ui: &mut egui::Ui, report: &MunicipalityReport) {
        let year_labels = [YEAR_2010, YEAR_2022];

        let mut white_bars: Vec<Bar> = Vec::new();
        let mut black_bars: Vec<Bar> = Vec::new();
        for row in &report.race_series {
            let year_x = if row.year == YEAR_2010 { 0.0 } else { 1.0 };
            let (offset, bars) = match row.race {
                RaceCategory::White => (-0.18, &mut white_bars),
                RaceCategory::Black => (0.18, &mut black_bars),
            };
            bars.push(
                Bar::new(year_x + offset, row.population as f64)
                    .width(0.32)
                    .name(format!("{} {}", row.race.label(), row.year)),
            );
        }

        Plot::new(format!("race_bars_{}", report.name))
            .height(320.0)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .legend(Legend::default())
            .include_y(0.0)
            .x_axis_label("Ano")
            .y_axis_label("População")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                // only the two integer year positions get a label
                if (mark.value - idx as f64).abs() < 0.05 && idx < year_labels.len() {
                    year_labels[idx].to_string()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(white_bars)
                        .color(Self::race_color(RaceCategory::White))
                        .name(RaceCategory::White.label()),
                );
                plot_ui.bar_chart(
                    BarChart::new(black_bars)
                        .color(Self::race_color(RaceCategory::Black))
                        .name(RaceCategory::Black.label()),
                );
            });
    }

    /// Donut chart of the racial composition with a label in the hole.
    /// egui_plot has no pie primitive, so the slices are tessellated into
    /// convex quads on the painter.
    pub fn draw_composition_donut(
        ui: &mut egui::Ui,
        composition: &RaceComposition,
        center_label: &str,
        size: f32,
    ) {
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(size), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        let center = rect.center();
        let outer = size * 0.5 - 4.0;
        let inner = outer * DONUT_HOLE_RATIO;

        // start at 12 o'clock, sweep clockwise
        let mut angle = -std::f32::consts::FRAC_PI_2;
        for (_, pct, color) in Self::composition_slices(composition) {
            let sweep = (pct.max(0.0) / 100.0) as f32 * std::f32::consts::TAU;
            let steps = (sweep / SLICE_STEP_RADIANS).ceil().max(1.0) as usize;
            for step in 0..steps {
                let a0 = angle + sweep * step as f32 / steps as f32;
                let a1 = angle + sweep * (step + 1) as f32 / steps as f32;
                let quad = vec![
                    center + Vec2::angled(a0) * outer,
                    center + Vec2::angled(a1) * outer,
                    center + Vec2::angled(a1) * inner,
                    center + Vec2::angled(a0) * inner,
                ];
                painter.add(Shape::convex_polygon(quad, color, Stroke::NONE));
            }
            angle += sweep;
        }

        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            center_label,
            egui::FontId::proportional(13.0),
            ui.visuals().text_color(),
        );
    }

    /// Legend rows for the donut slices, with the slice percentages.
    pub fn draw_composition_legend(ui: &mut egui::Ui, composition: &RaceComposition) {
        for (label, pct, color) in Self::composition_slices(composition) {
            ui.horizontal(|ui| {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
                ui.painter().rect_filled(rect, 2.0, color);
                ui.label(RichText::new(format!("{label}: {pct:.1}%")).size(12.0));
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_cover_the_full_circle() {
        let composition = RaceComposition {
            pct_white: 45.4,
            pct_black: 15.6,
            pct_other: 39.0,
        };
        let total: f64 = ChartPlotter::composition_slices(&composition)
            .iter()
            .map(|(_, pct, _)| pct)
            .sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn series_colors_are_distinct() {
        assert_ne!(
            ChartPlotter::race_color(RaceCategory::White),
            ChartPlotter::race_color(RaceCategory::Black)
        );
    }
}
