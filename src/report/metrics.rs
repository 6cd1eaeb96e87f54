//! Report Metrics Module
//! Growth figures and chart-ready shapes for one selected municipality.

use crate::data::{Dataset, DatasetError, MunicipalityRecord};
use serde::Serialize;

/// Year labels shared by the charts and tables.
pub const YEAR_2010: &str = "2010";
pub const YEAR_2022: &str = "2022 (est.)";

/// Caveat that must accompany any rendering of the 2022 estimates: the 2022
/// racial proportions are the 2010 proportions applied to the 2022 total,
/// not an independently measured breakdown.
pub const ESTIMATE_CAVEAT: &str = "A proporção racial de 2022 é idêntica à de 2010 porque os \
números de 2022 são estimativas: os percentuais do Censo 2010 aplicados à população total de \
2022. Para ver a mudança real, observe os números absolutos no gráfico de barras.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RaceCategory {
    White,
    Black,
}

impl RaceCategory {
    pub fn label(self) -> &'static str {
        match self {
            RaceCategory::White => "Brancos",
            RaceCategory::Black => "Pretos",
        }
    }
}

/// Long-form row for the grouped bar chart: one (year, race) pair with its
/// absolute population count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceSeriesRow {
    pub year: &'static str,
    pub race: RaceCategory,
    pub population: i64,
}

/// Percentage composition for the donut charts. White and black come
/// straight from the 2010 census; other is the remainder (pardos, amarelos,
/// indígenas).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RaceComposition {
    pub pct_white: f64,
    pub pct_black: f64,
    pub pct_other: f64,
}

/// Everything the report page needs for one selected municipality.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MunicipalityReport {
    pub name: String,
    pub region: String,
    pub pop_2010: i64,
    pub pop_2022: i64,
    /// Population growth in percent; 0 when there was no 2010 population.
    pub growth_pct: f64,
    /// Four rows: two years x two race categories, absolute counts.
    pub race_series: Vec<RaceSeriesRow>,
    /// Shared by both years by construction; see [`ESTIMATE_CAVEAT`].
    pub composition: RaceComposition,
    pub caveat: &'static str,
}

impl MunicipalityReport {
    /// Look the municipality up and compute its report.
    pub fn for_municipality(dataset: &Dataset, name: &str) -> Result<Self, DatasetError> {
        dataset.get_record(name).map(Self::from_record)
    }

    pub fn from_record(record: &MunicipalityRecord) -> Self {
        let growth_pct = if record.pop_2010 == 0 {
            0.0
        } else {
            (record.pop_2022 - record.pop_2010) as f64 / record.pop_2010 as f64 * 100.0
        };

        let race_series = vec![
            RaceSeriesRow {
                year: YEAR_2010,
                race: RaceCategory::White,
                population: record.white_2010,
            },
            RaceSeriesRow {
                year: YEAR_2010,
                race: RaceCategory::Black,
                population: record.black_2010,
            },
            RaceSeriesRow {
                year: YEAR_2022,
                race: RaceCategory::White,
                population: record.white_est_2022,
            },
            RaceSeriesRow {
                year: YEAR_2022,
                race: RaceCategory::Black,
                population: record.black_est_2022,
            },
        ];

        let composition = RaceComposition {
            pct_white: record.pct_white_2010,
            pct_black: record.pct_black_2010,
            pct_other: 100.0 - record.pct_white_2010 - record.pct_black_2010,
        };

        Self {
            name: record.name.clone(),
            region: record.region.clone(),
            pop_2010: record.pop_2010,
            pop_2022: record.pop_2022,
            growth_pct,
            race_series,
            composition,
            caveat: ESTIMATE_CAVEAT,
        }
    }
}

/// Format a count with Brazilian thousands separators: 6320446 -> "6.320.446".
pub fn format_count(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(pop_2010: i64, pop_2022: i64) -> MunicipalityRecord {
        MunicipalityRecord {
            name: "Amostra".to_string(),
            region: "Interior".to_string(),
            pop_2010,
            pop_2022,
            pct_white_2010: 45.4,
            pct_black_2010: 15.6,
            white_2010: (pop_2010 as f64 * 0.454 + 0.5) as i64,
            black_2010: (pop_2010 as f64 * 0.156 + 0.5) as i64,
            white_est_2022: (pop_2022 as f64 * 0.454 + 0.5) as i64,
            black_est_2022: (pop_2022 as f64 * 0.156 + 0.5) as i64,
        }
    }

    #[test]
    fn growth_defaults_to_zero_without_2010_population() {
        let report = MunicipalityReport::from_record(&sample_record(0, 5_000));
        assert_eq!(report.growth_pct, 0.0);
    }

    #[test]
    fn rio_de_janeiro_report_metrics() {
        let dataset = Dataset::load().unwrap();
        let report = MunicipalityReport::for_municipality(&dataset, "Rio de Janeiro").unwrap();

        assert_eq!(report.pop_2010, 6_320_446);
        assert_eq!(report.pop_2022, 6_211_223);
        // (6211223 - 6320446) / 6320446 * 100
        assert!((report.growth_pct + 1.728).abs() < 0.001);
    }

    #[test]
    fn race_series_has_two_years_by_two_categories() {
        let record = sample_record(100_000, 110_000);
        let report = MunicipalityReport::from_record(&record);

        assert_eq!(report.race_series.len(), 4);
        let white_2022 = report
            .race_series
            .iter()
            .find(|r| r.year == YEAR_2022 && r.race == RaceCategory::White)
            .unwrap();
        assert_eq!(white_2022.population, record.white_est_2022);
    }

    #[test]
    fn composition_covers_the_whole_population() {
        let report = MunicipalityReport::from_record(&sample_record(100_000, 110_000));
        let c = report.composition;
        assert!((c.pct_white + c.pct_black + c.pct_other - 100.0).abs() < 1e-9);
        assert!(c.pct_other >= 0.0);
    }

    #[test]
    fn caveat_survives_serialization() {
        let report = MunicipalityReport::from_record(&sample_record(100_000, 110_000));
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("estimativas"));
    }

    #[test]
    fn counts_format_with_brazilian_separators() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(6_320_446), "6.320.446");
        assert_eq!(format_count(-10_213), "-10.213");
    }
}
