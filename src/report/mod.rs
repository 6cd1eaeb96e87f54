//! Report module - per-municipality metrics and chart-ready shapes

mod metrics;

pub use metrics::{
    format_count, MunicipalityReport, RaceCategory, RaceComposition, RaceSeriesRow,
    ESTIMATE_CAVEAT, YEAR_2010, YEAR_2022,
};
