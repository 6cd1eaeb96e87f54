//! Census Table Loader Module
//! Parses the embedded IBGE census table and derives absolute race counts using Polars.

use crate::data::MunicipalityRecord;
use polars::prelude::*;
use std::io::Cursor;
use thiserror::Error;

/// Embedded census table: 35 municipalities of Rio de Janeiro state.
/// Source: IBGE demographic censuses of 2010 and 2022.
const CENSUS_CSV: &str = include_str!("municipios_rj.csv");

/// Columns the embedded table must carry.
const EXPECTED_COLUMNS: [&str; 6] = [
    "municipality",
    "region",
    "pop_2010",
    "pop_2022",
    "pct_white_2010",
    "pct_black_2010",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to parse census table: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Census table is missing column '{0}'")]
    MissingColumn(&'static str),
    #[error("Census table has {found} columns, expected {expected}")]
    ColumnCount { found: usize, expected: usize },
    #[error("Census table row {row} has an empty field")]
    NullField { row: usize },
    #[error("Invalid census row for '{name}': {reason}")]
    InvalidRow { name: String, reason: String },
    #[error("Duplicate municipality name '{0}'")]
    DuplicateName(String),
    #[error("Census table is empty")]
    NoData,
}

/// Loads the fixed embedded table. Pure: same output on every call, the
/// only failure source is a malformed table caught at build/test time.
pub struct DatasetLoader;

impl DatasetLoader {
    /// Parse the embedded table and attach the four derived race-count columns.
    pub fn load_dataframe() -> Result<DataFrame, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(64))
            .into_reader_with_file_handle(Cursor::new(CENSUS_CSV.as_bytes()))
            .finish()?;

        Self::validate_schema(&df)?;
        Ok(Self::derive_race_counts(df)?)
    }

    fn validate_schema(df: &DataFrame) -> Result<(), LoaderError> {
        if df.height() == 0 {
            return Err(LoaderError::NoData);
        }
        if df.width() != EXPECTED_COLUMNS.len() {
            return Err(LoaderError::ColumnCount {
                found: df.width(),
                expected: EXPECTED_COLUMNS.len(),
            });
        }
        for name in EXPECTED_COLUMNS {
            if df.column(name).is_err() {
                return Err(LoaderError::MissingColumn(name));
            }
        }
        Ok(())
    }

    /// Absolute counts from totals and 2010 percentages, rounded half-up
    /// (`+ 0.5` then a truncating integer cast; inputs are non-negative).
    ///
    /// The 2022 counts reuse the 2010 percentages: no racial breakdown
    /// exists for the 2022 census, so they are estimates, not measurements.
    fn derive_race_counts(df: DataFrame) -> PolarsResult<DataFrame> {
        df.lazy()
            .with_columns([
                round_count(col("pop_2010"), "pct_white_2010").alias("white_2010"),
                round_count(col("pop_2010"), "pct_black_2010").alias("black_2010"),
                round_count(col("pop_2022"), "pct_white_2010").alias("white_est_2022"),
                round_count(col("pop_2022"), "pct_black_2010").alias("black_est_2022"),
            ])
            .collect()
    }

    /// Lift the augmented frame into typed records, checking the row
    /// invariants (non-negative populations, percentages summing to at
    /// most 100) that the fixed table is expected to satisfy.
    pub fn records_from_frame(df: &DataFrame) -> Result<Vec<MunicipalityRecord>, LoaderError> {
        let municipality = df.column("municipality")?.str()?;
        let region = df.column("region")?.str()?;
        let pop_2010 = df.column("pop_2010")?.i64()?;
        let pop_2022 = df.column("pop_2022")?.i64()?;
        let pct_white_2010 = df.column("pct_white_2010")?.f64()?;
        let pct_black_2010 = df.column("pct_black_2010")?.f64()?;
        let white_2010 = df.column("white_2010")?.i64()?;
        let black_2010 = df.column("black_2010")?.i64()?;
        let white_est_2022 = df.column("white_est_2022")?.i64()?;
        let black_est_2022 = df.column("black_est_2022")?.i64()?;

        let mut records = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let record = (|| {
                Some(MunicipalityRecord {
                    name: municipality.get(row)?.to_string(),
                    region: region.get(row)?.to_string(),
                    pop_2010: pop_2010.get(row)?,
                    pop_2022: pop_2022.get(row)?,
                    pct_white_2010: pct_white_2010.get(row)?,
                    pct_black_2010: pct_black_2010.get(row)?,
                    white_2010: white_2010.get(row)?,
                    black_2010: black_2010.get(row)?,
                    white_est_2022: white_est_2022.get(row)?,
                    black_est_2022: black_est_2022.get(row)?,
                })
            })()
            .ok_or(LoaderError::NullField { row })?;

            Self::validate_record(&record)?;
            records.push(record);
        }
        Ok(records)
    }

    fn validate_record(record: &MunicipalityRecord) -> Result<(), LoaderError> {
        let invalid = |reason: &str| LoaderError::InvalidRow {
            name: record.name.clone(),
            reason: reason.to_string(),
        };
        if record.pop_2010 < 0 || record.pop_2022 < 0 {
            return Err(invalid("negative population"));
        }
        if record.pct_white_2010 < 0.0 || record.pct_black_2010 < 0.0 {
            return Err(invalid("negative race percentage"));
        }
        if record.pct_white_2010 + record.pct_black_2010 > 100.0 {
            return Err(invalid("race percentages sum past 100"));
        }
        Ok(())
    }
}

fn round_count(total: Expr, pct_column: &str) -> Expr {
    (total * col(pct_column) / lit(100.0) + lit(0.5)).cast(DataType::Int64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_all_municipalities_with_derived_columns() {
        let df = DatasetLoader::load_dataframe().unwrap();
        assert_eq!(df.height(), 35);
        assert_eq!(df.width(), 10);
        for name in ["white_2010", "black_2010", "white_est_2022", "black_est_2022"] {
            assert!(df.column(name).is_ok(), "missing derived column {name}");
        }
    }

    #[test]
    fn derived_counts_match_percentages_within_rounding() {
        let df = DatasetLoader::load_dataframe().unwrap();
        let pop_2022 = df.column("pop_2022").unwrap().i64().unwrap();
        let pct_white = df.column("pct_white_2010").unwrap().f64().unwrap();
        let white_est = df.column("white_est_2022").unwrap().i64().unwrap();

        for i in 0..df.height() {
            let exact = pop_2022.get(i).unwrap() as f64 * pct_white.get(i).unwrap() / 100.0;
            let derived = white_est.get(i).unwrap() as f64;
            assert!(
                (derived - exact).abs() <= 0.51,
                "row {i}: derived {derived} too far from exact {exact}"
            );
        }
    }

    #[test]
    fn race_counts_never_exceed_totals() {
        let df = DatasetLoader::load_dataframe().unwrap();
        let pop_2010 = df.column("pop_2010").unwrap().i64().unwrap();
        let white = df.column("white_2010").unwrap().i64().unwrap();
        let black = df.column("black_2010").unwrap().i64().unwrap();

        for i in 0..df.height() {
            // percentages sum to at most 100, so +-1 rounding per field is
            // the only way the sum can creep past the total
            assert!(
                white.get(i).unwrap() + black.get(i).unwrap() <= pop_2010.get(i).unwrap() + 2,
                "row {i}: white + black exceeds the 2010 population"
            );
        }
    }
}
