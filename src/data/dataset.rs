//! Census Dataset Module
//! Typed municipality records, the immutable in-process dataset, and region aggregation.

use crate::data::loader::{DatasetLoader, LoaderError};
use log::warn;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error(transparent)]
    Load(#[from] LoaderError),
    #[error("Unknown municipality '{0}'")]
    NotFound(String),
}

/// One municipality row of the census table, with derived absolute counts.
///
/// The 2022 race counts apply the 2010 percentages to the 2022 total; they
/// are estimates, flagged as such by [`crate::report::ESTIMATE_CAVEAT`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MunicipalityRecord {
    pub name: String,
    pub region: String,
    pub pop_2010: i64,
    pub pop_2022: i64,
    pub pct_white_2010: f64,
    pub pct_black_2010: f64,
    pub white_2010: i64,
    pub black_2010: i64,
    pub white_est_2022: i64,
    pub black_est_2022: i64,
}

/// Population totals for one region, recomputed on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionAggregate {
    pub region: String,
    pub pop_2010: i64,
    pub pop_2022: i64,
    /// Growth in percent, rounded to 2 decimals. `None` when the region had
    /// no recorded 2010 population, which leaves the ratio undefined.
    pub growth_pct: Option<f64>,
}

/// The immutable census dataset, loaded once per process.
///
/// Records are kept sorted by municipality name, so listing is a plain
/// projection and lookup is a binary search.
pub struct Dataset {
    records: Vec<MunicipalityRecord>,
}

static SHARED: OnceLock<Dataset> = OnceLock::new();

impl Dataset {
    /// Build the dataset from the embedded table. Deterministic; fails only
    /// on a malformed table, which is fatal at startup.
    pub fn load() -> Result<Self, DatasetError> {
        let df = DatasetLoader::load_dataframe()?;
        let records = DatasetLoader::records_from_frame(&df)?;
        Self::from_records(records)
    }

    fn from_records(mut records: Vec<MunicipalityRecord>) -> Result<Self, DatasetError> {
        records.sort_by(|a, b| a.name.cmp(&b.name));
        for pair in records.windows(2) {
            if pair[0].name == pair[1].name {
                return Err(LoaderError::DuplicateName(pair[0].name.clone()).into());
            }
        }
        Ok(Self { records })
    }

    /// Process-wide memoized dataset. Loading is pure, so a racing double
    /// load yields identical rows and the losing copy is simply dropped.
    pub fn shared() -> Result<&'static Dataset, DatasetError> {
        if let Some(dataset) = SHARED.get() {
            return Ok(dataset);
        }
        let dataset = Self::load()?;
        Ok(SHARED.get_or_init(|| dataset))
    }

    /// Distinct municipality names in sorted order.
    pub fn list_municipalities(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    /// Look up one municipality by exact name.
    pub fn get_record(&self, name: &str) -> Result<&MunicipalityRecord, DatasetError> {
        self.records
            .binary_search_by(|r| r.name.as_str().cmp(name))
            .map(|idx| &self.records[idx])
            .map_err(|_| DatasetError::NotFound(name.to_string()))
    }

    /// Every record with its derived fields, in name order.
    pub fn full_table(&self) -> &[MunicipalityRecord] {
        &self.records
    }

    /// Sum both census populations per region and derive growth.
    ///
    /// Grouping is by exact region string; regions come out in name order.
    pub fn aggregate_by_region(&self) -> Vec<RegionAggregate> {
        let mut sums: BTreeMap<&str, (i64, i64)> = BTreeMap::new();
        for record in &self.records {
            let entry = sums.entry(record.region.as_str()).or_insert((0, 0));
            entry.0 += record.pop_2010;
            entry.1 += record.pop_2022;
        }

        sums.into_iter()
            .map(|(region, (pop_2010, pop_2022))| {
                let growth_pct = if pop_2010 == 0 {
                    warn!("region '{region}' has no 2010 population, growth is undefined");
                    None
                } else {
                    let raw = (pop_2022 - pop_2010) as f64 / pop_2010 as f64 * 100.0;
                    Some(round2(raw))
                };
                RegionAggregate {
                    region: region.to_string(),
                    pop_2010,
                    pop_2022,
                    growth_pct,
                }
            })
            .collect()
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, region: &str, pop_2010: i64, pop_2022: i64) -> MunicipalityRecord {
        MunicipalityRecord {
            name: name.to_string(),
            region: region.to_string(),
            pop_2010,
            pop_2022,
            pct_white_2010: 40.0,
            pct_black_2010: 20.0,
            white_2010: (pop_2010 as f64 * 0.4 + 0.5) as i64,
            black_2010: (pop_2010 as f64 * 0.2 + 0.5) as i64,
            white_est_2022: (pop_2022 as f64 * 0.4 + 0.5) as i64,
            black_est_2022: (pop_2022 as f64 * 0.2 + 0.5) as i64,
        }
    }

    #[test]
    fn rio_de_janeiro_derived_counts() {
        let dataset = Dataset::load().unwrap();
        let rio = dataset.get_record("Rio de Janeiro").unwrap();

        assert_eq!(rio.pop_2010, 6_320_446);
        assert_eq!(rio.pop_2022, 6_211_223);
        assert!((rio.white_2010 - 2_869_482).abs() <= 1);
        assert!((rio.white_est_2022 - 2_819_895).abs() <= 1);
    }

    #[test]
    fn municipalities_are_sorted_and_unique() {
        let dataset = Dataset::load().unwrap();
        let names = dataset.list_municipalities();
        assert_eq!(names.len(), 35);
        for pair in names.windows(2) {
            assert!(pair[0] < pair[1], "{} !< {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn unknown_name_is_not_found() {
        let dataset = Dataset::load().unwrap();
        assert!(matches!(
            dataset.get_record("Atlantis"),
            Err(DatasetError::NotFound(_))
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let records = vec![record("Dupla", "A", 10, 10), record("Dupla", "B", 20, 20)];
        assert!(matches!(
            Dataset::from_records(records),
            Err(DatasetError::Load(LoaderError::DuplicateName(_)))
        ));
    }

    #[test]
    fn region_sums_cover_every_record_exactly_once() {
        let dataset = Dataset::load().unwrap();
        let aggregates = dataset.aggregate_by_region();

        let record_total: i64 = dataset.full_table().iter().map(|r| r.pop_2010).sum();
        let region_total: i64 = aggregates.iter().map(|a| a.pop_2010).sum();
        assert_eq!(record_total, region_total);

        let record_total_2022: i64 = dataset.full_table().iter().map(|r| r.pop_2022).sum();
        let region_total_2022: i64 = aggregates.iter().map(|a| a.pop_2022).sum();
        assert_eq!(record_total_2022, region_total_2022);
    }

    #[test]
    fn region_growth_is_rounded_to_two_decimals() {
        let records = vec![
            record("A", "Interior", 60_000, 66_000),
            record("B", "Interior", 40_000, 44_000),
        ];
        let dataset = Dataset::from_records(records).unwrap();
        let aggregates = dataset.aggregate_by_region();
        assert_eq!(aggregates.len(), 1);
        assert_eq!(aggregates[0].pop_2010, 100_000);
        assert_eq!(aggregates[0].pop_2022, 110_000);
        assert_eq!(aggregates[0].growth_pct, Some(10.00));
    }

    #[test]
    fn empty_region_growth_is_undefined_not_a_panic() {
        let records = vec![record("Fantasma", "Deserta", 0, 1_000)];
        let dataset = Dataset::from_records(records).unwrap();
        let aggregates = dataset.aggregate_by_region();
        assert_eq!(aggregates[0].growth_pct, None);
    }

    #[test]
    fn loading_twice_is_idempotent() {
        let first = Dataset::load().unwrap();
        let second = Dataset::load().unwrap();
        assert_eq!(first.full_table(), second.full_table());
    }

    #[test]
    fn expected_regions_are_present() {
        let dataset = Dataset::load().unwrap();
        let regions: Vec<String> = dataset
            .aggregate_by_region()
            .into_iter()
            .map(|a| a.region)
            .collect();
        assert_eq!(
            regions,
            [
                "Baixadas Litorâneas",
                "Metropolitana",
                "Médio Paraíba",
                "Noroeste Fluminense",
                "Norte Fluminense",
                "Serrana",
            ]
        );
    }
}
