//! Core data types for the wildfire dataset
//!
//! - `Region`: the seven Australian states/territories present in the data
//! - `WildfireRecord`: one row of the source table with derived calendar fields
//! - `Dataset`: the immutable, ordered collection loaded at startup

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::DatasetError;

/// Australian state or territory code used by the dataset
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    NSW,
    NT,
    QL,
    SA,
    TA,
    VI,
    WA,
}

impl Region {
    /// All regions in selector order
    pub fn all() -> &'static [Region] {
        &[
            Region::NSW,
            Region::NT,
            Region::QL,
            Region::SA,
            Region::TA,
            Region::VI,
            Region::WA,
        ]
    }

    /// Code as it appears in the `Region` column
    pub fn code(&self) -> &'static str {
        match self {
            Region::NSW => "NSW",
            Region::NT => "NT",
            Region::QL => "QL",
            Region::SA => "SA",
            Region::TA => "TA",
            Region::VI => "VI",
            Region::WA => "WA",
        }
    }

    /// Display label shown next to the radio button
    pub fn label(&self) -> &'static str {
        match self {
            Region::NSW => "Nouvelle-Galles du Sud",
            Region::NT => "Territoire du Nord",
            Region::QL => "Queensland",
            Region::SA => "Australie-Méridionale",
            Region::TA => "Tasmanie",
            Region::VI => "Victoria",
            Region::WA => "Australie-Occidentale",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Region {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Region::all()
            .iter()
            .copied()
            .find(|r| r.code() == code)
            .ok_or_else(|| DatasetError::UnknownRegion(code.to_string()))
    }
}

/// A single wildfire observation
///
/// `month` and `year` are derived from `date` once, in [`WildfireRecord::new`],
/// and never recomputed.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WildfireRecord {
    pub date: NaiveDate,
    pub region: Region,
    /// Estimated burned area
    pub estimated_fire_area: f64,
    /// Number of presumed vegetation-fire pixels
    pub count: u64,
    pub month: Month,
    pub year: i32,
}

impl WildfireRecord {
    pub fn new(date: NaiveDate, region: Region, estimated_fire_area: f64, count: u64) -> Self {
        Self {
            date,
            region,
            estimated_fire_area,
            count,
            month: month_of(date),
            year: date.year(),
        }
    }

    /// English month name, e.g. "January"
    pub fn month_name(&self) -> &'static str {
        self.month.name()
    }
}

fn month_of(date: NaiveDate) -> Month {
    // month() is always in 1..=12
    Month::try_from(date.month() as u8).unwrap_or(Month::January)
}

/// Immutable, ordered collection of wildfire records
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<WildfireRecord>,
}

impl Dataset {
    pub fn new(records: Vec<WildfireRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[WildfireRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years in order of first appearance
    pub fn years(&self) -> Vec<i32> {
        let mut years = Vec::new();
        for record in &self.records {
            if !years.contains(&record.year) {
                years.push(record.year);
            }
        }
        years
    }

    /// Distinct regions in order of first appearance
    pub fn regions(&self) -> Vec<Region> {
        let mut regions = Vec::new();
        for record in &self.records {
            if !regions.contains(&record.region) {
                regions.push(record.region);
            }
        }
        regions
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.records.iter().any(|r| r.year == year)
    }

    /// Records for one region and year, in dataset order
    pub fn select(&self, region: Region, year: i32) -> impl Iterator<Item = &WildfireRecord> {
        self.records
            .iter()
            .filter(move |r| r.region == region)
            .filter(move |r| r.year == year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, region: Region, area: f64, count: u64) -> WildfireRecord {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        WildfireRecord::new(date, region, area, count)
    }

    #[test]
    fn test_derived_fields_follow_date() {
        let r = record("2005-02-14", Region::NSW, 1.5, 3);
        assert_eq!(r.year, 2005);
        assert_eq!(r.month, Month::February);
        assert_eq!(r.month_name(), "February");

        let r = record("2019-12-31", Region::WA, 0.0, 0);
        assert_eq!(r.year, 2019);
        assert_eq!(r.month_name(), "December");
    }

    #[test]
    fn test_region_parse() {
        assert_eq!("NSW".parse::<Region>().unwrap(), Region::NSW);
        assert_eq!(" TA ".parse::<Region>().unwrap(), Region::TA);
        assert!("nsw".parse::<Region>().is_err());
        assert!("ACT".parse::<Region>().is_err());
        assert_eq!(Region::all().len(), 7);
    }

    #[test]
    fn test_years_distinct_first_appearance() {
        let dataset = Dataset::new(vec![
            record("2006-01-01", Region::NSW, 1.0, 1),
            record("2005-01-01", Region::NSW, 1.0, 1),
            record("2006-03-01", Region::WA, 1.0, 1),
            record("2005-07-01", Region::QL, 1.0, 1),
        ]);

        assert_eq!(dataset.years(), vec![2006, 2005]);
        assert_eq!(dataset.regions(), vec![Region::NSW, Region::WA, Region::QL]);
        assert!(dataset.contains_year(2005));
        assert!(!dataset.contains_year(1999));
    }

    #[test]
    fn test_select_filters_region_and_year() {
        let dataset = Dataset::new(vec![
            record("2005-01-01", Region::NSW, 1.0, 1),
            record("2005-01-02", Region::WA, 2.0, 1),
            record("2006-01-01", Region::NSW, 3.0, 1),
            record("2005-02-01", Region::NSW, 4.0, 1),
        ]);

        let areas: Vec<f64> = dataset
            .select(Region::NSW, 2005)
            .map(|r| r.estimated_fire_area)
            .collect();
        assert_eq!(areas, vec![1.0, 4.0]);
        assert_eq!(dataset.select(Region::TA, 2005).count(), 0);
    }
}
