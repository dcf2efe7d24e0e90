//! Selection Handler
//!
//! Maps a (region, year) selection to the two dashboard charts:
//!
//! 1. Filter the dataset by region, then by year
//! 2. Group the matching rows by month name
//! 3. Mean of `Estimated_fire_area` per month → pie chart
//! 4. Mean of `Count` per month → bar chart
//!
//! Months come out in grouping-key order (lexicographic by name), not in
//! calendar order.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::spec::{ChartKind, ChartSpec};
use crate::dataset::{Dataset, Region, WildfireRecord};

pub const MONTH_LABEL: &str = "Month";
pub const AREA_LABEL: &str = "Estimated_fire_area";
pub const COUNT_LABEL: &str = "Count";

/// Title of the burned-area pie chart
pub fn area_title(region: Region, year: i32) -> String {
    format!(
        "{} : Moyenne mensuelle de la surface estimée brûlée en {}",
        region, year
    )
}

/// Title of the pixel-count bar chart
pub fn count_title(region: Region, year: i32) -> String {
    format!(
        "{} : Nombre moyen de pixels pour les incendies de végétation présumés en {}",
        region, year
    )
}

/// Running sum for an arithmetic mean
#[derive(Debug, Default, Clone, Copy)]
struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Stateless handler over a shared, read-only dataset
#[derive(Debug, Clone)]
pub struct SelectionHandler {
    dataset: Arc<Dataset>,
}

impl SelectionHandler {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Build both charts for a selection
    ///
    /// Total over every input: a year or region with no rows gives two
    /// charts without any points.
    pub fn handle(&self, region: Region, year: i32) -> (ChartSpec, ChartSpec) {
        let rows: Vec<&WildfireRecord> = self.dataset.select(region, year).collect();

        let area_means = monthly_mean(&rows, |r| r.estimated_fire_area);
        let count_means = monthly_mean(&rows, |r| r.count as f64);

        tracing::debug!(
            region = %region,
            year,
            rows = rows.len(),
            months = area_means.len(),
            "Computed selection charts"
        );

        let pie = ChartSpec::new(
            ChartKind::Pie,
            area_title(region, year),
            MONTH_LABEL,
            AREA_LABEL,
            area_means,
        );
        let bar = ChartSpec::new(
            ChartKind::Bar,
            count_title(region, year),
            MONTH_LABEL,
            COUNT_LABEL,
            count_means,
        );

        (pie, bar)
    }
}

/// Mean of `value` per month name, ordered by month name
fn monthly_mean<F>(rows: &[&WildfireRecord], value: F) -> Vec<(String, f64)>
where
    F: Fn(&WildfireRecord) -> f64,
{
    let mut groups: BTreeMap<&'static str, MeanAccumulator> = BTreeMap::new();
    for &row in rows {
        groups.entry(row.month_name()).or_default().add(value(row));
    }

    groups
        .into_iter()
        .map(|(month, acc)| (month.to_string(), acc.mean()))
        .collect()
}
