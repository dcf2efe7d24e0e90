//! Chart specifications
//!
//! Renderer-independent description of a chart, plus conversion to the
//! plotly.js figure format consumed by the dashboard page.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Kind of chart to draw
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Bar,
}

/// A chart ready to be rendered
///
/// `categories` and `values` always have the same length; entry `i` of one
/// belongs to entry `i` of the other.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    /// Name of the categorical axis / slice labels
    pub category_label: String,
    /// Name of the aggregated value
    pub value_label: String,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSpec {
    pub fn new(
        kind: ChartKind,
        title: impl Into<String>,
        category_label: impl Into<String>,
        value_label: impl Into<String>,
        points: Vec<(String, f64)>,
    ) -> Self {
        let (categories, values) = points.into_iter().unzip();
        Self {
            kind,
            title: title.into(),
            category_label: category_label.into(),
            value_label: value_label.into(),
            categories,
            values,
        }
    }

    /// Number of slices or bars
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value for a category, if present
    pub fn value_of(&self, category: &str) -> Option<f64> {
        self.categories
            .iter()
            .position(|c| c == category)
            .and_then(|idx| self.values.get(idx).copied())
    }

    /// Iterate over (category, value) pairs
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> {
        self.categories
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    /// Convert into a plotly.js figure (`{"data": [...], "layout": {...}}`)
    pub fn to_plotly(&self) -> Value {
        match self.kind {
            ChartKind::Pie => json!({
                "data": [{
                    "type": "pie",
                    "labels": self.categories,
                    "values": self.values,
                    "name": self.value_label,
                }],
                "layout": {
                    "title": { "text": self.title },
                    "legend": { "title": { "text": self.category_label } },
                },
            }),
            ChartKind::Bar => json!({
                "data": [{
                    "type": "bar",
                    "x": self.categories,
                    "y": self.values,
                    "name": self.value_label,
                }],
                "layout": {
                    "title": { "text": self.title },
                    "xaxis": { "title": { "text": self.category_label } },
                    "yaxis": { "title": { "text": self.value_label } },
                },
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(kind: ChartKind) -> ChartSpec {
        ChartSpec::new(
            kind,
            "title",
            "Month",
            "Count",
            vec![("April".to_string(), 2.0), ("June".to_string(), 5.5)],
        )
    }

    #[test]
    fn test_points_stay_aligned() {
        let spec = sample(ChartKind::Bar);
        assert_eq!(spec.len(), 2);
        assert_eq!(spec.value_of("June"), Some(5.5));
        assert_eq!(spec.value_of("May"), None);

        let points: Vec<_> = spec.points().collect();
        assert_eq!(points, vec![("April", 2.0), ("June", 5.5)]);
    }

    #[test]
    fn test_value_of_with_misaligned_fields() {
        let mut spec = sample(ChartKind::Pie);
        spec.values.truncate(1);

        assert_eq!(spec.value_of("April"), Some(2.0));
        assert_eq!(spec.value_of("June"), None);
    }

    #[test]
    fn test_pie_figure() {
        let figure = sample(ChartKind::Pie).to_plotly();
        assert_eq!(figure["data"][0]["type"], "pie");
        assert_eq!(figure["data"][0]["labels"][1], "June");
        assert_eq!(figure["data"][0]["values"][0], 2.0);
        assert_eq!(figure["layout"]["title"]["text"], "title");
    }

    #[test]
    fn test_bar_figure() {
        let figure = sample(ChartKind::Bar).to_plotly();
        assert_eq!(figure["data"][0]["type"], "bar");
        assert_eq!(figure["data"][0]["x"][0], "April");
        assert_eq!(figure["data"][0]["y"][1], 5.5);
        assert_eq!(figure["layout"]["xaxis"]["title"]["text"], "Month");
        assert_eq!(figure["layout"]["yaxis"]["title"]["text"], "Count");
    }

    #[test]
    fn test_empty_figure_has_no_points() {
        let spec = ChartSpec::new(ChartKind::Pie, "t", "Month", "Estimated_fire_area", vec![]);
        assert!(spec.is_empty());

        let figure = spec.to_plotly();
        assert_eq!(figure["data"][0]["values"], json!([]));
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(serde_json::to_string(&ChartKind::Pie).unwrap(), "\"pie\"");
        assert_eq!(serde_json::to_string(&ChartKind::Bar).unwrap(), "\"bar\"");
    }
}
