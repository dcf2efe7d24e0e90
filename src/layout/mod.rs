//! Dashboard Layout
//!
//! Static control tree of the dashboard page: title, region radio buttons,
//! year dropdown and the two chart placeholders. The tree is built once at
//! startup from the dataset's distinct years and never mutated afterwards;
//! only the contents of `plot1` and `plot2` change on the client.

pub mod html;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::dataset::{Dataset, Region};

pub const DASHBOARD_TITLE: &str = "Tableau de bord des incendies en Australie";
pub const REGION_PROMPT: &str = "Sélectionnez la région :";
pub const YEAR_PROMPT: &str = "Sélectionnez l'année :";

/// Element ids the page script binds to
pub const REGION_INPUT_ID: &str = "region";
pub const YEAR_INPUT_ID: &str = "year";
pub const AREA_PLOT_ID: &str = "plot1";
pub const COUNT_PLOT_ID: &str = "plot2";

pub const DEFAULT_REGION: Region = Region::NSW;
pub const DEFAULT_YEAR: i32 = 2005;

/// Inline CSS declarations, keyed by property name
pub type Style = BTreeMap<String, String>;

fn style(declarations: &[(&str, &str)]) -> Style {
    declarations
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Value carried by a selector option
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Text(String),
    Number(i32),
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Text(s) => f.write_str(s),
            OptionValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// One choice of a radio group or dropdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: OptionValue,
}

/// Node of the control tree
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Div {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        style: Style,
        children: Vec<Node>,
    },
    Heading {
        level: u8,
        text: String,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        style: Style,
    },
    RadioItems {
        id: String,
        options: Vec<SelectOption>,
        value: OptionValue,
        inline: bool,
    },
    Dropdown {
        id: String,
        options: Vec<SelectOption>,
        value: OptionValue,
    },
}

impl Node {
    fn div(children: Vec<Node>) -> Self {
        Node::Div {
            id: None,
            style: Style::new(),
            children,
        }
    }

    /// Empty container that receives a chart on the client
    fn placeholder(id: &str) -> Self {
        Node::Div {
            id: Some(id.to_string()),
            style: Style::new(),
            children: Vec::new(),
        }
    }

    fn heading(level: u8, text: &str, style: Style) -> Self {
        Node::Heading {
            level,
            text: text.to_string(),
            style,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Node::Div { id, .. } => id.as_deref(),
            Node::RadioItems { id, .. } | Node::Dropdown { id, .. } => Some(id.as_str()),
            Node::Heading { .. } => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Div { children, .. } => children,
            _ => &[],
        }
    }

    /// Depth-first search for a node by id
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }
}

/// The complete dashboard layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub root: Node,
}

impl Layout {
    /// Layout with default selection for the years of a dataset
    pub fn for_dataset(dataset: &Dataset) -> Self {
        LayoutBuilder::new(dataset.years()).build()
    }

    pub fn find(&self, id: &str) -> Option<&Node> {
        self.root.find(id)
    }

    /// Years offered by the year dropdown
    pub fn year_options(&self) -> Vec<i32> {
        match self.find(YEAR_INPUT_ID) {
            Some(Node::Dropdown { options, .. }) => options
                .iter()
                .filter_map(|o| match o.value {
                    OptionValue::Number(year) => Some(year),
                    OptionValue::Text(_) => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Builder for [`Layout`]
#[derive(Debug, Clone)]
pub struct LayoutBuilder {
    years: Vec<i32>,
    default_region: Region,
    default_year: i32,
}

impl LayoutBuilder {
    /// `years` become the dropdown options; duplicates are dropped
    pub fn new(years: Vec<i32>) -> Self {
        let mut distinct = Vec::with_capacity(years.len());
        for year in years {
            if !distinct.contains(&year) {
                distinct.push(year);
            }
        }

        Self {
            years: distinct,
            default_region: DEFAULT_REGION,
            default_year: DEFAULT_YEAR,
        }
    }

    pub fn default_region(mut self, region: Region) -> Self {
        self.default_region = region;
        self
    }

    /// Not checked against the available years
    pub fn default_year(mut self, year: i32) -> Self {
        self.default_year = year;
        self
    }

    pub fn build(self) -> Layout {
        if !self.years.contains(&self.default_year) {
            tracing::warn!(
                default_year = self.default_year,
                "Default year is not present in the dataset"
            );
        }

        let region_options = Region::all()
            .iter()
            .map(|r| SelectOption {
                label: r.label().to_string(),
                value: OptionValue::Text(r.code().to_string()),
            })
            .collect();

        let year_options = self
            .years
            .iter()
            .map(|year| SelectOption {
                label: year.to_string(),
                value: OptionValue::Number(*year),
            })
            .collect();

        let prompt_style = style(&[("margin-right", "2em")]);

        let selectors = Node::div(vec![
            Node::heading(2, REGION_PROMPT, prompt_style.clone()),
            Node::RadioItems {
                id: REGION_INPUT_ID.to_string(),
                options: region_options,
                value: OptionValue::Text(self.default_region.code().to_string()),
                inline: true,
            },
            Node::div(vec![
                Node::heading(2, YEAR_PROMPT, prompt_style),
                Node::Dropdown {
                    id: YEAR_INPUT_ID.to_string(),
                    options: year_options,
                    value: OptionValue::Number(self.default_year),
                },
            ]),
        ]);

        let plots = Node::Div {
            id: None,
            style: style(&[("display", "flex")]),
            children: vec![
                Node::placeholder(AREA_PLOT_ID),
                Node::placeholder(COUNT_PLOT_ID),
            ],
        };

        let root = Node::div(vec![
            Node::heading(
                1,
                DASHBOARD_TITLE,
                style(&[
                    ("text-align", "center"),
                    ("color", "#503D36"),
                    ("font-size", "26px"),
                ]),
            ),
            Node::div(vec![selectors, plots]),
        ]);

        Layout { root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_options_are_distinct_years() {
        let layout = LayoutBuilder::new(vec![2005, 2006, 2005, 2007, 2006]).build();
        assert_eq!(layout.year_options(), vec![2005, 2006, 2007]);
    }

    #[test]
    fn test_year_options_match_dataset() {
        let csv_data = "Date,Region,Estimated_fire_area,Count
1/1/2007,NSW,1.0,1
1/1/2005,WA,1.0,1
3/1/2007,QL,1.0,1";
        let (dataset, _) = crate::dataset::parse_str(csv_data).unwrap();

        let layout = Layout::for_dataset(&dataset);
        assert_eq!(layout.year_options(), dataset.years());
        assert_eq!(layout.year_options(), vec![2007, 2005]);
    }

    #[test]
    fn test_default_selection() {
        let layout = LayoutBuilder::new(vec![2005]).build();

        match layout.find(REGION_INPUT_ID) {
            Some(Node::RadioItems { value, options, inline, .. }) => {
                assert_eq!(value, &OptionValue::Text("NSW".to_string()));
                assert_eq!(options.len(), 7);
                assert_eq!(options[0].label, "Nouvelle-Galles du Sud");
                assert_eq!(options[6].value, OptionValue::Text("WA".to_string()));
                assert!(*inline);
            }
            other => panic!("unexpected region node: {:?}", other),
        }

        match layout.find(YEAR_INPUT_ID) {
            Some(Node::Dropdown { value, .. }) => {
                assert_eq!(value, &OptionValue::Number(2005));
            }
            other => panic!("unexpected year node: {:?}", other),
        }
    }

    #[test]
    fn test_custom_defaults() {
        let layout = LayoutBuilder::new(vec![2010])
            .default_region(Region::VI)
            .default_year(2010)
            .build();

        match layout.find(YEAR_INPUT_ID) {
            Some(Node::Dropdown { value, .. }) => assert_eq!(value, &OptionValue::Number(2010)),
            other => panic!("unexpected year node: {:?}", other),
        }
        match layout.find(REGION_INPUT_ID) {
            Some(Node::RadioItems { value, .. }) => {
                assert_eq!(value, &OptionValue::Text("VI".to_string()))
            }
            other => panic!("unexpected region node: {:?}", other),
        }
    }

    #[test]
    fn test_plot_placeholders_are_empty() {
        let layout = LayoutBuilder::new(vec![2005]).build();

        for id in [AREA_PLOT_ID, COUNT_PLOT_ID] {
            let node = layout.find(id).unwrap();
            assert!(matches!(node, Node::Div { .. }));
            assert!(node.children().is_empty());
        }
    }

    #[test]
    fn test_layout_serialization() {
        let layout = LayoutBuilder::new(vec![2005, 2006]).build();
        let json = serde_json::to_value(&layout).unwrap();

        assert_eq!(json["root"]["type"], "div");
        assert_eq!(json["root"]["children"][0]["type"], "heading");
        assert_eq!(json["root"]["children"][0]["text"], DASHBOARD_TITLE);
        assert_eq!(json["root"]["children"][0]["style"]["color"], "#503D36");

        let selectors = &json["root"]["children"][1]["children"][0];
        assert_eq!(selectors["children"][1]["type"], "radio_items");
        assert_eq!(selectors["children"][1]["value"], "NSW");
        assert_eq!(selectors["children"][2]["children"][1]["options"][1]["value"], 2006);
    }
}
