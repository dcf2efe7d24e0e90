//! HTML rendering of the dashboard layout
//!
//! The page shell lives in `templates/dashboard.html`; the control tree is
//! written into it as pre-rendered markup. Charts are drawn by plotly.js and
//! the page script re-fetches `/api/v1/charts` whenever a control changes.

use askama::Template;

use super::{Layout, Node, Style, AREA_PLOT_ID, COUNT_PLOT_ID, DASHBOARD_TITLE};
use super::{REGION_INPUT_ID, YEAR_INPUT_ID};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Path of the charts endpoint queried by the page
pub const CHARTS_ENDPOINT: &str = "/api/v1/charts";

/// Dashboard page shell
///
/// Element ids are exposed as `data-*` attributes on `<body>` for the page
/// script.
#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardPage<'a> {
    title: &'a str,
    plotly_src: &'a str,
    region_input: &'a str,
    year_input: &'a str,
    area_plot: &'a str,
    count_plot: &'a str,
    charts_endpoint: &'a str,
    /// Already escaped
    controls: String,
}

/// Render the layout into a full HTML document
pub fn render_page(layout: &Layout) -> Result<String, askama::Error> {
    let mut w = Html::new();
    write_node(&mut w, &layout.root);

    DashboardPage {
        title: DASHBOARD_TITLE,
        plotly_src: PLOTLY_CDN,
        region_input: REGION_INPUT_ID,
        year_input: YEAR_INPUT_ID,
        area_plot: AREA_PLOT_ID,
        count_plot: COUNT_PLOT_ID,
        charts_endpoint: CHARTS_ENDPOINT,
        controls: w.finish(),
    }
    .render()
}

struct Html {
    buf: String,
}

impl Html {
    fn new() -> Self {
        Self {
            buf: String::with_capacity(8 * 1024),
        }
    }

    fn push<S: AsRef<str>>(&mut self, s: S) {
        self.buf.push_str(s.as_ref());
    }

    fn attr(&mut self, name: &str, value: &str) {
        self.push(format!(" {}=\"{}\"", name, esc(value)));
    }

    fn style(&mut self, style: &Style) {
        if style.is_empty() {
            return;
        }
        let css = style
            .iter()
            .map(|(k, v)| format!("{}:{}", k, v))
            .collect::<Vec<_>>()
            .join(";");
        self.attr("style", &css);
    }

    fn finish(self) -> String {
        self.buf
    }
}

fn write_node(w: &mut Html, node: &Node) {
    match node {
        Node::Div {
            id,
            style,
            children,
        } => {
            w.push("<div");
            if let Some(id) = id {
                w.attr("id", id);
            }
            w.style(style);
            w.push(">");
            for child in children {
                write_node(w, child);
            }
            w.push("</div>");
        }
        Node::Heading { level, text, style } => {
            let level = (*level).clamp(1, 6);
            w.push(format!("<h{}", level));
            w.style(style);
            w.push(format!(">{}</h{}>", esc(text), level));
        }
        Node::RadioItems {
            id,
            options,
            value,
            inline,
        } => {
            w.push("<div");
            w.attr("id", id);
            w.push(" class=\"radio-items\">");
            for option in options {
                w.push("<label");
                if *inline {
                    w.attr("style", "display:inline-block;margin-right:1em");
                }
                w.push("><input type=\"radio\"");
                w.attr("name", id);
                w.attr("value", &option.value.to_string());
                if &option.value == value {
                    w.push(" checked");
                }
                w.push(format!(">{}</label>", esc(&option.label)));
            }
            w.push("</div>");
        }
        Node::Dropdown { id, options, value } => {
            w.push("<select");
            w.attr("id", id);
            w.push(">");
            // keep the configured value shown even when no option carries it
            if !options.iter().any(|o| &o.value == value) {
                let value = value.to_string();
                w.push("<option");
                w.attr("value", &value);
                w.push(format!(" selected hidden>{}</option>", esc(&value)));
            }
            for option in options {
                w.push("<option");
                w.attr("value", &option.value.to_string());
                if &option.value == value {
                    w.push(" selected");
                }
                w.push(format!(">{}</option>", esc(&option.label)));
            }
            w.push("</select>");
        }
    }
}

fn esc<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutBuilder;

    #[test]
    fn test_esc() {
        assert_eq!(esc("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(esc("l'année"), "l&#39;année");
    }

    #[test]
    fn test_page_contains_controls_and_placeholders() {
        let layout = LayoutBuilder::new(vec![2005, 2006]).build();
        let page = render_page(&layout).unwrap();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<h1 style=\"color:#503D36;font-size:26px;text-align:center\">"));
        assert!(page.contains(DASHBOARD_TITLE));
        assert!(page.contains("<div id=\"plot1\"></div>"));
        assert!(page.contains("<div id=\"plot2\"></div>"));
        assert!(page.contains("<input type=\"radio\" name=\"region\" value=\"NSW\" checked>"));
        assert!(page.contains("<input type=\"radio\" name=\"region\" value=\"WA\">"));
        assert!(page.contains("<option value=\"2005\" selected>2005</option>"));
        assert!(page.contains("<option value=\"2006\">2006</option>"));
        assert!(page.contains("Sélectionnez l&#39;année :"));
        assert!(page.contains("plotly-2.35.2.min.js"));
    }

    #[test]
    fn test_control_markup_is_not_double_escaped() {
        let page = render_page(&LayoutBuilder::new(vec![2005]).build()).unwrap();
        assert!(!page.contains("&lt;div"));
        assert!(!page.contains("&amp;#39;"));
    }

    #[test]
    fn test_script_reads_ids_from_body() {
        let page = render_page(&LayoutBuilder::new(vec![2005]).build()).unwrap();
        assert!(page.contains("data-region-input=\"region\""));
        assert!(page.contains("data-year-input=\"year\""));
        assert!(page.contains("data-area-plot=\"plot1\""));
        assert!(page.contains("data-count-plot=\"plot2\""));
        assert!(page.contains("data-charts-endpoint="));
        assert!(page.contains("Plotly.react(ids.areaPlot"));
    }

    #[test]
    fn test_display_style_on_plot_row() {
        let page = render_page(&LayoutBuilder::new(vec![2005]).build()).unwrap();
        assert!(page.contains("<div style=\"display:flex\"><div id=\"plot1\">"));
    }

    #[test]
    fn test_absent_default_year_stays_selected() {
        let layout = LayoutBuilder::new(vec![2010, 2011]).build();
        let page = render_page(&layout).unwrap();

        assert!(page.contains(
            "<select id=\"year\"><option value=\"2005\" selected hidden>2005</option>"
        ));
        assert!(page.contains("<option value=\"2010\">2010</option>"));
        assert!(!page.contains("value=\"2010\" selected"));
        assert!(!page.contains("value=\"2011\" selected"));
        assert_eq!(layout.year_options(), vec![2010, 2011]);
    }
}
