//! Plotly-compatible choropleth figure model

use serde::Serialize;
use std::fmt;

/// Fixed zoom used when centering on a single country
pub const COUNTRY_ZOOM: f64 = 3.0;

/// Hover/legend name for the win count value
pub const WIN_COUNT_LABEL: &str = "Num of World Cups Won";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFigure {
    pub data: Vec<ChoroplethTrace>,
    pub layout: Layout,
}

impl MapFigure {
    pub fn new(title: &RichText) -> Self {
        Self {
            data: Vec::new(),
            layout: Layout {
                title: Some(Title {
                    text: title.to_html(),
                    x: 0.5,
                }),
                geo: Geo::world(),
                showlegend: None,
                annotations: Vec::new(),
            },
        }
    }

    /// Blank world map, shown before the first selection
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            layout: Layout {
                title: None,
                geo: Geo::world(),
                showlegend: None,
                annotations: Vec::new(),
            },
        }
    }

    /// Blank world map carrying a centered message
    pub fn placeholder(message: impl Into<String>) -> Self {
        let mut figure = Self::empty();
        figure.layout.annotations.push(Annotation::centered(message));
        figure
    }

    pub fn with_trace(mut self, trace: ChoroplethTrace) -> Self {
        self.data.push(trace);
        self
    }

    pub fn centered_on(mut self, lat: f64, lon: f64, zoom: f64) -> Self {
        self.layout.geo.center = Some(GeoCenter { lat, lon });
        self.layout.geo.projection = Some(Projection { scale: zoom });
        self
    }

    pub fn with_legend(mut self) -> Self {
        self.layout.showlegend = Some(true);
        self
    }

    pub fn title_text(&self) -> Option<&str> {
        self.layout.title.as_ref().map(|t| t.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoroplethTrace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub locationmode: &'static str,
    pub locations: Vec<String>,
    pub z: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<String>,
    pub colorscale: ColorScale,
    pub reversescale: bool,
    pub showscale: bool,
    pub showlegend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorbar: Option<ColorBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
}

impl ChoroplethTrace {
    /// Country-name choropleth; `locations` and `z` are parallel.
    pub fn new(locations: Vec<String>, z: Vec<f64>) -> Self {
        Self {
            kind: "choropleth",
            locationmode: "country names",
            locations,
            z,
            name: None,
            text: Vec::new(),
            colorscale: ColorScale::Named("Plasma"),
            reversescale: false,
            showscale: false,
            showlegend: false,
            colorbar: None,
            hovertemplate: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self.showlegend = true;
        self
    }

    pub fn colorscale(mut self, scale: ColorScale) -> Self {
        self.colorscale = scale;
        self
    }

    pub fn reversed(mut self) -> Self {
        self.reversescale = true;
        self
    }

    pub fn with_colorbar(mut self, title: impl Into<String>) -> Self {
        self.showscale = true;
        self.colorbar = Some(ColorBar {
            title: ColorBarTitle { text: title.into() },
        });
        self
    }

    pub fn hover(mut self, template: impl Into<String>) -> Self {
        self.hovertemplate = Some(template.into());
        self
    }

    pub fn text(mut self, text: Vec<String>) -> Self {
        self.text = text;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorScale {
    Named(&'static str),
    Stops(Vec<(f64, String)>),
}

impl ColorScale {
    /// Every value gets the same fill
    pub fn solid(color: &str) -> Self {
        ColorScale::Stops(vec![(0.0, color.to_string()), (1.0, color.to_string())])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    pub title: ColorBarTitle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBarTitle {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    pub geo: Geo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
    pub x: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Geo {
    pub scope: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<Projection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<GeoCenter>,
}

impl Geo {
    pub fn world() -> Self {
        Self {
            scope: "world",
            projection: None,
            center: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    pub scale: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoCenter {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub showarrow: bool,
    pub xref: &'static str,
    pub yref: &'static str,
    pub x: f64,
    pub y: f64,
}

impl Annotation {
    pub fn centered(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            showarrow: false,
            xref: "paper",
            yref: "paper",
            x: 0.5,
            y: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Span {
    Plain(String),
    Bold(String),
}

/// Title text with bold runs. Renders as `**bold**` markup for captions and
/// as `<b>bold</b>` for the figure itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichText {
    spans: Vec<Span>,
}

impl RichText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(mut self, text: impl Into<String>) -> Self {
        self.spans.push(Span::Plain(text.into()));
        self
    }

    pub fn bold(mut self, text: impl Into<String>) -> Self {
        self.spans.push(Span::Bold(text.into()));
        self
    }

    pub fn to_markdown(&self) -> String {
        self.to_string()
    }

    pub fn to_html(&self) -> String {
        self.spans
            .iter()
            .map(|span| match span {
                Span::Plain(text) => escape_html(text),
                Span::Bold(text) => format!("<b>{}</b>", escape_html(text)),
            })
            .collect()
    }
}

impl fmt::Display for RichText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for span in &self.spans {
            match span {
                Span::Plain(text) => write!(f, "{}", text)?,
                Span::Bold(text) => write!(f, "**{}**", text)?,
            }
        }
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
