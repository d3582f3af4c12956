//! Callback registry
//!
//! Maps each dashboard input to a pure function of (context, new value) that
//! returns the new view-state for its outputs. The page posts every input
//! change to `/api/v1/callback`; dispatch is synchronous.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

use crate::context::AppContext;
use map_figures::{
    parse_year, render_country, render_year, select_view, MapFigure, PanelVisibility, ViewMode,
};

/// Panel containers toggled by the view selector, in all/country/year order
pub const PANEL_IDS: [&str; 3] = ["all-countries-div", "country-div", "year-div"];

pub const COUNTRY_GRAPH_ID: &str = "graph2";
pub const YEAR_GRAPH_ID: &str = "graph3";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputId {
    RadioSelection,
    CountryDropdown,
    YearDropdown,
}

impl InputId {
    pub fn id(self) -> &'static str {
        match self {
            InputId::RadioSelection => "radio-selection",
            InputId::CountryDropdown => "country-dropdown",
            InputId::YearDropdown => "year-dropdown",
        }
    }
}

impl FromStr for InputId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            InputId::RadioSelection,
            InputId::CountryDropdown,
            InputId::YearDropdown,
        ]
        .into_iter()
        .find(|input| input.id() == s)
        .ok_or_else(|| format!("Unknown callback input: {}", s))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PanelStyle {
    pub id: &'static str,
    pub display: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CallbackOutput {
    Panels {
        mode: ViewMode,
        visibility: PanelVisibility,
        styles: Vec<PanelStyle>,
    },
    Figure {
        target: &'static str,
        figure: MapFigure,
        #[serde(skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
        /// User-visible message when the lookup failed
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

pub type Callback = fn(&AppContext, &str) -> CallbackOutput;

pub struct CallbackRegistry {
    handlers: HashMap<InputId, Callback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// The three dashboard callbacks
    pub fn dashboard() -> Self {
        let mut registry = Self::new();
        registry.register(InputId::RadioSelection, on_view_mode);
        registry.register(InputId::CountryDropdown, on_country);
        registry.register(InputId::YearDropdown, on_year);
        registry
    }

    pub fn register(&mut self, input: InputId, callback: Callback) {
        self.handlers.insert(input, callback);
    }

    /// `None` when nothing is registered for `input`
    pub fn dispatch(&self, ctx: &AppContext, input: InputId, value: &str) -> Option<CallbackOutput> {
        let callback = self.handlers.get(&input)?;
        debug!("Callback {} <- {:?}", input.id(), value);
        Some(callback(ctx, value))
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::dashboard()
    }
}

fn on_view_mode(_ctx: &AppContext, value: &str) -> CallbackOutput {
    let mode = ViewMode::parse_or_default(value);
    let visibility = select_view(mode);
    let styles = PANEL_IDS
        .iter()
        .zip(visibility.display_styles())
        .map(|(&id, display)| PanelStyle { id, display })
        .collect();

    CallbackOutput::Panels {
        mode,
        visibility,
        styles,
    }
}

fn on_country(ctx: &AppContext, value: &str) -> CallbackOutput {
    match render_country(&ctx.data, value) {
        Ok(view) => CallbackOutput::Figure {
            target: COUNTRY_GRAPH_ID,
            figure: view.figure,
            caption: Some(view.caption),
            error: None,
        },
        Err(e) => lookup_failed(COUNTRY_GRAPH_ID, e),
    }
}

fn on_year(ctx: &AppContext, value: &str) -> CallbackOutput {
    match parse_year(value).and_then(|year| render_year(&ctx.data, year)) {
        Ok(view) => CallbackOutput::Figure {
            target: YEAR_GRAPH_ID,
            figure: view.figure,
            caption: Some(view.caption),
            error: None,
        },
        Err(e) => lookup_failed(YEAR_GRAPH_ID, e),
    }
}

fn lookup_failed(target: &'static str, error: map_figures::ViewError) -> CallbackOutput {
    debug!("Lookup for {} failed: {}", target, error);
    let message = error.to_string();
    CallbackOutput::Figure {
        target,
        figure: MapFigure::placeholder(message.clone()),
        caption: None,
        error: Some(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::fixtures::shipped_context;

    fn figure_parts(output: CallbackOutput) -> (&'static str, MapFigure, Option<String>, Option<String>) {
        match output {
            CallbackOutput::Figure {
                target,
                figure,
                caption,
                error,
            } => (target, figure, caption, error),
            other => panic!("expected a figure, got {:?}", other),
        }
    }

    #[test]
    fn test_input_ids_round_trip() {
        for input in [
            InputId::RadioSelection,
            InputId::CountryDropdown,
            InputId::YearDropdown,
        ] {
            assert_eq!(input.id().parse::<InputId>(), Ok(input));
        }
        assert!("graph1".parse::<InputId>().is_err());
    }

    #[test]
    fn test_view_mode_callback() {
        let ctx = shipped_context();
        let registry = CallbackRegistry::dashboard();

        let output = registry
            .dispatch(&ctx, InputId::RadioSelection, "World Cup Year")
            .unwrap();
        match output {
            CallbackOutput::Panels { mode, styles, .. } => {
                assert_eq!(mode, ViewMode::WorldCupYear);
                let displays: Vec<_> = styles.iter().map(|s| (s.id, s.display)).collect();
                assert_eq!(
                    displays,
                    vec![
                        ("all-countries-div", "none"),
                        ("country-div", "none"),
                        ("year-div", "block"),
                    ]
                );
            }
            other => panic!("expected panels, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_view_mode_shows_all() {
        let ctx = shipped_context();
        let registry = CallbackRegistry::dashboard();
        match registry.dispatch(&ctx, InputId::RadioSelection, "Everything").unwrap() {
            CallbackOutput::Panels { mode, visibility, .. } => {
                assert_eq!(mode, ViewMode::All);
                assert!(visibility.all);
            }
            other => panic!("expected panels, got {:?}", other),
        }
    }

    #[test]
    fn test_country_callback() {
        let ctx = shipped_context();
        let registry = CallbackRegistry::dashboard();
        let output = registry
            .dispatch(&ctx, InputId::CountryDropdown, "Brazil")
            .unwrap();
        let (target, _, caption, error) = figure_parts(output);

        assert_eq!(target, "graph2");
        assert_eq!(caption.as_deref(), Some("**Brazil** has won **5** World Cups."));
        assert_eq!(error, None);
    }

    #[test]
    fn test_unknown_country_is_a_placeholder() {
        let ctx = shipped_context();
        let registry = CallbackRegistry::dashboard();
        let output = registry
            .dispatch(&ctx, InputId::CountryDropdown, "Atlantis")
            .unwrap();
        let (target, figure, caption, error) = figure_parts(output);

        assert_eq!(target, "graph2");
        assert!(figure.data.is_empty());
        assert_eq!(caption, None);
        assert_eq!(error.as_deref(), Some("Country not found: Atlantis"));
    }

    #[test]
    fn test_year_callback() {
        let ctx = shipped_context();
        let registry = CallbackRegistry::dashboard();

        let (target, _, caption, _) =
            figure_parts(registry.dispatch(&ctx, InputId::YearDropdown, "2022").unwrap());
        assert_eq!(target, "graph3");
        assert_eq!(
            caption.as_deref(),
            Some("In 2022, **Argentina** won the World Cup against **France**.")
        );

        let (_, _, _, error) =
            figure_parts(registry.dispatch(&ctx, InputId::YearDropdown, "1942").unwrap());
        assert_eq!(error.as_deref(), Some("1942 is not a World Cup year"));

        let (_, _, _, error) =
            figure_parts(registry.dispatch(&ctx, InputId::YearDropdown, "soon").unwrap());
        assert_eq!(error.as_deref(), Some("Invalid year: soon"));
    }

    #[test]
    fn test_unregistered_input() {
        let ctx = shipped_context();
        let registry = CallbackRegistry::new();
        assert!(registry
            .dispatch(&ctx, InputId::CountryDropdown, "Brazil")
            .is_none());
    }
}
