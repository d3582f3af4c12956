//! View mode selection: exactly one of the three panels is shown.

use crate::ViewError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    #[serde(rename = "All")]
    All,
    #[serde(rename = "Specific Country")]
    SpecificCountry,
    #[serde(rename = "World Cup Year")]
    WorldCupYear,
}

impl ViewMode {
    pub const MODES: [ViewMode; 3] = [
        ViewMode::All,
        ViewMode::SpecificCountry,
        ViewMode::WorldCupYear,
    ];

    /// Value carried by the radio input
    pub fn value(self) -> &'static str {
        match self {
            ViewMode::All => "All",
            ViewMode::SpecificCountry => "Specific Country",
            ViewMode::WorldCupYear => "World Cup Year",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::All => "a. All World Cup Winners",
            ViewMode::SpecificCountry => "b. Search World Cup Victories by Country",
            ViewMode::WorldCupYear => "c. Search World Cup Result by Year",
        }
    }

    /// Parse a radio value. An unrecognized value means the page and server
    /// disagree on the option list; it is logged and the aggregate view wins.
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|e: ViewError| {
            warn!("{}; falling back to '{}'", e, ViewMode::All);
            ViewMode::All
        })
    }
}

impl FromStr for ViewMode {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewMode::MODES
            .into_iter()
            .find(|mode| mode.value() == s)
            .ok_or_else(|| ViewError::UnknownViewMode(s.to_string()))
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Which panel is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelVisibility {
    pub all: bool,
    pub country: bool,
    pub year: bool,
}

impl PanelVisibility {
    /// CSS `display` values for the all/country/year panels
    pub fn display_styles(&self) -> [&'static str; 3] {
        [self.all, self.country, self.year].map(|visible| if visible { "block" } else { "none" })
    }

    pub fn visible_count(&self) -> usize {
        [self.all, self.country, self.year]
            .iter()
            .filter(|visible| **visible)
            .count()
    }
}

pub fn select_view(mode: ViewMode) -> PanelVisibility {
    match mode {
        ViewMode::All => PanelVisibility {
            all: true,
            country: false,
            year: false,
        },
        ViewMode::SpecificCountry => PanelVisibility {
            all: false,
            country: true,
            year: false,
        },
        ViewMode::WorldCupYear => PanelVisibility {
            all: false,
            country: false,
            year: true,
        },
    }
}
