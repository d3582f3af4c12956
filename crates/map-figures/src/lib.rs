//! Map Figures
//!
//! Pure view functions over the immutable reference data:
//! - `selector`: which of the three dashboard panels is visible
//! - `aggregate`: world map of all-time winners
//! - `country`: win count of one country, zoomed onto it
//! - `year`: winner and runner-up of one final
//!
//! Figures serialize to Plotly's `{data, layout}` JSON shape so the page can
//! hand them straight to `Plotly.react`.

use thiserror::Error;

pub mod aggregate;
pub mod country;
pub mod figure;
pub mod selector;
pub mod year;

pub use aggregate::render_all;
pub use country::{render_country, CountryView};
pub use figure::{MapFigure, RichText};
pub use selector::{select_view, PanelVisibility, ViewMode};
pub use year::{parse_year, render_year, Role, YearView};

/// Per-request lookup failures. None of these are fatal; callers show a
/// placeholder figure with the message instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    #[error("Country not found: {0}")]
    CountryNotFound(String),
    #[error("{0} is not a World Cup year")]
    UnknownYear(u16),
    #[error("No final recorded for {0}")]
    YearNotFound(u16),
    #[error("Invalid year: {0}")]
    InvalidYear(String),
    #[error("Unknown view mode: {0}")]
    UnknownViewMode(String),
}

impl ViewError {
    /// Lookup misses, as opposed to malformed input
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ViewError::CountryNotFound(_) | ViewError::UnknownYear(_) | ViewError::YearNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ViewError>;

#[cfg(test)]
pub(crate) mod fixtures {
    use finals_data::{CountryRecord, FinalResult, ReferenceData};

    /// Small but realistic slice of the finals history
    pub fn reference_data() -> ReferenceData {
        let countries = vec![
            CountryRecord::new("Argentina", -38.416097, -63.616672),
            CountryRecord::new("Brazil", -14.235004, -51.92528),
            CountryRecord::new("France", 46.227638, 2.213749),
            CountryRecord::new("Germany", 51.165691, 10.451526),
            CountryRecord::new("Italy", 41.87194, 12.56738),
            CountryRecord::new("Japan", 36.204824, 138.252924),
        ];
        let results = vec![
            FinalResult::new(1970, "Brazil", "Italy"),
            FinalResult::new(1994, "Brazil", "Italy"),
            FinalResult::new(1998, "France", "Brazil"),
            FinalResult::new(2002, "Brazil", "Germany"),
            FinalResult::new(2006, "Italy", "France"),
            FinalResult::new(2014, "Germany", "Argentina"),
            FinalResult::new(2022, "Argentina", "France")
                .with_extra("Score", "3-3 (4-2 pen.)")
                .with_extra("Venue", "Lusail"),
        ];
        ReferenceData::new(countries, results).unwrap()
    }
}
