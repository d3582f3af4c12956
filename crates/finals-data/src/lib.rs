//! World Cup Finals Reference Data
//!
//! Two read-only tables loaded once at startup:
//! - country metadata with map coordinates
//! - one World Cup final result per tournament year
//!
//! plus the win counts derived from the results. Nothing here is mutated
//! after construction, so a `ReferenceData` can be shared freely behind an
//! `Arc` across request handlers.

use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

pub mod loader;
pub mod win_counts;

pub use win_counts::WinCounts;

/// Every year a World Cup final was played (no tournaments in 1942/1946).
pub const TOURNAMENT_YEARS: [u16; 22] = [
    1930, 1934, 1938, 1950, 1954, 1958, 1962, 1966, 1970, 1974, 1978, 1982, 1986, 1990, 1994,
    1998, 2002, 2006, 2010, 2014, 2018, 2022,
];

pub fn is_tournament_year(year: u16) -> bool {
    TOURNAMENT_YEARS.contains(&year)
}

#[derive(Error, Debug)]
pub enum DataError {
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{table} table is missing required column '{column}'")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("{table} table, line {line}: {reason}")]
    InvalidRow {
        table: &'static str,
        line: u64,
        reason: String,
    },
    #[error("{table} table has duplicate key '{key}'")]
    Duplicate { table: &'static str, key: String },
    #[error("{0} table is empty")]
    EmptyTable(&'static str),
    #[error("{0} is not a World Cup tournament year")]
    UnknownYear(u16),
}

pub type Result<T> = std::result::Result<T, DataError>;

/// A country that can be placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryRecord {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// ISO 3166-1 alpha-2 code when the source table carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl CountryRecord {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            code: None,
        }
    }
}

/// The final of one tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalResult {
    pub year: u16,
    pub winner: String,
    pub runner_up: String,
    /// Remaining per-year columns (score, venue, ...) in file order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<(String, String)>,
}

impl FinalResult {
    pub fn new(year: u16, winner: impl Into<String>, runner_up: impl Into<String>) -> Self {
        Self {
            year,
            winner: winner.into(),
            runner_up: runner_up.into(),
            extra: Vec::new(),
        }
    }

    pub fn with_extra(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((column.into(), value.into()));
        self
    }
}

/// Immutable bundle of the reference tables.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    countries: Vec<CountryRecord>,
    results: Vec<FinalResult>,
    win_counts: WinCounts,
}

impl ReferenceData {
    /// Validate the tables and derive win counts.
    ///
    /// Rejects empty tables, duplicate country names, duplicate years and
    /// years outside [`TOURNAMENT_YEARS`]. Winners without a country record
    /// are only logged: they still count, they just cannot be centered on.
    pub fn new(countries: Vec<CountryRecord>, results: Vec<FinalResult>) -> Result<Self> {
        if countries.is_empty() {
            return Err(DataError::EmptyTable("countries"));
        }
        if results.is_empty() {
            return Err(DataError::EmptyTable("finals"));
        }

        for (i, country) in countries.iter().enumerate() {
            if countries[..i].iter().any(|c| c.name == country.name) {
                return Err(DataError::Duplicate {
                    table: "countries",
                    key: country.name.clone(),
                });
            }
        }

        for (i, result) in results.iter().enumerate() {
            if !is_tournament_year(result.year) {
                return Err(DataError::UnknownYear(result.year));
            }
            if results[..i].iter().any(|r| r.year == result.year) {
                return Err(DataError::Duplicate {
                    table: "finals",
                    key: result.year.to_string(),
                });
            }
        }

        let win_counts = WinCounts::from_results(&results);

        for (winner, _) in win_counts.iter() {
            if !countries.iter().any(|c| c.name == winner) {
                warn!("Winner '{}' has no entry in the countries table", winner);
            }
        }

        Ok(Self {
            countries,
            results,
            win_counts,
        })
    }

    /// Load both tables from CSV files on disk.
    pub fn load(countries_path: impl AsRef<Path>, results_path: impl AsRef<Path>) -> Result<Self> {
        let countries = loader::load_countries(countries_path)?;
        let results = loader::load_results(results_path)?;
        let data = Self::new(countries, results)?;

        info!(
            "Reference data ready: {} countries, {} finals, {} distinct winners",
            data.countries.len(),
            data.results.len(),
            data.win_counts.len()
        );

        Ok(data)
    }

    /// Load both tables from in-memory CSV sources.
    pub fn from_readers<C: Read, R: Read>(countries: C, results: R) -> Result<Self> {
        let countries = loader::read_countries(countries)?;
        let results = loader::read_results(results)?;
        Self::new(countries, results)
    }

    pub fn countries(&self) -> &[CountryRecord] {
        &self.countries
    }

    pub fn results(&self) -> &[FinalResult] {
        &self.results
    }

    pub fn win_counts(&self) -> &WinCounts {
        &self.win_counts
    }

    pub fn country(&self, name: &str) -> Option<&CountryRecord> {
        self.countries.iter().find(|c| c.name == name)
    }

    pub fn result_for(&self, year: u16) -> Option<&FinalResult> {
        self.results.iter().find(|r| r.year == year)
    }

    pub fn win_count(&self, country: &str) -> u32 {
        self.win_counts.get(country)
    }

    /// Country names in table order
    pub fn country_names(&self) -> impl Iterator<Item = &str> {
        self.countries.iter().map(|c| c.name.as_str())
    }
}
