//! Data loading from CSV files

use crate::{is_tournament_year, CountryRecord, DataError, FinalResult, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Validate latitude is in valid range
fn is_valid_latitude(lat: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && lat.is_finite()
}

/// Validate longitude is in valid range
fn is_valid_longitude(lon: f64) -> bool {
    (-180.0..=180.0).contains(&lon) && lon.is_finite()
}

/// Raw country row. The `country` column holds the ISO code in the
/// common public countries dataset; `name` is the display name.
#[derive(Debug, Deserialize)]
struct RawCountry {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(rename = "country", default)]
    code: Option<String>,
}

/// Positions of the named columns in the finals table
struct ResultColumns {
    year: usize,
    winner: usize,
    runner_up: usize,
}

impl ResultColumns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        Ok(Self {
            year: find_column(headers, "Year", &["year"])?,
            winner: find_column(headers, "Winner", &["winner", "winners"])?,
            runner_up: find_column(headers, "Runner-up", &["runnerup", "runnersup"])?,
        })
    }

    fn is_named(&self, idx: usize) -> bool {
        idx == self.year || idx == self.winner || idx == self.runner_up
    }
}

/// "Runners-Up", "runner_up" and "Runner Up" all normalize to the same key
fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

fn find_column(headers: &StringRecord, column: &'static str, accepted: &[&str]) -> Result<usize> {
    headers
        .iter()
        .position(|h| accepted.contains(&normalize_header(h).as_str()))
        .ok_or(DataError::MissingColumn {
            table: "finals",
            column,
        })
}

fn csv_reader<R: Read>(source: R) -> csv::Reader<R> {
    ReaderBuilder::new().trim(Trim::All).from_reader(source)
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn invalid(table: &'static str, line: u64, reason: impl Into<String>) -> DataError {
    DataError::InvalidRow {
        table,
        line,
        reason: reason.into(),
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse the countries table
pub fn read_countries<R: Read>(source: R) -> Result<Vec<CountryRecord>> {
    let mut reader = csv_reader(source);
    // Matched the same way as the finals headers: "Name" and "LATITUDE" work too
    let headers: StringRecord = reader.headers()?.iter().map(normalize_header).collect();

    for column in ["name", "latitude", "longitude"] {
        if !headers.iter().any(|h| h == column) {
            return Err(DataError::MissingColumn {
                table: "countries",
                column,
            });
        }
    }

    let mut countries = Vec::new();

    for record in reader.records() {
        let record = record?;
        let line = line_of(&record);

        let raw: RawCountry = record
            .deserialize(Some(&headers))
            .map_err(|e| invalid("countries", line, e.to_string()))?;

        if raw.name.is_empty() {
            return Err(invalid("countries", line, "empty country name"));
        }
        if !is_valid_latitude(raw.latitude) {
            return Err(invalid(
                "countries",
                line,
                format!("latitude {} out of range", raw.latitude),
            ));
        }
        if !is_valid_longitude(raw.longitude) {
            return Err(invalid(
                "countries",
                line,
                format!("longitude {} out of range", raw.longitude),
            ));
        }

        countries.push(CountryRecord {
            name: raw.name,
            latitude: raw.latitude,
            longitude: raw.longitude,
            code: raw.code.filter(|c| !c.is_empty()),
        });
    }

    Ok(countries)
}

/// Parse the finals table
pub fn read_results<R: Read>(source: R) -> Result<Vec<FinalResult>> {
    let mut reader = csv_reader(source);
    let headers = reader.headers()?.clone();
    let columns = ResultColumns::locate(&headers)?;

    let mut results = Vec::new();

    for record in reader.records() {
        let record = record?;
        let line = line_of(&record);
        let field = |idx: usize| record.get(idx).unwrap_or_default();

        let year: u16 = field(columns.year)
            .parse()
            .map_err(|_| invalid("finals", line, format!("invalid year '{}'", field(columns.year))))?;
        if !is_tournament_year(year) {
            return Err(invalid(
                "finals",
                line,
                format!("{} is not a World Cup tournament year", year),
            ));
        }

        let winner = field(columns.winner);
        let runner_up = field(columns.runner_up);
        if winner.is_empty() || runner_up.is_empty() {
            return Err(invalid("finals", line, "winner and runner-up are required"));
        }

        let extra = headers
            .iter()
            .zip(record.iter())
            .enumerate()
            .filter(|(idx, (_, value))| !columns.is_named(*idx) && !value.is_empty())
            .map(|(_, (header, value))| (header.to_string(), value.to_string()))
            .collect();

        results.push(FinalResult {
            year,
            winner: winner.to_string(),
            runner_up: runner_up.to_string(),
            extra,
        });
    }

    Ok(results)
}

/// Load countries from a CSV file
pub fn load_countries(path: impl AsRef<Path>) -> Result<Vec<CountryRecord>> {
    let path = path.as_ref();
    info!("Loading countries from {:?}", path);

    let countries = read_countries(open(path)?)?;

    info!("Loaded {} countries", countries.len());
    Ok(countries)
}

/// Load World Cup final results from a CSV file
pub fn load_results(path: impl AsRef<Path>) -> Result<Vec<FinalResult>> {
    let path = path.as_ref();
    info!("Loading finals from {:?}", path);

    let results = read_results(open(path)?)?;

    info!("Loaded {} finals", results.len());
    Ok(results)
}
