//! Single-final lookup: winner and runner-up of one tournament.

use crate::figure::{ChoroplethTrace, ColorScale, MapFigure, RichText};
use crate::{Result, ViewError};
use finals_data::{is_tournament_year, FinalResult, ReferenceData};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Winner,
    #[serde(rename = "Runner-up")]
    RunnerUp,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Winner => "Winner",
            Role::RunnerUp => "Runner-up",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Role::Winner => "#636efa",
            Role::RunnerUp => "#EF553B",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleEntry {
    pub role: Role,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearView {
    pub year: u16,
    pub winner: String,
    pub runner_up: String,
    /// Winner first, then runner-up
    pub roles: Vec<RoleEntry>,
    /// Title with `**bold**` markup
    pub caption: String,
    pub figure: MapFigure,
}

/// Parse a year selector value such as `"2022"`.
pub fn parse_year(raw: &str) -> Result<u16> {
    raw.trim()
        .parse()
        .map_err(|_| ViewError::InvalidYear(raw.to_string()))
}

fn role_table(result: &FinalResult) -> Vec<RoleEntry> {
    vec![
        RoleEntry {
            role: Role::Winner,
            country: result.winner.clone(),
        },
        RoleEntry {
            role: Role::RunnerUp,
            country: result.runner_up.clone(),
        },
    ]
}

/// Hover lines: role and country, then every extra column of the final
fn hover_text(entry: &RoleEntry, result: &FinalResult) -> String {
    let mut lines = vec![format!("<b>{}</b>: {}", entry.role.label(), entry.country)];
    lines.extend(
        result
            .extra
            .iter()
            .map(|(column, value)| format!("{}: {}", column, value)),
    );
    lines.join("<br>")
}

pub fn render_year(data: &ReferenceData, year: u16) -> Result<YearView> {
    if !is_tournament_year(year) {
        return Err(ViewError::UnknownYear(year));
    }
    let result = data.result_for(year).ok_or(ViewError::YearNotFound(year))?;

    let roles = role_table(result);

    let title = RichText::new()
        .plain(format!("In {}, ", year))
        .bold(result.winner.as_str())
        .plain(" won the World Cup against ")
        .bold(result.runner_up.as_str())
        .plain(".");

    let figure = roles.iter().fold(MapFigure::new(&title).with_legend(), |figure, entry| {
        figure.with_trace(
            ChoroplethTrace::new(vec![entry.country.clone()], vec![1.0])
                .named(entry.role.label())
                .colorscale(ColorScale::solid(entry.role.color()))
                .text(vec![hover_text(entry, result)])
                .hover("%{text}<extra></extra>"),
        )
    });

    Ok(YearView {
        year,
        winner: result.winner.clone(),
        runner_up: result.runner_up.clone(),
        roles,
        caption: title.to_markdown(),
        figure,
    })
}
