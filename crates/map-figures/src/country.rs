//! Single-country lookup: how many titles, zoomed onto the country.

use crate::figure::{ChoroplethTrace, ColorScale, MapFigure, RichText, COUNTRY_ZOOM, WIN_COUNT_LABEL};
use crate::{Result, ViewError};
use finals_data::ReferenceData;
use serde::Serialize;

const COUNTRY_FILL: &str = "#636efa";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryView {
    pub country: String,
    pub win_count: u32,
    /// Title with `**bold**` markup
    pub caption: String,
    pub figure: MapFigure,
}

/// Fails with `CountryNotFound` when the name is not in the countries table.
/// A country with no recorded wins is not an error: it has won 0.
pub fn render_country(data: &ReferenceData, country_name: &str) -> Result<CountryView> {
    let country = data
        .country(country_name)
        .ok_or_else(|| ViewError::CountryNotFound(country_name.to_string()))?;

    let win_count = data.win_count(&country.name);

    let title = RichText::new()
        .bold(country.name.as_str())
        .plain(" has won ")
        .bold(win_count.to_string())
        .plain(" World Cups.");

    let trace = ChoroplethTrace::new(vec![country.name.clone()], vec![f64::from(win_count)])
        .colorscale(ColorScale::solid(COUNTRY_FILL))
        .hover(format!(
            "<b>%{{location}}</b><br>{}: %{{z}}<extra></extra>",
            WIN_COUNT_LABEL
        ));

    let figure = MapFigure::new(&title)
        .with_trace(trace)
        .centered_on(country.latitude, country.longitude, COUNTRY_ZOOM);

    Ok(CountryView {
        country: country.name.clone(),
        win_count,
        caption: title.to_markdown(),
        figure,
    })
}
