//! World map of every winner, shaded by number of titles.

use crate::figure::{ChoroplethTrace, ColorScale, MapFigure, RichText, WIN_COUNT_LABEL};
use finals_data::WinCounts;

pub const AGGREGATE_TITLE: &str = "World Map of all World Cup Winners";

/// Built once at startup. Countries that never won have no location in the
/// trace and keep the map's default fill.
pub fn render_all(win_counts: &WinCounts) -> MapFigure {
    let (locations, z): (Vec<String>, Vec<f64>) = win_counts
        .ranked()
        .into_iter()
        .map(|(name, count)| (name.to_string(), f64::from(count)))
        .unzip();

    let trace = ChoroplethTrace::new(locations, z)
        .colorscale(ColorScale::Named("Bluered"))
        .reversed()
        .with_colorbar(WIN_COUNT_LABEL)
        .hover(format!(
            "<b>%{{location}}</b><br>{}: %{{z}}<extra></extra>",
            WIN_COUNT_LABEL
        ));

    MapFigure::new(&RichText::new().plain(AGGREGATE_TITLE)).with_trace(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::reference_data;

    #[test]
    fn test_every_winner_is_shaded_by_count() {
        let data = reference_data();
        let figure = render_all(data.win_counts());

        assert_eq!(figure.title_text(), Some(AGGREGATE_TITLE));
        assert_eq!(figure.data.len(), 1);

        let trace = &figure.data[0];
        assert_eq!(
            trace.locations,
            vec!["Brazil", "Argentina", "France", "Germany", "Italy"]
        );
        assert_eq!(trace.z, vec![3.0, 1.0, 1.0, 1.0, 1.0]);
        assert!(trace.reversescale);
        assert!(trace.showscale);
        assert_eq!(trace.colorscale, ColorScale::Named("Bluered"));
    }

    #[test]
    fn test_values_sum_to_number_of_finals() {
        let data = reference_data();
        let figure = render_all(data.win_counts());
        let total: f64 = figure.data[0].z.iter().sum();
        assert_eq!(total as usize, data.results().len());
    }

    #[test]
    fn test_hover_template() {
        let data = reference_data();
        let figure = render_all(data.win_counts());
        assert_eq!(
            figure.data[0].hovertemplate.as_deref(),
            Some("<b>%{location}</b><br>Num of World Cups Won: %{z}<extra></extra>")
        );
    }
}
