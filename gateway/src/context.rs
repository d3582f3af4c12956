//! Immutable application context, built once at startup

use chrono::{DateTime, Utc};
use finals_data::ReferenceData;
use map_figures::{render_all, MapFigure};

pub struct AppContext {
    pub data: ReferenceData,
    /// Aggregate map, never recomputed
    pub all_figure: MapFigure,
    pub started_at: DateTime<Utc>,
}

impl AppContext {
    pub fn new(data: ReferenceData) -> Self {
        let all_figure = render_all(data.win_counts());
        Self {
            data,
            all_figure,
            started_at: Utc::now(),
        }
    }
}
