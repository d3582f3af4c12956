use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::callbacks::{CallbackOutput, CallbackRegistry, InputId};
use crate::context::AppContext;
use finals_data::TOURNAMENT_YEARS;
use map_figures::{
    parse_year, render_country, render_year, CountryView, MapFigure, ViewError, ViewMode, YearView,
};

const INDEX_HTML: &str = include_str!("../static/index.html");

pub const PAGE_HEADING: &str = "World Cup Finals Data";
const DEFAULT_COUNTRY: &str = "Brazil";
const DEFAULT_YEAR: u16 = 2022;

#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<AppContext>,
    pub callbacks: Arc<CallbackRegistry>,
}

impl AppState {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx: Arc::new(ctx),
            callbacks: Arc::new(CallbackRegistry::dashboard()),
        }
    }
}

// ========== Request/Response Types ==========

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

impl From<ViewError> for ErrorResponse {
    fn from(e: ViewError) -> Self {
        Self {
            error: e.to_string(),
        }
    }
}

fn view_error(e: ViewError) -> ApiError {
    let status = if e.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(e.into()))
}

#[derive(Serialize)]
pub struct OptionItem {
    pub label: String,
    pub value: String,
}

#[derive(Serialize)]
pub struct Defaults {
    pub mode: ViewMode,
    pub country: String,
    pub year: String,
}

#[derive(Serialize)]
pub struct LayoutResponse {
    pub heading: &'static str,
    pub modes: Vec<OptionItem>,
    pub countries: Vec<OptionItem>,
    pub years: Vec<OptionItem>,
    pub defaults: Defaults,
    pub empty_figure: MapFigure,
}

#[derive(Deserialize)]
pub struct CallbackRequest {
    pub input: String,
    pub value: String,
}

// ========== Route Handlers ==========

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let ctx = &state.ctx;
    Json(serde_json::json!({
        "status": "healthy",
        "service": "worldcup-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "countries": ctx.data.countries().len(),
        "finals": ctx.data.results().len(),
        "started_at": ctx.started_at.to_rfc3339(),
    }))
}

/// Static page structure: selector options and initial values
async fn layout(State(state): State<AppState>) -> Json<LayoutResponse> {
    let data = &state.ctx.data;

    let modes = ViewMode::MODES
        .into_iter()
        .map(|mode| OptionItem {
            label: mode.label().to_string(),
            value: mode.value().to_string(),
        })
        .collect();

    let countries = data
        .country_names()
        .map(|name| OptionItem {
            label: name.to_string(),
            value: name.to_string(),
        })
        .collect();

    let years = TOURNAMENT_YEARS
        .iter()
        .map(|year| OptionItem {
            label: year.to_string(),
            value: year.to_string(),
        })
        .collect();

    let country = if data.country(DEFAULT_COUNTRY).is_some() {
        DEFAULT_COUNTRY
    } else {
        data.country_names().next().unwrap_or_default()
    };

    Json(LayoutResponse {
        heading: PAGE_HEADING,
        modes,
        countries,
        years,
        defaults: Defaults {
            mode: ViewMode::All,
            country: country.to_string(),
            year: DEFAULT_YEAR.to_string(),
        },
        empty_figure: MapFigure::empty(),
    })
}

async fn all_figure(State(state): State<AppState>) -> Json<MapFigure> {
    Json(state.ctx.all_figure.clone())
}

async fn country_figure(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CountryView>, ApiError> {
    render_country(&state.ctx.data, &name)
        .map(Json)
        .map_err(view_error)
}

async fn year_figure(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> Result<Json<YearView>, ApiError> {
    parse_year(&year)
        .and_then(|year| render_year(&state.ctx.data, year))
        .map(Json)
        .map_err(view_error)
}

/// Dispatch one input change through the callback registry
async fn callback(
    State(state): State<AppState>,
    Json(req): Json<CallbackRequest>,
) -> Result<Json<CallbackOutput>, ApiError> {
    let input: InputId = req
        .input
        .parse()
        .map_err(|e: String| api_error(StatusCode::BAD_REQUEST, e))?;

    state
        .callbacks
        .dispatch(&state.ctx, input, &req.value)
        .map(Json)
        .ok_or_else(|| {
            api_error(
                StatusCode::BAD_REQUEST,
                format!("No callback registered for {}", input.id()),
            )
        })
}

// ========== Router ==========

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/layout", get(layout))
        .route("/figures/all", get(all_figure))
        .route("/figures/country/:name", get(country_figure))
        .route("/figures/year/:year", get(year_figure))
        .route("/callback", post(callback))
        .with_state(state.clone());

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .with_state(state)
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::fixtures::shipped_context;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new(shipped_context()))
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        read_json(response).await
    }

    async fn post_callback(input: &str, value: &str) -> (StatusCode, serde_json::Value) {
        let body = serde_json::json!({ "input": input, "value": value }).to_string();
        let response = app()
            .oneshot(
                Request::post("/api/v1/callback")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        read_json(response).await
    }

    async fn read_json(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_index_page() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("radio-selection"));
        assert!(html.contains("const API = \"/api/v1\""));
        assert!(html.contains("fetchJson(\"/callback\""));
        assert!(html.contains("Plotly.Plots.resize"));
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["finals"], 22);
    }

    #[tokio::test]
    async fn test_layout() {
        let (status, body) = get_json("/api/v1/layout").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["heading"], PAGE_HEADING);
        assert_eq!(body["modes"].as_array().unwrap().len(), 3);
        assert_eq!(body["modes"][1]["value"], "Specific Country");
        assert_eq!(body["years"].as_array().unwrap().len(), 22);
        assert_eq!(body["years"][0]["value"], "1930");
        assert_eq!(body["defaults"]["mode"], "All");
        assert_eq!(body["defaults"]["country"], "Brazil");
        assert_eq!(body["defaults"]["year"], "2022");
    }

    #[tokio::test]
    async fn test_all_figure() {
        let (status, body) = get_json("/api/v1/figures/all").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["layout"]["title"]["text"], "World Map of all World Cup Winners");
        assert_eq!(body["data"][0]["locations"][0], "Brazil");
    }

    #[tokio::test]
    async fn test_country_figure() {
        let (status, body) = get_json("/api/v1/figures/country/Brazil").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["win_count"], 5);

        let (status, body) = get_json("/api/v1/figures/country/United%20States").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["win_count"], 0);

        let (status, body) = get_json("/api/v1/figures/country/Atlantis").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Country not found: Atlantis");
    }

    #[tokio::test]
    async fn test_year_figure() {
        let (status, body) = get_json("/api/v1/figures/year/2022").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["caption"],
            "In 2022, **Argentina** won the World Cup against **France**."
        );
        assert_eq!(body["roles"][0]["role"], "Winner");
        assert_eq!(body["roles"][1]["role"], "Runner-up");

        let (status, _) = get_json("/api/v1/figures/year/1946").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get_json("/api/v1/figures/year/latest").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_callback_dispatch() {
        let (status, body) = post_callback("radio-selection", "Specific Country").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "panels");
        assert_eq!(body["styles"][1]["id"], "country-div");
        assert_eq!(body["styles"][1]["display"], "block");

        let (status, body) = post_callback("country-dropdown", "Atlantis").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "figure");
        assert_eq!(body["target"], "graph2");
        assert_eq!(body["error"], "Country not found: Atlantis");

        let (status, body) = post_callback("graph1", "x").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Unknown callback input: graph1");
    }
}
