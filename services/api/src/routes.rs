use crate::infra::{parse_optional_date, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use cspa::error::AppError;
use cspa::{BulletinCell, CalculationResult, Category, Country};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct CalculateRequest {
    #[serde(default)]
    pub(crate) birth_date: Option<String>,
    #[serde(default)]
    pub(crate) priority_date: Option<String>,
    #[serde(default)]
    pub(crate) approval_date: Option<String>,
    #[serde(default)]
    pub(crate) category: Option<String>,
    #[serde(default)]
    pub(crate) country: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CalculateResponse {
    pub(crate) category: Category,
    pub(crate) country: Country,
    #[serde(flatten)]
    pub(crate) result: CalculationResult,
    pub(crate) error_message: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BulletinResponse {
    pub(crate) loaded: bool,
    pub(crate) categories: Vec<BulletinCategoryView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct BulletinCategoryView {
    pub(crate) category: Category,
    pub(crate) cutoffs: Vec<CutoffView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CutoffView {
    pub(crate) country: Country,
    pub(crate) cutoff_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) unparsed: Option<String>,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/bulletin", get(bulletin_endpoint))
        .route("/api/v1/cspa/calculate", post(calculate_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let bulletin = if state.calculator.table().is_empty() {
        "empty"
    } else {
        "loaded"
    };

    let payload = if ready {
        json!({ "status": "ready", "bulletin": bulletin })
    } else {
        json!({ "status": "initializing", "bulletin": bulletin })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn bulletin_endpoint(Extension(state): Extension<AppState>) -> Json<BulletinResponse> {
    let table = state.calculator.table();
    let categories = table
        .categories()
        .into_iter()
        .map(|category| BulletinCategoryView {
            category,
            cutoffs: Country::ALL
                .into_iter()
                .map(|country| {
                    let cell = table.cell(category, country);
                    CutoffView {
                        country,
                        cutoff_date: cell.date(),
                        unparsed: match cell {
                            BulletinCell::Invalid { raw } => Some(raw.clone()),
                            BulletinCell::Missing | BulletinCell::Date(_) => None,
                        },
                    }
                })
                .collect(),
        })
        .collect();

    Json(BulletinResponse {
        loaded: !table.is_empty(),
        categories,
    })
}

pub(crate) async fn calculate_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>, AppError> {
    let CalculateRequest {
        birth_date,
        priority_date,
        approval_date,
        category,
        country,
    } = payload;

    let category = match category {
        Some(raw) => raw.parse::<Category>()?,
        None => Category::F1,
    };
    let country = match country {
        Some(raw) => raw.parse::<Country>()?,
        None => Country::Other,
    };

    let result = state.calculator.calculate(
        parse_optional_date(birth_date.as_deref()),
        parse_optional_date(priority_date.as_deref()),
        parse_optional_date(approval_date.as_deref()),
        category,
        country,
    );
    let error_message = result.error.map(|err| err.to_string());

    Ok(Json(CalculateResponse {
        category,
        country,
        result,
        error_message,
    }))
}
