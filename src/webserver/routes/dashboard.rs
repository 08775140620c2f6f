//! Dashboard data routes
//!
//! Thin proxies over the [`FinancialStore`] collaborator. Query parameters
//! are closed-set enums; bad values get a 400 with the full error list.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::store::{Department, NewActivity, Period, Region};
use crate::webserver::state::AppState;
use crate::webserver::utils::{success_response, validation_error_response};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/kpis", get(get_kpis))
        .route("/budget", get(get_budget))
        .route("/reports", get(get_reports))
        .route("/activities", get(get_activities).post(create_activity))
        .route("/revenue", get(get_revenue))
        .route("/expenses", get(get_expenses))
        .route("/forecasts", get(get_forecasts))
        .route("/cashflow", get(get_cash_flow))
}

// ============================================================================
// QUERY PARAMETERS
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub period: Option<String>,
    pub department: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActivitiesQuery {
    pub limit: Option<usize>,
}

const DEFAULT_ACTIVITY_LIMIT: usize = 20;

/// Parse one optional enum filter, collecting the error on failure
fn parse_filter<T>(raw: Option<&String>, errors: &mut Vec<String>) -> Option<T>
where
    T: FromStr<Err = String>,
{
    match raw {
        None => None,
        Some(value) => match value.parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                errors.push(e);
                None
            }
        },
    }
}

struct ParsedFilters {
    period: Option<Period>,
    department: Option<Department>,
    region: Option<Region>,
}

fn parse_filters(query: &FilterQuery) -> Result<ParsedFilters, Vec<String>> {
    let mut errors = Vec::new();
    let period = parse_filter(query.period.as_ref(), &mut errors);
    let department = parse_filter(query.department.as_ref(), &mut errors);
    let region = parse_filter(query.region.as_ref(), &mut errors);

    if errors.is_empty() {
        Ok(ParsedFilters {
            period,
            department,
            region,
        })
    } else {
        Err(errors)
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /api/kpis?period=&department=&region=
async fn get_kpis(State(state): State<Arc<AppState>>, Query(query): Query<FilterQuery>) -> Response {
    let filters = match parse_filters(&query) {
        Ok(f) => f,
        Err(errors) => return validation_error_response(errors),
    };

    let kpis = state
        .store
        .get_kpis(filters.period, filters.department, filters.region)
        .await;
    success_response(kpis)
}

/// GET /api/budget?period=&department=
async fn get_budget(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Response {
    let filters = match parse_filters(&query) {
        Ok(f) => f,
        Err(errors) => return validation_error_response(errors),
    };

    let items = state
        .store
        .get_budget_items(filters.period, filters.department)
        .await;
    success_response(items)
}

/// GET /api/reports?period=
async fn get_reports(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Response {
    let filters = match parse_filters(&query) {
        Ok(f) => f,
        Err(errors) => return validation_error_response(errors),
    };

    success_response(state.store.get_reports(filters.period).await)
}

/// GET /api/activities?limit=
async fn get_activities(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ActivitiesQuery>,
) -> Response {
    let limit = query.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
    success_response(state.store.get_activities(limit).await)
}

/// POST /api/activities
async fn create_activity(
    State(state): State<Arc<AppState>>,
    Json(activity): Json<NewActivity>,
) -> Response {
    let record = state.store.create_activity(activity).await;
    success_response(record)
}

/// GET /api/revenue?period=&region=
async fn get_revenue(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Response {
    let filters = match parse_filters(&query) {
        Ok(f) => f,
        Err(errors) => return validation_error_response(errors),
    };

    success_response(
        state
            .store
            .get_revenue(filters.period, filters.region)
            .await,
    )
}

/// GET /api/expenses?period=&department=
async fn get_expenses(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Response {
    let filters = match parse_filters(&query) {
        Ok(f) => f,
        Err(errors) => return validation_error_response(errors),
    };

    success_response(
        state
            .store
            .get_expenses(filters.period, filters.department)
            .await,
    )
}

/// GET /api/forecasts?period=
async fn get_forecasts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Response {
    let filters = match parse_filters(&query) {
        Ok(f) => f,
        Err(errors) => return validation_error_response(errors),
    };

    success_response(state.store.get_forecasts(filters.period).await)
}

/// GET /api/cashflow?period=
async fn get_cash_flow(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Response {
    let filters = match parse_filters(&query) {
        Ok(f) => f,
        Err(errors) => return validation_error_response(errors),
    };

    success_response(state.store.get_cash_flow(filters.period).await)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::ai::AnalysisEngine;
    use crate::config::Config;
    use crate::store::InMemoryStore;
    use crate::test_support::MockLlmClient;
    use crate::webserver::routes::create_router;

    fn test_app() -> axum::Router {
        let engine = Arc::new(AnalysisEngine::new(
            MockLlmClient::returning("{}"),
            "mock-model",
        ));
        let store = Arc::new(InMemoryStore::seeded());
        let state = Arc::new(crate::webserver::state::AppState::new(
            Config::default(),
            engine,
            store,
        ));
        create_router(state)
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_kpis_unfiltered() {
        let (status, body) = get_json(test_app(), "/api/kpis").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().len() >= 4);
    }

    #[tokio::test]
    async fn test_kpis_filtered_by_period() {
        let (status, body) = get_json(test_app(), "/api/kpis?period=monthly").await;
        assert_eq!(status, StatusCode::OK);
        for kpi in body.as_array().unwrap() {
            assert_eq!(kpi["period"], "monthly");
        }
    }

    #[tokio::test]
    async fn test_invalid_enum_value_is_400_with_details() {
        let (status, body) =
            get_json(test_app(), "/api/kpis?period=weekly&region=atlantis").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation failed");
        let details = body["details"].as_array().unwrap();
        assert_eq!(details.len(), 2);
        assert!(details[0].as_str().unwrap().contains("period"));
        assert!(details[1].as_str().unwrap().contains("region"));
    }

    #[tokio::test]
    async fn test_create_and_list_activity() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/activities")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"user": "ana", "action": "anomaly.ignored", "detail": "noise"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let (status, body) = get_json(app, "/api/activities?limit=1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["user"], "ana");
    }

    #[tokio::test]
    async fn test_cashflow_rows() {
        let (status, body) = get_json(test_app(), "/api/cashflow?period=monthly").await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.as_array().unwrap().is_empty());
    }
}
