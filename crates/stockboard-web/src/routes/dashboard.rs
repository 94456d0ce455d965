//! Dashboard page and its JSON twin.
//!
//! Both routes resolve the same query parameters into a form, build one
//! render plan through the shared memoized fetcher, and differ only in how
//! the plan is serialized.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use stockboard_core::{
    build_plan, parse_date, today_utc, DashboardInput, FormState, ProviderId, RenderPlan,
    ValidationError,
};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::error::WebError;
use crate::render;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(page))
        .route("/api/dashboard", get(api_dashboard))
}

/// Raw form controls as they arrive in the query string.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    pub ticker: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DashboardParams {
    /// Blank controls count as untouched and take their defaults.
    pub fn into_input(self) -> Result<DashboardInput, ValidationError> {
        Ok(DashboardInput {
            ticker: non_blank(self.ticker),
            start: non_blank(self.start).as_deref().map(parse_date).transpose()?,
            end: non_blank(self.end).as_deref().map(parse_date).transpose()?,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Serialize)]
struct DashboardResponse {
    request_id: Uuid,
    provider: ProviderId,
    #[serde(flatten)]
    plan: RenderPlan,
}

/// `GET /`: the dashboard page.
async fn page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardParams>,
) -> Result<Html<String>, WebError> {
    let request_id = Uuid::new_v4();
    let plan = plan_for(&state, params, request_id).await?;
    Ok(Html(render::page(&plan)))
}

/// `GET /api/dashboard`: the render plan as JSON.
async fn api_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardResponse>, WebError> {
    let request_id = Uuid::new_v4();
    let plan = plan_for(&state, params, request_id).await?;
    Ok(Json(DashboardResponse {
        request_id,
        provider: state.fetcher.provider(),
        plan,
    }))
}

async fn plan_for(
    state: &AppState,
    params: DashboardParams,
    request_id: Uuid,
) -> Result<RenderPlan, WebError> {
    let input = params.into_input()?;
    let form = FormState::resolve(input, today_utc(), &state.settings);

    let span = info_span!("dashboard", %request_id, ticker = %form.ticker);
    let plan = async move {
        let plan = build_plan(form, &state.fetcher, &state.settings).await;
        info!(status = ?plan.status, elements = plan.main.len(), "dashboard planned");
        plan
    }
    .instrument(span)
    .await;

    Ok(plan)
}
