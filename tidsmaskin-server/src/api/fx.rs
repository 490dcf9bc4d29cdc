use crate::api::{missing_params, DateParams};
use crate::providers::frankfurter;
use crate::utils::wrap_err;
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

pub async fn fx(
    Query(params): Query<DateParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Some(date) = params.date() else {
        return missing_params("Missing ?date=");
    };

    let body = wrap_err(frankfurter::rates(&state.options, date), || Value::Null).await;
    Json(body).into_response()
}
