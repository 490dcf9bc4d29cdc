use crate::api::{missing_params, DateParams};
use crate::providers::wikimedia::{self, OnThisDayFeed};
use crate::utils::wrap_err;
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

pub async fn onthisday(
    Query(params): Query<DateParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    feed(params, state, OnThisDayFeed::Events).await
}

pub async fn birthdays(
    Query(params): Query<DateParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    feed(params, state, OnThisDayFeed::Births).await
}

async fn feed(params: DateParams, state: Arc<AppState>, feed: OnThisDayFeed) -> Response {
    let Some(date) = params.date() else {
        return missing_params("Missing ?date=");
    };

    let body = wrap_err(
        wikimedia::on_this_day(&state.options, feed, date),
        || Value::Null,
    )
    .await;
    Json(body).into_response()
}
