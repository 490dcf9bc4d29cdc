use crate::api::{missing_params, DateParams};
use crate::providers::tmdb;
use crate::utils::wrap_err;
use crate::{AppResult, AppState};
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

#[derive(Clone, Debug, Serialize)]
pub struct MovieResponse {
    pub titel: String,
    pub beskrivning: String,
    pub betyg: f64,
    pub poster: Option<String>,
    pub trailer: Option<Trailer>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Trailer {
    pub key: String,
}

pub async fn movie(
    Query(params): Query<DateParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let Some(date) = params.date() else {
        return missing_params("Missing ?date=YYYY-MM-DD");
    };

    let body = wrap_err(featured_movie(&state, date), || None).await;
    Json(body).into_response()
}

/// Two-step pipeline: discover the top release in the window, then look up
/// its trailer. A missing trailer leaves the other fields intact.
async fn featured_movie(state: &AppState, date: &str) -> AppResult<Option<MovieResponse>> {
    let Some(movie) = tmdb::discover_top(&state.options, date).await? else {
        return Ok(None);
    };

    let trailer = tmdb::youtube_trailer(&state.options, movie.id).await?;

    Ok(Some(MovieResponse {
        titel: movie.title,
        beskrivning: movie.overview,
        betyg: movie.vote_average,
        poster: movie
            .poster_path
            .map(|path| format!("{}{}", state.options.urls.tmdb_image, path)),
        trailer: trailer.map(|key| Trailer { key }),
    }))
}
