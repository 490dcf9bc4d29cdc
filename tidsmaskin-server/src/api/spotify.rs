use crate::api::missing_params;
use crate::AppState;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub struct SpotifyParams {
    title: Option<String>,
    artist: Option<String>,
}

impl SpotifyParams {
    fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|title| !title.is_empty())
    }

    fn artist(&self) -> Option<&str> {
        self.artist.as_deref().filter(|artist| !artist.is_empty())
    }
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotifyResponse {
    track_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub async fn spotify(
    Query(params): Query<SpotifyParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let (Some(title), Some(artist)) = (params.title(), params.artist()) else {
        return missing_params("Missing ?title=...&artist=...");
    };

    let response = match state.spotify.find_track(title, artist).await {
        Ok(Some(track)) => SpotifyResponse {
            track_id: Some(track.id),
            name: Some(track.name),
            artist: track.artist,
            ..Default::default()
        },
        Ok(None) => SpotifyResponse::default(),
        Err(e) => {
            warn!(?e, "Spotify track lookup failed");
            SpotifyResponse {
                error: Some(e.to_string()),
                ..Default::default()
            }
        }
    };

    Json(response).into_response()
}
