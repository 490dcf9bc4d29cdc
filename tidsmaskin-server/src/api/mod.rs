mod fx;
mod movie;
mod nasa;
mod onthisday;
mod spotify;
mod status;
mod weather;

pub use fx::*;
pub use movie::*;
pub use nasa::*;
pub use onthisday::*;
pub use spotify::*;
pub use status::*;
pub use weather::*;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct DateParams {
    date: Option<String>,
}

impl DateParams {
    fn date(&self) -> Option<&str> {
        self.date.as_deref().filter(|date| !date.is_empty())
    }
}

fn missing_params(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}
