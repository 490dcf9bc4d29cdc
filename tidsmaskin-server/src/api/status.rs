use axum::Json;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct StatusResponse {
    status: String,
}

pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "OK – Tidsmaskin backend körs 🔧".to_string(),
    })
}
