use crate::utils::get_json;
use crate::{AppResult, ServerOptions};
use serde_json::Value;

/// Astronomy picture of the day for `date`, body forwarded verbatim.
pub async fn apod(options: &ServerOptions, date: &str) -> AppResult<Value> {
    get_json(
        &format!("{}/planetary/apod", options.urls.nasa_api),
        &[
            ("api_key", options.nasa_api_key.as_deref().unwrap_or_default()),
            ("date", date),
        ],
    )
    .await
}
