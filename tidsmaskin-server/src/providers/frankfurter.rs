use crate::utils::get_json;
use crate::{AppResult, ServerOptions};
use serde_json::Value;

/// USD→SEK reference rate on `date`, body forwarded verbatim.
pub async fn rates(options: &ServerOptions, date: &str) -> AppResult<Value> {
    get_json(
        &format!("{}/{}", options.urls.frankfurter_api, date),
        &[("from", "USD"), ("to", "SEK")],
    )
    .await
}
