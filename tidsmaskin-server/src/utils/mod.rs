use crate::{AppResult, USER_AGENT};
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;
use std::future::Future;
use tracing::{debug, warn};

static REQWEST_CLIENT: once_cell::sync::OnceCell<Client> = once_cell::sync::OnceCell::new();

pub fn reqwest_client() -> &'static Client {
    REQWEST_CLIENT.get_or_init(|| {
        let mut headers = HeaderMap::new();
        headers.insert("User-Agent", USER_AGENT.parse().unwrap());

        // No client timeouts: a hung upstream stalls only its own request.
        Client::builder().default_headers(headers).build().unwrap()
    })
}

pub async fn wrap_err<T>(
    result: impl Future<Output = AppResult<T>>,
    fallback: impl FnOnce() -> T,
) -> T {
    match result.await {
        Ok(result) => result,
        Err(e) => {
            warn!(?e, "There was an issue during processing");
            fallback()
        }
    }
}

/// Fetches `url` and decodes the body as JSON regardless of the HTTP status,
/// so upstream error bodies flow back to the caller verbatim.
pub async fn get_json<Q: Serialize + Debug + ?Sized>(url: &str, query: &Q) -> AppResult<Value> {
    debug!(?url, ?query, "Sending upstream query");

    let response = reqwest_client().get(url).query(query).send().await?;
    Ok(response.json().await?)
}
