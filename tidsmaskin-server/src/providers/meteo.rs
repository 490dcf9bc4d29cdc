use crate::utils::get_json;
use crate::{AppResult, ServerOptions};
use serde_json::Value;

// Stockholm
const LATITUDE: &str = "59.3293";
const LONGITUDE: &str = "18.0686";

const DAILY_METRICS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode";
const TIMEZONE: &str = "Europe/Stockholm";

/// Historical daily weather on `date`, body forwarded verbatim.
pub async fn archive(options: &ServerOptions, date: &str) -> AppResult<Value> {
    get_json(
        &format!("{}/v1/archive", options.urls.meteo_api),
        &[
            ("latitude", LATITUDE),
            ("longitude", LONGITUDE),
            ("start_date", date),
            ("end_date", date),
            ("daily", DAILY_METRICS),
            ("timezone", TIMEZONE),
        ],
    )
    .await
}
