use crate::utils::reqwest_client;
use crate::{AppResult, ServerOptions};
use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use tracing::debug;

/// Discovery looks back this many days from the requested date, inclusive.
const RELEASE_WINDOW_DAYS: i64 = 14;

#[derive(Debug, Deserialize)]
struct DiscoverResponse {
    results: Vec<DiscoverMovie>,
}

#[derive(Debug, Deserialize)]
pub struct DiscoverMovie {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub vote_average: f64,
    pub poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    results: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct Video {
    key: String,
    site: String,
    #[serde(rename = "type")]
    kind: String,
}

pub fn release_window(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    (date - Duration::days(RELEASE_WINDOW_DAYS), date)
}

/// Most popular movie released in the two weeks up to `date`, trusting the
/// upstream popularity ranking. `Ok(None)` when nothing was released.
pub async fn discover_top(
    options: &ServerOptions,
    date: &str,
) -> AppResult<Option<DiscoverMovie>> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")?;
    let (window_start, window_end) = release_window(date);
    let gte = window_start.format("%Y-%m-%d").to_string();
    let lte = window_end.format("%Y-%m-%d").to_string();

    debug!(%date, "Sending TMDb discover query");

    let response = reqwest_client()
        .get(format!("{}/discover/movie", options.urls.tmdb_api))
        .query(&[
            ("api_key", options.tmdb_api_key.as_deref().unwrap_or_default()),
            ("primary_release_date.gte", gte.as_str()),
            ("primary_release_date.lte", lte.as_str()),
            ("sort_by", "popularity.desc"),
            ("language", "sv-SE"),
        ])
        .send()
        .await?;
    let response: DiscoverResponse = response.json().await?;

    Ok(response.results.into_iter().next())
}

/// Key of the first YouTube entry classified as a trailer, if any.
pub async fn youtube_trailer(options: &ServerOptions, movie_id: u64) -> AppResult<Option<String>> {
    debug!(movie_id, "Sending TMDb videos query");

    let response = reqwest_client()
        .get(format!(
            "{}/movie/{}/videos",
            options.urls.tmdb_api, movie_id
        ))
        .query(&[
            ("api_key", options.tmdb_api_key.as_deref().unwrap_or_default()),
            ("language", "en-US"),
        ])
        .send()
        .await?;
    let response: VideosResponse = response.json().await?;

    Ok(response
        .results
        .into_iter()
        .find(|video| video.kind == "Trailer" && video.site == "YouTube")
        .map(|video| video.key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_window_spans_fourteen_days_inclusive() {
        let date = NaiveDate::from_ymd_opt(2020, 2, 2).unwrap();
        let (start, end) = release_window(date);
        assert_eq!(start, NaiveDate::from_ymd_opt(2020, 1, 19).unwrap());
        assert_eq!(end, date);
    }

    #[test]
    fn release_window_crosses_month_and_leap_boundaries() {
        let date = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        let (start, _) = release_window(date);
        assert_eq!(start, NaiveDate::from_ymd_opt(2020, 2, 16).unwrap());
    }
}
