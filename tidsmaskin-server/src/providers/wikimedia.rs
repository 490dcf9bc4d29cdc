use crate::utils::get_json;
use crate::{AppResult, ServerOptions};
use chrono::{Datelike, NaiveDate};
use serde_json::Value;

#[derive(Clone, Copy, Debug)]
pub enum OnThisDayFeed {
    Events,
    Births,
}

impl OnThisDayFeed {
    fn as_str(self) -> &'static str {
        match self {
            OnThisDayFeed::Events => "events",
            OnThisDayFeed::Births => "births",
        }
    }
}

fn feed_path(feed: OnThisDayFeed, date: NaiveDate) -> String {
    format!(
        "/feed/v1/wikipedia/sv/onthisday/{}/{:02}/{:02}",
        feed.as_str(),
        date.month(),
        date.day()
    )
}

/// Swedish-language Wikipedia "on this day" feed for the month/day of
/// `date`, body forwarded verbatim.
pub async fn on_this_day(
    options: &ServerOptions,
    feed: OnThisDayFeed,
    date: &str,
) -> AppResult<Value> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")?;
    let url = format!("{}{}", options.urls.wikimedia_api, feed_path(feed, date));
    get_json(&url, &[] as &[(&str, &str)]).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_paths_are_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(
            feed_path(OnThisDayFeed::Events, date),
            "/feed/v1/wikipedia/sv/onthisday/events/03/05"
        );
        assert_eq!(
            feed_path(OnThisDayFeed::Births, date),
            "/feed/v1/wikipedia/sv/onthisday/births/03/05"
        );
    }
}
