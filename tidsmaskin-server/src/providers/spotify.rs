use crate::utils::reqwest_client;
use crate::{AppResult, NowProvider, ServerOptions};
use anyhow::anyhow;
use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

/// Spotify issues tokens with a ~60 minute lifetime; caching for less keeps
/// a cached token from outliving the real one.
const TOKEN_CACHE_MINUTES: i64 = 50;

static PARENTHESIZED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*?\)").unwrap());

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: Option<TrackPage>,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<TrackItem>,
}

#[derive(Debug, Deserialize)]
struct TrackItem {
    id: String,
    name: String,
    #[serde(default)]
    artists: Vec<TrackArtist>,
}

#[derive(Debug, Deserialize)]
struct TrackArtist {
    name: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedTrack {
    pub id: String,
    pub name: String,
    pub artist: Option<String>,
}

struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

pub struct SpotifyClient {
    client_id: String,
    client_secret: String,
    accounts_url: String,
    api_url: String,
    now_provider: NowProvider,
    cached: Mutex<Option<CachedToken>>,
}

impl SpotifyClient {
    pub fn new(options: &ServerOptions) -> Self {
        Self {
            client_id: options.spotify_client_id.clone().unwrap_or_default(),
            client_secret: options.spotify_client_secret.clone().unwrap_or_default(),
            accounts_url: options.urls.spotify_accounts.clone(),
            api_url: options.urls.spotify_api.clone(),
            now_provider: options.now_provider.clone(),
            cached: Mutex::new(None),
        }
    }

    /// Returns a bearer token, refreshing the cache when the stored one is
    /// empty or past its expiry. The lock is held across the exchange, so
    /// concurrent misses trigger a single refresh.
    pub async fn token(&self) -> AppResult<String> {
        let mut cached = self.cached.lock().await;
        let now = (self.now_provider)();

        if let Some(token) = cached.as_ref() {
            if !token.access_token.is_empty() && now < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }

        let response = reqwest_client()
            .post(format!("{}/api/token", self.accounts_url))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        let token: TokenResponse = response.json().await?;
        if token.access_token.is_empty() {
            return Err(anyhow!("token exchange returned an empty access token").into());
        }

        *cached = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at: now + Duration::minutes(TOKEN_CACHE_MINUTES),
        });

        Ok(token.access_token)
    }

    /// Looks up a track by title and artist: a specific field-qualified
    /// search first, then a loose one. `Ok(None)` means neither matched.
    pub async fn find_track(
        &self,
        title: &str,
        artist: &str,
    ) -> AppResult<Option<ResolvedTrack>> {
        let token = self
            .token()
            .await
            .map_err(|_| anyhow!("Could not get Spotify token"))?;

        let title = clean_title(title);
        let artist = clean_artist(artist);

        let query = format!("track:{title} artist:{artist}");
        if let Some(track) = self.search(&token, &query).await? {
            return Ok(Some(track));
        }

        let query = format!("{title} {artist}");
        self.search(&token, &query).await
    }

    async fn search(&self, token: &str, query: &str) -> AppResult<Option<ResolvedTrack>> {
        debug!(?query, "Sending Spotify search query");

        let response = reqwest_client()
            .get(format!("{}/v1/search", self.api_url))
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track"), ("limit", "1")])
            .send()
            .await?;
        let response: SearchResponse = response.json().await?;

        let item = response
            .tracks
            .map(|page| page.items)
            .unwrap_or_default()
            .into_iter()
            .next();

        Ok(item.map(|track| ResolvedTrack {
            id: track.id,
            name: track.name,
            artist: track.artists.into_iter().next().map(|artist| artist.name),
        }))
    }
}

/// Strips every parenthesized chunk from a track title:
/// "Song (Remastered 2011)" becomes "Song".
pub fn clean_title(title: &str) -> String {
    PARENTHESIZED.replace_all(title, "").trim().to_string()
}

/// Keeps only the lead artist: anything after "ft.", "feat." or "&" is cut.
pub fn clean_artist(artist: &str) -> String {
    let artist = artist.split("ft.").next().unwrap_or_default();
    let artist = artist.split("feat.").next().unwrap_or_default();
    let artist = artist.split('&').next().unwrap_or_default();
    artist.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::{Arc, Mutex as StdMutex};

    #[test]
    fn titles_lose_parenthesized_chunks() {
        assert_eq!(clean_title("Song (Remastered 2011)"), "Song");
        assert_eq!(clean_title("A (x) B (y)"), "A  B");
        assert_eq!(clean_title("  Plain title "), "Plain title");
    }

    #[test]
    fn artists_keep_only_the_lead_name() {
        assert_eq!(clean_artist("Artist A feat. Artist B"), "Artist A");
        assert_eq!(clean_artist("Artist A ft. Artist B"), "Artist A");
        assert_eq!(clean_artist("Artist A & Artist B"), "Artist A");
        assert_eq!(clean_artist("Solo Artist"), "Solo Artist");
    }

    fn fixed_clock() -> (Arc<StdMutex<DateTime<Utc>>>, NowProvider) {
        let clock = Arc::new(StdMutex::new(
            Utc.with_ymd_and_hms(2020, 2, 2, 0, 0, 0).unwrap(),
        ));
        let handle = clock.clone();
        let provider: NowProvider = Arc::new(Box::new(move || *handle.lock().unwrap()));
        (clock, provider)
    }

    fn test_client(server_url: &str, now_provider: NowProvider) -> SpotifyClient {
        SpotifyClient {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            accounts_url: server_url.to_string(),
            api_url: server_url.to_string(),
            now_provider,
            cached: Mutex::new(None),
        }
    }

    #[tokio::test]
    async fn token_is_cached_while_valid() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/token")
            .match_header("authorization", mockito::Matcher::Regex("Basic .+".into()))
            .match_body(mockito::Matcher::UrlEncoded(
                "grant_type".into(),
                "client_credentials".into(),
            ))
            .with_body(r#"{"access_token":"token-1","token_type":"Bearer","expires_in":3600}"#)
            .expect(1)
            .create_async()
            .await;

        let (_clock, now_provider) = fixed_clock();
        let client = test_client(&server.url(), now_provider);

        assert_eq!(client.token().await.unwrap(), "token-1");
        assert_eq!(client.token().await.unwrap(), "token-1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn token_refreshes_once_the_margin_has_passed() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/token")
            .with_body(r#"{"access_token":"token-1","token_type":"Bearer","expires_in":3600}"#)
            .expect(2)
            .create_async()
            .await;

        let (clock, now_provider) = fixed_clock();
        let client = test_client(&server.url(), now_provider);

        client.token().await.unwrap();

        {
            let mut now = clock.lock().unwrap();
            *now = *now + Duration::minutes(49);
        }
        client.token().await.unwrap();

        {
            let mut now = clock.lock().unwrap();
            *now = *now + Duration::minutes(1);
        }
        client.token().await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn failed_exchange_leaves_the_cache_untouched() {
        let mut server = mockito::Server::new_async().await;
        let _broken = server
            .mock("POST", "/api/token")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let (_clock, now_provider) = fixed_clock();
        let client = test_client(&server.url(), now_provider);

        assert!(client.token().await.is_err());

        let recovered = server
            .mock("POST", "/api/token")
            .with_body(r#"{"access_token":"token-2","token_type":"Bearer","expires_in":3600}"#)
            .expect(1)
            .create_async()
            .await;

        assert_eq!(client.token().await.unwrap(), "token-2");
        recovered.assert_async().await;
    }

    #[tokio::test]
    async fn empty_access_token_is_not_served() {
        let mut server = mockito::Server::new_async().await;
        let _empty = server
            .mock("POST", "/api/token")
            .with_body(r#"{"access_token":"","token_type":"Bearer","expires_in":3600}"#)
            .create_async()
            .await;

        let (_clock, now_provider) = fixed_clock();
        let client = test_client(&server.url(), now_provider);

        assert!(client.token().await.is_err());
    }
}
