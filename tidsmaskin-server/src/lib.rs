mod api;
mod errors;
mod providers;
mod utils;

pub use api::*;
pub use errors::AppError;
pub use providers::spotify::{ResolvedTrack, SpotifyClient};
pub use providers::UpstreamUrls;

use axum::http::Method;
use axum::{routing::get, Router};
use chrono::{DateTime, Utc};
use const_format::formatcp;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const USER_AGENT: &str = formatcp!("tidsmaskin/{}", SERVER_VERSION);
pub type AppResult<T> = Result<T, AppError>;
pub type NowProvider = Arc<Box<dyn Fn() -> DateTime<Utc> + Send + Sync>>;

#[derive(Clone)]
pub struct ServerOptions {
    pub spotify_client_id: Option<String>,
    pub spotify_client_secret: Option<String>,
    pub tmdb_api_key: Option<String>,
    pub nasa_api_key: Option<String>,
    pub urls: UpstreamUrls,
    pub now_provider: NowProvider,
}

impl Debug for ServerOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("[ServerOptions]")
    }
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            spotify_client_id: None,
            spotify_client_secret: None,
            tmdb_api_key: None,
            nasa_api_key: None,
            urls: UpstreamUrls::default(),
            now_provider: Arc::new(Box::new(Utc::now)),
        }
    }
}

pub struct App {
    pub options: ServerOptions,
    pub app: Router,
    pub state: Arc<AppState>,
}

pub struct AppState {
    pub options: ServerOptions,
    pub spotify: SpotifyClient,
}

impl App {
    pub fn new(options: ServerOptions) -> Self {
        let state = Arc::new(AppState {
            spotify: SpotifyClient::new(&options),
            options: options.clone(),
        });

        let app = Router::new()
            .route("/", get(status))
            .route("/spotify", get(spotify))
            .route("/movie", get(movie))
            .route("/nasa", get(nasa))
            .route("/weather", get(weather))
            .route("/fx", get(fx))
            .route("/onthisday", get(onthisday))
            .route("/birthdays", get(birthdays))
            .with_state(state.clone())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([Method::GET]),
            )
            .layer(TraceLayer::new_for_http());

        Self {
            options,
            app,
            state,
        }
    }
}

pub fn enable_default_tracing() {
    let filter = EnvFilter::try_from_env("TIDSMASKIN_LOG")
        .unwrap_or_else(|_| EnvFilter::from_default_env())
        .add_directive(LevelFilter::WARN.into())
        .add_directive("tidsmaskin_server=debug".parse().unwrap());

    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}
