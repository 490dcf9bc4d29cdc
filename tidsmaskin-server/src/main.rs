use clap::Parser;
use std::net::SocketAddr;
use tidsmaskin_server::{enable_default_tracing, App, AppResult, ServerOptions, SERVER_VERSION};
use tokio::signal;
use tracing::info;

#[derive(Parser)]
#[clap(name = "Tidsmaskin", version = SERVER_VERSION)]
struct Cli {
    /// Port to listen on
    #[clap(long, env = "PORT", default_value_t = 8080)]
    port: u16,

    /// Spotify client id for the client-credentials exchange
    #[clap(long, env = "SPOTIFY_CLIENT_ID")]
    spotify_client_id: Option<String>,

    /// Spotify client secret
    #[clap(long, env = "SPOTIFY_CLIENT_SECRET")]
    spotify_client_secret: Option<String>,

    /// TMDb API key
    #[clap(long, env = "TMDB_API_KEY")]
    tmdb_api_key: Option<String>,

    /// NASA API key
    #[clap(long, env = "NASA_API_KEY")]
    nasa_api_key: Option<String>,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    enable_default_tracing();

    info!("tidsmaskin {}", SERVER_VERSION);
    info!("Server starting...");

    let options = ServerOptions {
        spotify_client_id: cli.spotify_client_id,
        spotify_client_secret: cli.spotify_client_secret,
        tmdb_api_key: cli.tmdb_api_key,
        nasa_api_key: cli.nasa_api_key,
        ..Default::default()
    };
    let app = App::new(options);

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let server = axum::Server::bind(&addr)
        .serve(app.app.clone().into_make_service())
        .with_graceful_shutdown(shutdown_signal());

    info!("Server started on port {}", cli.port);

    server.await?;

    info!("Server is shutdown");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Signal received, starting graceful shutdown");
}
