pub mod frankfurter;
pub mod meteo;
pub mod nasa;
pub mod spotify;
pub mod tmdb;
pub mod wikimedia;

/// Base URLs for every upstream service. Tests point these at a local mock
/// server; production uses the defaults.
#[derive(Clone, Debug)]
pub struct UpstreamUrls {
    pub spotify_accounts: String,
    pub spotify_api: String,
    pub tmdb_api: String,
    pub tmdb_image: String,
    pub nasa_api: String,
    pub meteo_api: String,
    pub frankfurter_api: String,
    pub wikimedia_api: String,
}

impl Default for UpstreamUrls {
    fn default() -> Self {
        Self {
            spotify_accounts: "https://accounts.spotify.com".to_string(),
            spotify_api: "https://api.spotify.com".to_string(),
            tmdb_api: "https://api.themoviedb.org/3".to_string(),
            tmdb_image: "https://image.tmdb.org/t/p/w500".to_string(),
            nasa_api: "https://api.nasa.gov".to_string(),
            meteo_api: "https://archive-api.open-meteo.com".to_string(),
            frankfurter_api: "https://api.frankfurter.app".to_string(),
            wikimedia_api: "https://api.wikimedia.org".to_string(),
        }
    }
}
