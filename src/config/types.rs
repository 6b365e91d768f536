use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub traffic_light: TrafficLightConfig,
    #[serde(default)]
    pub movies: MoviesConfig,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

/// How long each color of the traffic light is held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficLightConfig {
    /// Red phase in milliseconds (default: 1000).
    #[serde(default = "default_phase_ms")]
    pub red_ms: u64,
    /// Yellow phase in milliseconds (default: 1000).
    #[serde(default = "default_phase_ms")]
    pub yellow_ms: u64,
    /// Green phase in milliseconds (default: 1000).
    #[serde(default = "default_phase_ms")]
    pub green_ms: u64,
}

/// Movie catalogue API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoviesConfig {
    /// API origin (default: "https://api.themoviedb.org").
    #[serde(default = "default_movies_base_url")]
    pub base_url: String,
    /// API key. Falls back to the `TMDB_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Prefix prepended to poster paths.
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Start with fault injection enabled: requests are sent without a key.
    #[serde(default)]
    pub simulate_failure: bool,
}

pub(crate) const API_KEY_ENV: &str = "TMDB_API_KEY";

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_phase_ms() -> u64 {
    1000
}

fn default_movies_base_url() -> String {
    "https://api.themoviedb.org".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w154".to_string()
}

impl MoviesConfig {
    /// Configured key, else the `TMDB_API_KEY` environment variable.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

impl Default for TrafficLightConfig {
    fn default() -> Self {
        Self {
            red_ms: default_phase_ms(),
            yellow_ms: default_phase_ms(),
            green_ms: default_phase_ms(),
        }
    }
}

impl Default for MoviesConfig {
    fn default() -> Self {
        Self {
            base_url: default_movies_base_url(),
            api_key: None,
            image_base_url: default_image_base_url(),
            simulate_failure: false,
        }
    }
}
