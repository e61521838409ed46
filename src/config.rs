use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_chrome_path")]
    pub chrome_path: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    #[serde(default = "default_max_timeout")]
    pub max_timeout: u64,

    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: u64,

    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_chrome_path() -> String { "/usr/bin/chromium".to_string() }
fn default_request_timeout() -> u64 { 30 }
fn default_max_timeout() -> u64 { 180 }
fn default_cache_ttl() -> u64 { 3600 }
fn default_cache_dir() -> PathBuf { PathBuf::from(".cache/media-queries") }
fn default_output_dir() -> PathBuf { PathBuf::from("analysis/media-queries") }

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            chrome_path: std::env::var("CHROME_PATH")
                .unwrap_or_else(|_| default_chrome_path()),
            request_timeout: std::env::var("REQUEST_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_request_timeout),
            max_timeout: std::env::var("MAX_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_max_timeout),
            cache_ttl: std::env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_cache_ttl),
            cache_dir: std::env::var("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_cache_dir()),
            output_dir: std::env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_output_dir()),
        };

        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            chrome_path: default_chrome_path(),
            request_timeout: default_request_timeout(),
            max_timeout: default_max_timeout(),
            cache_ttl: default_cache_ttl(),
            cache_dir: default_cache_dir(),
            output_dir: default_output_dir(),
        }
    }
}
