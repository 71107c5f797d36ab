use std::path::PathBuf;
use std::sync::OnceLock;

use crate::error::{Error, Result};

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the base data directory (~/.yt-channel-scraper/)
pub fn data_dir() -> &'static PathBuf {
    DATA_DIR.get_or_init(|| {
        std::env::var("YT_CHANNEL_SCRAPER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".yt-channel-scraper")
            })
    })
}

/// Get the .env file path
pub fn env_file_path() -> PathBuf {
    data_dir().join(".env")
}

/// Load environment variables from the data directory's .env file, then from
/// the current directory's.
///
/// Values already set are never overridden, so the process environment wins
/// over the data directory, which wins over the current directory. Runs before
/// logging is set up: problems are reported on stderr and otherwise ignored.
/// Returns the files that were loaded.
pub fn load_env() -> Vec<PathBuf> {
    let mut paths = vec![env_file_path()];
    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".env"));
    }
    load_env_files(&paths)
}

fn load_env_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut loaded: Vec<PathBuf> = Vec::new();

    for path in paths {
        if !path.exists() || loaded.contains(path) {
            continue;
        }
        match dotenvy::from_path(path) {
            Ok(()) => loaded.push(path.clone()),
            Err(e) => eprintln!(
                "Warning: could not load {} ({}), continuing without it",
                path.display(),
                e
            ),
        }
    }

    loaded
}

const API_KEY_VAR: &str = "YOUTUBE_API_KEY";
const CHANNEL_ID_VAR: &str = "YOUTUBE_CHANNEL_ID";
const API_BASE_URL_VAR: &str = "YOUTUBE_API_BASE_URL";

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Everything needed to talk to the API for one channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub channel_id: String,
    pub api_base_url: String,
}

impl Config {
    /// Build a config from explicit values. Empty values count as missing.
    pub fn new(api_key: Option<String>, channel_id: Option<String>) -> Result<Self> {
        let api_key = non_empty(api_key).ok_or(Error::ApiKeyMissing)?;
        let channel_id = non_empty(channel_id).ok_or(Error::ChannelIdMissing)?;

        Ok(Self {
            api_key,
            channel_id,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        })
    }

    /// Resolve configuration with CLI overrides taking precedence over the environment
    pub fn resolve(api_key: Option<String>, channel_id: Option<String>) -> Result<Self> {
        Self::resolve_with(api_key, channel_id, |name| std::env::var(name).ok())
    }

    fn resolve_with(
        api_key: Option<String>,
        channel_id: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let api_key = non_empty(api_key).or_else(|| non_empty(env(API_KEY_VAR)));
        let channel_id = non_empty(channel_id).or_else(|| non_empty(env(CHANNEL_ID_VAR)));
        let base_url =
            non_empty(env(API_BASE_URL_VAR)).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        Ok(Self::new(api_key, channel_id)?.with_base_url(base_url))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Create the data directory if it doesn't exist
pub fn ensure_directories() -> Result<()> {
    std::fs::create_dir_all(data_dir())?;
    Ok(())
}
