use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YouTube API key not set. Set YOUTUBE_API_KEY or run `yt-channel-scraper init`.")]
    ApiKeyMissing,

    #[error("Channel ID not set. Set YOUTUBE_CHANNEL_ID or pass --channel.")]
    ChannelIdMissing,

    #[error("API request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// True for errors raised before any request was sent
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::Config(_) | Error::ApiKeyMissing | Error::ChannelIdMissing
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
