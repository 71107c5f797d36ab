pub mod commands;
pub mod config;
pub mod description;
pub mod error;
pub mod scraper;
pub mod video;
pub mod youtube;

pub use config::Config;
pub use error::{Error, Result};
pub use scraper::{ChannelScraper, ScrapeOptions, list_all_videos, list_video_ids};
pub use video::{Description, VideoEntry, VideoRecord};
