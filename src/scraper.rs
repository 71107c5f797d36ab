use futures::stream::{self, StreamExt, TryStreamExt};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::video::{RecordOptions, VideoEntry, VideoRecord};
use crate::youtube::{VideoSource, YouTubeClient};

/// How a channel listing is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub split_description: bool,
    pub include_thumbnail: bool,
    /// Detail requests allowed in flight per page; 1 fetches one at a time
    pub concurrency: usize,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            split_description: false,
            include_thumbnail: true,
            concurrency: 1,
        }
    }
}

impl ScrapeOptions {
    fn record_options(&self) -> RecordOptions {
        RecordOptions {
            split_description: self.split_description,
            include_thumbnail: self.include_thumbnail,
        }
    }
}

/// Position in a channel's chain of search pages
struct PageCursor {
    /// Token for the next request; `None` once the chain has ended
    next_token: Option<String>,
    pages: usize,
}

impl Default for PageCursor {
    fn default() -> Self {
        // The first page is requested with an empty token
        Self {
            next_token: Some(String::new()),
            pages: 0,
        }
    }
}

/// Walks a channel's search pages and resolves every video on them
pub struct ChannelScraper<S> {
    source: S,
    channel_id: String,
    options: ScrapeOptions,
}

impl<S: VideoSource> ChannelScraper<S> {
    pub fn new(source: S, channel_id: impl Into<String>, options: ScrapeOptions) -> Result<Self> {
        if options.concurrency == 0 {
            return Err(Error::Config("concurrency must be at least 1".to_string()));
        }

        Ok(Self {
            source,
            channel_id: channel_id.into(),
            options,
        })
    }

    /// Fetch the page the cursor points at and advance it.
    ///
    /// Returns `None` once the previous page came back without a page token.
    async fn next_page(&self, cursor: &mut PageCursor) -> Result<Option<Vec<String>>> {
        let Some(page_token) = cursor.next_token.take() else {
            return Ok(None);
        };

        cursor.pages += 1;
        let result = self.source.search_page(&self.channel_id, &page_token).await?;
        tracing::debug!(
            channel_id = %self.channel_id,
            page = cursor.pages,
            count = result.video_ids.len(),
            "Fetched search page"
        );

        cursor.next_token = result.next_page_token.filter(|t| !t.is_empty());
        Ok(Some(result.video_ids))
    }

    /// Collect every video ID of the channel in page order.
    ///
    /// Stops only when the API stops returning a page token.
    pub async fn video_ids(&self) -> Result<Vec<String>> {
        let mut cursor = PageCursor::default();
        let mut ids = Vec::new();

        while let Some(page_ids) = self.next_page(&mut cursor).await? {
            ids.extend(page_ids);
        }

        Ok(ids)
    }

    /// Resolve one video ID into its record, or a not-found entry
    pub async fn video_entry(&self, video_id: &str) -> Result<VideoEntry> {
        match self.source.video_snippet(video_id).await? {
            Some(snippet) => {
                let record = VideoRecord::from_snippet(video_id, snippet, self.options.record_options())?;
                Ok(VideoEntry::Found(record))
            }
            None => {
                tracing::info!(video_id, "No video found for ID");
                Ok(VideoEntry::NotFound {
                    video_id: video_id.to_string(),
                })
            }
        }
    }

    /// Resolve a page of IDs, keeping their order regardless of completion order
    async fn page_entries(&self, video_ids: &[String]) -> Result<Vec<VideoEntry>> {
        if self.options.concurrency <= 1 {
            let mut entries = Vec::with_capacity(video_ids.len());
            for video_id in video_ids {
                entries.push(self.video_entry(video_id).await?);
            }
            return Ok(entries);
        }

        stream::iter(video_ids)
            .map(|video_id| self.video_entry(video_id))
            .buffered(self.options.concurrency)
            .try_collect()
            .await
    }

    /// List every video of the channel.
    ///
    /// Each search page is fully resolved before the next one is requested.
    /// The first failure aborts the run and nothing collected so far is returned.
    pub async fn run(&self) -> Result<Vec<VideoEntry>> {
        let mut cursor = PageCursor::default();
        let mut entries = Vec::new();

        while let Some(page_ids) = self.next_page(&mut cursor).await? {
            entries.extend(self.page_entries(&page_ids).await?);
        }

        tracing::info!(
            channel_id = %self.channel_id,
            pages = cursor.pages,
            count = entries.len(),
            "Finished listing channel"
        );
        Ok(entries)
    }
}

/// List all videos of the configured channel
pub async fn list_all_videos(config: &Config, options: ScrapeOptions) -> Result<Vec<VideoEntry>> {
    let client = YouTubeClient::new(config)?;
    ChannelScraper::new(client, config.channel_id.as_str(), options)?
        .run()
        .await
}

/// List only the video IDs of the configured channel
pub async fn list_video_ids(config: &Config) -> Result<Vec<String>> {
    let client = YouTubeClient::new(config)?;
    ChannelScraper::new(client, config.channel_id.as_str(), ScrapeOptions::default())?
        .video_ids()
        .await
}
