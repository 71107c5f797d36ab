use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{Error, Result};

/// Largest page the search endpoint will return
pub const PAGE_SIZE: u32 = 50;

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub video_ids: Vec<String>,
    /// Cursor for the following page; `None` once the channel is exhausted
    pub next_page_token: Option<String>,
}

/// Snippet part of a video resource
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    pub published_at: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

/// Thumbnails keyed by resolution, as the API names them
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Thumbnails {
    pub maxres: Option<Thumbnail>,
    pub standard: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub default: Option<Thumbnail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Thumbnail {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: None,
            height: None,
        }
    }
}

/// Where video listings and details come from.
///
/// The HTTP client is the real implementation; tests substitute in-memory pages.
#[allow(async_fn_in_trait)]
pub trait VideoSource {
    /// Fetch one page of a channel's videos. An empty token requests the first page.
    async fn search_page(&self, channel_id: &str, page_token: &str) -> Result<SearchPage>;

    /// Fetch the snippet of a single video, `None` if the API knows no such video
    async fn video_snippet(&self, video_id: &str) -> Result<Option<VideoSnippet>>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchListResponse {
    items: Vec<SearchResult>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    id: ResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: VideoSnippet,
}

/// YouTube Data API v3 client
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.clone(),
        })
    }

    /// GET an endpoint with the API key attached and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(%url, ?query, "Requesting");

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| transport_error(endpoint, "Request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::error!(endpoint, status = status.as_u16(), "API returned an error");
            return Err(Error::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| transport_error(endpoint, "Failed to read response body", e))?;

        serde_json::from_str(&text)
            .map_err(|e| Error::MalformedResponse(format!("{} response: {}", endpoint, e)))
    }
}

/// Log and wrap a transport failure. The request URL carries the API key, so it
/// is stripped before the error is displayed anywhere.
fn transport_error(endpoint: &str, message: &str, error: reqwest::Error) -> Error {
    let error = error.without_url();
    tracing::error!(endpoint, error = %error, "{}", message);
    Error::Http(error)
}

impl VideoSource for YouTubeClient {
    async fn search_page(&self, channel_id: &str, page_token: &str) -> Result<SearchPage> {
        let page_size = PAGE_SIZE.to_string();
        let response: SearchListResponse = self
            .get_json(
                "search",
                &[
                    ("part", "snippet"),
                    ("channelId", channel_id),
                    ("maxResults", &page_size),
                    ("pageToken", page_token),
                    ("type", "video"),
                ],
            )
            .await?;

        let video_ids = response
            .items
            .into_iter()
            .filter_map(|item| {
                if item.id.video_id.is_none() {
                    tracing::debug!(channel_id, "Skipping search result without a video ID");
                }
                item.id.video_id
            })
            .collect();

        Ok(SearchPage {
            video_ids,
            next_page_token: response.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    async fn video_snippet(&self, video_id: &str) -> Result<Option<VideoSnippet>> {
        let response: VideoListResponse = self
            .get_json("videos", &[("part", "snippet"), ("id", video_id)])
            .await?;

        Ok(response.items.into_iter().next().map(|item| item.snippet))
    }
}
