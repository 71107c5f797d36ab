use serde::{Serialize, Serializer};

use crate::description::{SplitDescription, split_description};
use crate::error::{Error, Result};
use crate::youtube::{Thumbnail, Thumbnails, VideoSnippet};

const EMBED_URL_PREFIX: &str = "https://www.youtube.com/embed/";

/// Text emitted in place of a record when the API has no such video
pub const NOT_FOUND_MESSAGE: &str = "No video found for the given ID.";

/// Embeddable player URL for a video
pub fn embed_link(video_id: &str) -> String {
    format!("{}{}", EMBED_URL_PREFIX, video_id)
}

/// Pick the highest resolution thumbnail with a URL.
///
/// `default` is the floor and is taken as-is; a snippet without it is a
/// malformed response.
pub fn select_thumbnail(thumbnails: &Thumbnails) -> Result<&str> {
    let has_url = |t: &&Thumbnail| !t.url.is_empty();

    let best = [
        &thumbnails.maxres,
        &thumbnails.standard,
        &thumbnails.high,
        &thumbnails.medium,
    ]
    .into_iter()
    .filter_map(Option::as_ref)
    .find(has_url)
    .or(thumbnails.default.as_ref())
    .ok_or_else(|| Error::MalformedResponse("missing default thumbnail".to_string()))?;

    Ok(&best.url)
}

/// Description as emitted: raw text or split into zones
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Description {
    Raw(String),
    Split(SplitDescription),
}

/// Normalized metadata for one video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoRecord {
    pub title: String,
    pub embed_link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    pub published_at: String,
    pub description: Description,
}

/// Which optional parts of a record to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordOptions {
    pub split_description: bool,
    pub include_thumbnail: bool,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            split_description: false,
            include_thumbnail: true,
        }
    }
}

impl VideoRecord {
    pub fn from_snippet(video_id: &str, snippet: VideoSnippet, options: RecordOptions) -> Result<Self> {
        let thumbnail_url = if options.include_thumbnail {
            Some(select_thumbnail(&snippet.thumbnails)?.to_string())
        } else {
            None
        };

        let description = if options.split_description {
            Description::Split(split_description(&snippet.description))
        } else {
            Description::Raw(snippet.description)
        };

        Ok(Self {
            title: snippet.title,
            embed_link: embed_link(video_id),
            thumbnail_url,
            published_at: snippet.published_at,
            description,
        })
    }
}

/// Result for one enumerated video ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoEntry {
    Found(VideoRecord),
    NotFound { video_id: String },
}

impl VideoEntry {
    pub fn record(&self) -> Option<&VideoRecord> {
        match self {
            VideoEntry::Found(record) => Some(record),
            VideoEntry::NotFound { .. } => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, VideoEntry::Found(_))
    }
}

// Not-found entries are written as the bare message so the JSON output keeps
// the same shape consumers of the list already expect.
impl Serialize for VideoEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            VideoEntry::Found(record) => record.serialize(serializer),
            VideoEntry::NotFound { .. } => serializer.serialize_str(NOT_FOUND_MESSAGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(thumbnails: Thumbnails) -> VideoSnippet {
        VideoSnippet {
            title: "A video".into(),
            published_at: "2021-01-01T00:00:00Z".into(),
            description: "Intro line\n\nOriginally Published: 2021-01-01\nExtra note\n".into(),
            thumbnails,
        }
    }

    #[test]
    fn standard_beats_default() {
        let thumbnails = Thumbnails {
            standard: Some(Thumbnail::new("https://img/sd.jpg")),
            default: Some(Thumbnail::new("https://img/default.jpg")),
            ..Default::default()
        };
        assert_eq!(select_thumbnail(&thumbnails).unwrap(), "https://img/sd.jpg");
    }

    #[test]
    fn maxres_beats_everything() {
        let thumbnails = Thumbnails {
            maxres: Some(Thumbnail::new("https://img/max.jpg")),
            standard: Some(Thumbnail::new("https://img/sd.jpg")),
            high: Some(Thumbnail::new("https://img/hq.jpg")),
            medium: Some(Thumbnail::new("https://img/mq.jpg")),
            default: Some(Thumbnail::new("https://img/default.jpg")),
        };
        assert_eq!(select_thumbnail(&thumbnails).unwrap(), "https://img/max.jpg");
    }

    #[test]
    fn medium_beats_default() {
        let thumbnails = Thumbnails {
            medium: Some(Thumbnail::new("https://img/mq.jpg")),
            default: Some(Thumbnail::new("https://img/default.jpg")),
            ..Default::default()
        };
        assert_eq!(select_thumbnail(&thumbnails).unwrap(), "https://img/mq.jpg");
    }

    #[test]
    fn thumbnails_without_url_are_skipped() {
        let thumbnails = Thumbnails {
            maxres: Some(Thumbnail::new("")),
            standard: Some(Thumbnail::new("")),
            high: Some(Thumbnail::new("https://img/hq.jpg")),
            default: Some(Thumbnail::new("https://img/default.jpg")),
            ..Default::default()
        };
        assert_eq!(select_thumbnail(&thumbnails).unwrap(), "https://img/hq.jpg");

        let thumbnails = Thumbnails {
            maxres: Some(Thumbnail::new("")),
            default: Some(Thumbnail::new("https://img/default.jpg")),
            ..Default::default()
        };
        assert_eq!(select_thumbnail(&thumbnails).unwrap(), "https://img/default.jpg");
    }

    #[test]
    fn no_thumbnails_is_malformed() {
        let err = select_thumbnail(&Thumbnails::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn record_from_snippet() {
        let thumbnails = Thumbnails {
            high: Some(Thumbnail::new("https://img/hq.jpg")),
            default: Some(Thumbnail::new("https://img/default.jpg")),
            ..Default::default()
        };
        let record = VideoRecord::from_snippet("abc", snippet(thumbnails), RecordOptions::default())
            .unwrap();

        assert_eq!(record.title, "A video");
        assert_eq!(record.embed_link, "https://www.youtube.com/embed/abc");
        assert_eq!(record.thumbnail_url.as_deref(), Some("https://img/hq.jpg"));
        assert_eq!(record.published_at, "2021-01-01T00:00:00Z");
        assert!(matches!(record.description, Description::Raw(ref d) if d.starts_with("Intro line")));
    }

    #[test]
    fn record_without_thumbnail_ignores_missing_default() {
        let options = RecordOptions {
            split_description: true,
            include_thumbnail: false,
        };
        let record = VideoRecord::from_snippet("abc", snippet(Thumbnails::default()), options).unwrap();

        assert_eq!(record.thumbnail_url, None);
        match record.description {
            Description::Split(split) => {
                assert_eq!(split.first_paragraph, "Intro line\n\n");
                assert_eq!(split.remaining_text, "Extra note\n");
            }
            Description::Raw(_) => panic!("expected a split description"),
        }
    }

    #[test]
    fn entries_serialize_like_the_listing_format() {
        let thumbnails = Thumbnails {
            default: Some(Thumbnail::new("https://img/default.jpg")),
            ..Default::default()
        };
        let record = VideoRecord::from_snippet("abc", snippet(thumbnails), RecordOptions::default())
            .unwrap();
        let entries = vec![
            VideoEntry::Found(record),
            VideoEntry::NotFound {
                video_id: "gone".into(),
            },
        ];

        let json = serde_json::to_value(&entries).unwrap();
        assert_eq!(json[0]["embedLink"], "https://www.youtube.com/embed/abc");
        assert_eq!(json[0]["thumbnailUrl"], "https://img/default.jpg");
        assert_eq!(json[0]["publishedAt"], "2021-01-01T00:00:00Z");
        assert!(json[0]["description"].is_string());
        assert_eq!(json[1], NOT_FOUND_MESSAGE);
    }
}
