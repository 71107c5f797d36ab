use clap::ValueEnum;

use crate::config::Config;
use crate::error::Result;
use crate::scraper::{ScrapeOptions, list_all_videos};
use crate::video::{Description, NOT_FOUND_MESSAGE, VideoEntry, VideoRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array
    Json,
    /// Numbered human-readable listing
    Text,
}

pub async fn run(
    api_key: Option<String>,
    channel: Option<String>,
    options: ScrapeOptions,
    format: OutputFormat,
) -> Result<()> {
    let config = Config::resolve(api_key, channel)?;

    eprintln!("Fetching videos from channel {}...", config.channel_id);

    let entries = list_all_videos(&config, options).await?;

    let missing = entries.iter().filter(|e| !e.is_found()).count();
    eprintln!("Found {} video(s), {} without details", entries.len(), missing);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
        OutputFormat::Text => {
            for (i, entry) in entries.iter().enumerate() {
                print_entry(i + 1, entry);
            }
        }
    }

    Ok(())
}

fn print_entry(index: usize, entry: &VideoEntry) {
    match entry {
        VideoEntry::Found(record) => print_record(index, record),
        VideoEntry::NotFound { video_id } => {
            println!("{}. {} ({})", index, NOT_FOUND_MESSAGE, video_id);
            println!();
        }
    }
}

fn print_record(index: usize, record: &VideoRecord) {
    println!("{}. {}", index, record.title);
    println!("   {}", format_published_date(&record.published_at));

    if let Description::Split(split) = &record.description {
        if !split.original_publish_timestamp.is_empty() {
            println!("   {}", split.original_publish_timestamp);
        }
    }

    // URLs for easy copying
    println!("   {}", record.embed_link);
    if let Some(thumbnail) = &record.thumbnail_url {
        println!("   {}", thumbnail);
    }
    println!();
}

/// Shorten an RFC 3339 timestamp to its date
fn format_published_date(published_at: &str) -> &str {
    match published_at.split_once('T') {
        Some((date, _)) if date.len() == 10 => date,
        _ => published_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn published_date_is_shortened() {
        assert_eq!(format_published_date("2021-01-01T12:34:56Z"), "2021-01-01");
    }

    #[test]
    fn odd_timestamps_pass_through() {
        assert_eq!(format_published_date("yesterday"), "yesterday");
        assert_eq!(format_published_date(""), "");
    }
}
