use crate::config::Config;
use crate::error::Result;
use crate::scraper::list_video_ids;

pub async fn run(api_key: Option<String>, channel: Option<String>) -> Result<()> {
    let config = Config::resolve(api_key, channel)?;

    eprintln!("Listing video IDs for channel {}...", config.channel_id);

    let ids = list_video_ids(&config).await?;

    if ids.is_empty() {
        eprintln!("No videos found for channel: {}", config.channel_id);
        return Ok(());
    }

    for id in &ids {
        println!("{}", id);
    }
    eprintln!("{} video(s)", ids.len());

    Ok(())
}
