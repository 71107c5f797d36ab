use std::io::{self, Write};

use crate::config::{data_dir, ensure_directories, env_file_path};
use crate::error::{Error, Result};

pub fn run(api_key: Option<String>, channel: Option<String>, force: bool) -> Result<()> {
    ensure_directories()?;

    let env_file = env_file_path();

    if env_file.exists() && !force {
        println!("Config already exists at {}", env_file.display());
        println!("Use --force to overwrite.");
        return Ok(());
    }

    let api_key = if let Some(key) = api_key {
        key
    } else {
        print!("Enter your YouTube Data API key: ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        input
    };

    let contents = env_file_contents(&api_key, channel.as_deref())?;
    std::fs::write(&env_file, contents)?;

    println!("Config saved to {}", env_file.display());
    println!("Data directory: {}", data_dir().display());

    Ok(())
}

fn env_file_contents(api_key: &str, channel: Option<&str>) -> Result<String> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(Error::ApiKeyMissing);
    }

    let mut contents = format!("YOUTUBE_API_KEY={}\n", api_key);
    if let Some(channel) = channel.map(str::trim).filter(|c| !c.is_empty()) {
        contents.push_str(&format!("YOUTUBE_CHANNEL_ID={}\n", channel));
    }
    Ok(contents)
}
