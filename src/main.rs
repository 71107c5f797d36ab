use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use yt_channel_scraper::{Error, ScrapeOptions};
use yt_channel_scraper::commands;
use yt_channel_scraper::commands::videos::OutputFormat;
use yt_channel_scraper::config::load_env;

#[derive(Parser)]
#[command(name = "yt-channel-scraper")]
#[command(about = "Collect metadata for every video on a YouTube channel")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ChannelArgs {
    /// Channel ID (defaults to YOUTUBE_CHANNEL_ID)
    #[arg(short, long)]
    channel: Option<String>,

    /// YouTube Data API key (defaults to YOUTUBE_API_KEY)
    #[arg(short = 'k', long)]
    api_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every video on the channel with its details
    Videos {
        #[command(flatten)]
        target: ChannelArgs,

        /// Split descriptions into first paragraph, original publish line and the rest
        #[arg(short, long)]
        split_description: bool,

        /// Leave out thumbnail URLs
        #[arg(long)]
        no_thumbnail: bool,

        /// Detail requests in flight per page (default: 1)
        #[arg(short = 'j', long, default_value = "1")]
        concurrency: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// List the video IDs of the channel
    Ids {
        #[command(flatten)]
        target: ChannelArgs,
    },

    /// Save the YouTube API key (and optionally a channel) to the config file
    Init {
        /// YouTube Data API key
        #[arg(short = 'k', long)]
        api_key: Option<String>,

        /// Default channel ID
        #[arg(short, long)]
        channel: Option<String>,

        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,yt_channel_scraper=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load environment variables first so RUST_LOG from .env applies
    let env_files = load_env();
    init_logging(cli.verbose);
    for path in &env_files {
        tracing::debug!(path = %path.display(), "Loaded .env");
    }

    let result = match cli.command {
        Commands::Videos {
            target,
            split_description,
            no_thumbnail,
            concurrency,
            format,
        } => {
            let options = ScrapeOptions {
                split_description,
                include_thumbnail: !no_thumbnail,
                concurrency,
            };
            commands::videos::run(target.api_key, target.channel, options, format).await
        }
        Commands::Ids { target } => commands::ids::run(target.api_key, target.channel).await,
        Commands::Init {
            api_key,
            channel,
            force,
        } => commands::init::run(api_key, channel, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(exit_code(&e));
    }
}

/// 2 when the run was refused before contacting the API, 1 for everything else
fn exit_code(error: &Error) -> i32 {
    if error.is_config() { 2 } else { 1 }
}
