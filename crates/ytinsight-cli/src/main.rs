mod analyze;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ytinsight-cli")]
#[command(about = "Turn YouTube comments into audience insights and video ideas")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a video's comments, analyze them and print the result as JSON
    Analyze {
        /// Video URL (watch, youtu.be, embed, shorts) or bare 11-character ID
        url: String,

        /// Maximum number of comments to fetch (overrides `YTI_MAX_COMMENTS`)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_comments: Option<u32>,

        /// Print single-line JSON instead of pretty-printed output
        #[arg(long)]
        compact: bool,
    },
    /// Print the video ID extracted from a YouTube URL
    VideoId {
        /// Video URL or bare ID
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let default_level = std::env::var("YTI_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Analyze {
            url,
            max_comments,
            compact,
        }) => analyze::run_analyze(&url, max_comments, compact).await?,
        Some(Commands::VideoId { url }) => println!("{}", analyze::resolve_video_id(&url)?),
        None => Cli::command().print_help()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests;
