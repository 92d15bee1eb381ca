use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tubecue",
    about = "Jump to the moment a phrase is spoken in a YouTube video",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Backend base URL (overrides config and the built-in default)
    #[arg(short, long, global = true)]
    pub backend: Option<String>,

    /// Show backend address and request metadata
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Find every occurrence of a phrase in a pasted video link
    Search {
        /// YouTube video link (watch, youtu.be, embed or shorts form)
        link: String,

        /// Phrases to look for, one search each
        #[arg(required = true)]
        keywords: Vec<String>,
    },

    /// Find the first occurrence of a phrase in a video known by ID
    Find {
        /// 11-character video ID
        video_id: String,

        /// Phrases to look for, one search each
        #[arg(required = true)]
        keywords: Vec<String>,
    },
}
