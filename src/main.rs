use std::path::PathBuf;

use eyre::Result;
use log::{debug, info};

mod cli;

use cli::{Cli, Command};
use tubecue::Match;
use tubecue::client::{MatchList, SearchClient, SingleTimestamp};
use tubecue::config::{self, Config};
use tubecue::render;
use tubecue::workflow::{FailReason, Rejection, State, VideoSource, Workflow};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("tubecue.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tubecue")
        .join("logs")
}

fn build_after_help() -> String {
    let config_path = config::config_path();
    let log_path = log_dir().join("tubecue.log");

    format!(
        "\nCONFIG:\n  {} (search_backend, find_backend)\n\nLogs are written to: {}",
        config_path.display(),
        log_path.display()
    )
}

/// CLI flag beats config file beats built-in default
fn backend_url(flag: Option<&str>, configured: Option<&str>, default_url: &str) -> String {
    flag.or(configured).unwrap_or(default_url).to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_default();

    if cli.verbose {
        let config_path = config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
    }

    let http = reqwest::Client::new();

    match cli.command {
        Command::Search { link, keywords } => {
            let base = backend_url(
                cli.backend.as_deref(),
                config.search_backend.as_deref(),
                config::DEFAULT_SEARCH_BACKEND,
            );
            if cli.verbose {
                eprintln!("Backend: {base}");
            }
            let client = SearchClient::new(http, base);
            let mut workflow: Workflow<Vec<Match>> = Workflow::new();
            let label_keywords = keywords.len() > 1;

            for keyword in &keywords {
                if label_keywords {
                    println!("-- {keyword}");
                }

                match workflow.submit(VideoSource::Link(&link), keyword) {
                    Ok(submission) => {
                        debug!(
                            "search videoId={} keyword={keyword:?}",
                            submission.request.video_id
                        );
                        let outcome = client.submit::<MatchList>(&submission.request).await;
                        workflow.resolve(submission.token, outcome);
                    }
                    Err(Rejection::InFlight) => continue,
                    Err(Rejection::InvalidInput) => {}
                }

                match workflow.state() {
                    State::Succeeded(found) if found.is_empty() => {
                        println!("{}", render::NOT_FOUND);
                    }
                    State::Succeeded(found) => {
                        println!("{}", render::render_matches(&link, found));
                    }
                    State::Failed(FailReason::InvalidInput) => {
                        println!("{}", render::INVALID_INPUT);
                    }
                    State::Failed(FailReason::Backend) => {
                        println!("{}", render::SERVER_ERROR);
                    }
                    State::Idle | State::Submitting => {}
                }

                workflow.reset();
            }
        }
        Command::Find { video_id, keywords } => {
            let base = backend_url(
                cli.backend.as_deref(),
                config.find_backend.as_deref(),
                config::DEFAULT_FIND_BACKEND,
            );
            if cli.verbose {
                eprintln!("Backend: {base}");
                eprintln!("Video: {video_id}");
            }
            let client = SearchClient::new(http, base);
            let mut workflow: Workflow<Option<f64>> = Workflow::new();
            let label_keywords = keywords.len() > 1;

            for keyword in &keywords {
                if label_keywords {
                    println!("-- {keyword}");
                }

                match workflow.submit(VideoSource::Id(&video_id), keyword) {
                    Ok(submission) => {
                        debug!("find videoId={video_id} keyword={keyword:?}");
                        let outcome = client.submit::<SingleTimestamp>(&submission.request).await;
                        workflow.resolve(submission.token, outcome);
                    }
                    Err(Rejection::InFlight) => continue,
                    // A blank phrase is skipped outright, like the keyword
                    // page's no-op on an empty field
                    Err(Rejection::InvalidInput) => {
                        workflow.reset();
                        continue;
                    }
                }

                match workflow.state() {
                    State::Succeeded(Some(timestamp)) => {
                        println!("{}", render::render_timestamp(&video_id, *timestamp));
                    }
                    State::Succeeded(None) => {
                        println!("{}", render::NOT_IN_TRANSCRIPT);
                    }
                    State::Failed(_) => {
                        println!("{}", render::GENERIC_ERROR);
                    }
                    State::Idle | State::Submitting => {}
                }

                workflow.reset();
            }
        }
    }

    Ok(())
}
