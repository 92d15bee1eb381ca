pub mod client;
pub mod config;
pub mod render;
pub mod workflow;

use serde::Deserialize;

/// Where a match came from: YouTube's own captions or Whisper transcription
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSource {
    #[default]
    Captions,
    Whisper,
}

impl std::fmt::Display for MatchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchSource::Captions => write!(f, "captions"),
            MatchSource::Whisper => write!(f, "whisper"),
        }
    }
}

/// One occurrence of the search phrase in a video's transcript
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub text: String,
    pub start: f64,
    pub source: MatchSource,
}

/// Extract an 11-character video ID from a pasted link.
///
/// Returns the first run of exactly 11 ID characters immediately preceded by
/// `v=` or `/`, covering watch, youtu.be, embed and shorts links alike.
/// Pure and total: anything without such a run yields None.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();

    regex::Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})")
        .unwrap()
        .captures(input)
        .map(|caps| caps[1].to_string())
}
