use crate::{Match, MatchSource};

pub const NOT_FOUND: &str = "Phrase not found.";
pub const NOT_IN_TRANSCRIPT: &str = "Phrase not found in the transcript.";
pub const INVALID_INPUT: &str = "Please enter a valid YouTube link and keyword.";
pub const SERVER_ERROR: &str = "Server error.";
pub const GENERIC_ERROR: &str = "Something went wrong.";

fn provenance(source: MatchSource) -> &'static str {
    match source {
        MatchSource::Whisper => "via Whisper AI",
        MatchSource::Captions => "YouTube captions",
    }
}

/// Deep link into the video the user pasted, jumping to `start` seconds
pub fn deep_link(link: &str, start: f64) -> String {
    format!("{link}&t={start}s")
}

/// Canonical watch link for a video known only by ID
pub fn watch_link(video_id: &str, seconds: f64) -> String {
    format!("https://www.youtube.com/watch?v={video_id}&t={seconds}s")
}

/// Render the match list for a landing-style search: one entry per match,
/// each with its provenance label and a link back into the pasted video.
pub fn render_matches(link: &str, matches: &[Match]) -> String {
    let mut out = String::from("Matches found:");
    for m in matches {
        out.push_str(&format!(
            "\n  [{}s] {} ({})\n      {}",
            m.start,
            m.text,
            provenance(m.source),
            deep_link(link, m.start)
        ));
    }
    out
}

/// Render the single-timestamp outcome of a find
pub fn render_timestamp(video_id: &str, seconds: f64) -> String {
    format!(
        "Jump to {}\n  {}",
        format_hms(seconds),
        watch_link(video_id, seconds)
    )
}

/// HH:MM:SS from whole seconds, wrapping at 24 hours (time-of-day, as the
/// original UI derived it from a UTC date)
pub fn format_hms(seconds: f64) -> String {
    let total = (seconds.max(0.0) as u64) % 86_400;

    let sec = total % 60;
    let min = (total / 60) % 60;
    let hour = total / 3600;

    format!("{hour:02}:{min:02}:{sec:02}")
}
