use eyre::{Result, bail};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{Match, MatchSource};

/// Body of the one request both commands send
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub video_id: String,
    pub keyword: String,
}

/// How to read a `/search` response body into an outcome.
///
/// The search and find backends answer the same request with different
/// schemas; each shape is one adapter.
pub trait ResponseShape {
    type Outcome;

    fn interpret(body: serde_json::Value) -> Result<Self::Outcome>;
}

/// `{ "matches": [ { "start", "text" }, ... ], "source"?: "captions" | "whisper" }`
///
/// An absent or empty list is a normal "no match" outcome, not an error. The
/// top-level source tag applies to every match and defaults to captions.
pub struct MatchList;

#[derive(Debug, Deserialize)]
struct MatchListBody {
    #[serde(default)]
    matches: Vec<RawMatch>,
    source: Option<MatchSource>,
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    start: f64,
    text: String,
}

impl ResponseShape for MatchList {
    type Outcome = Vec<Match>;

    fn interpret(body: serde_json::Value) -> Result<Vec<Match>> {
        let body: MatchListBody = serde_json::from_value(body)?;
        let source = body.source.unwrap_or_default();
        Ok(body
            .matches
            .into_iter()
            .map(|m| Match {
                text: m.text,
                start: m.start,
                source,
            })
            .collect())
    }
}

/// `{ "timestamp": number | null }` — null means the phrase was not found.
/// Any other shape is an error.
pub struct SingleTimestamp;

impl ResponseShape for SingleTimestamp {
    type Outcome = Option<f64>;

    fn interpret(body: serde_json::Value) -> Result<Option<f64>> {
        // The field must be present: a body without it (e.g. an error object)
        // is a failure, not a "not found".
        match body.get("timestamp") {
            Some(serde_json::Value::Null) => Ok(None),
            Some(v) => match v.as_f64() {
                Some(ts) => Ok(Some(ts)),
                None => bail!("unexpected timestamp value: {v}"),
            },
            None => bail!("unexpected find response: {body}"),
        }
    }
}

/// Thin client for one backend base URL
#[derive(Debug, Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    base_url: String,
}

impl SearchClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// POST the request to `{base}/search` and interpret the JSON response
    /// through the given shape. One attempt, no retry; a non-2xx status or an
    /// unreadable body is an error.
    pub async fn submit<S: ResponseShape>(&self, request: &SearchRequest) -> Result<S::Outcome> {
        let url = format!("{}/search", self.base_url);
        debug!("POST {url} videoId={} keyword={:?}", request.video_id, request.keyword);

        let body: serde_json::Value = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        S::interpret(body)
    }
}
