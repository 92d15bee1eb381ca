use eyre::Result;
use log::{debug, warn};

use crate::client::SearchRequest;
use crate::extract_video_id;

/// Where the video identifier for a submission comes from
#[derive(Debug, Clone, Copy)]
pub enum VideoSource<'a> {
    /// A pasted link the ID must be extracted from
    Link(&'a str),
    /// An ID that is already known good (route-parameter style, not re-validated)
    Id(&'a str),
}

/// Why a submission ended in `Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailReason {
    /// No extractable video ID, or an empty keyword; nothing was sent
    InvalidInput,
    /// The request was sent but the backend could not produce an outcome
    Backend,
}

/// Why `submit` refused to produce a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A request is already outstanding; submissions are serialized
    InFlight,
    InvalidInput,
}

/// Identifies which submission a response belongs to. `resolve` only accepts
/// the token minted by the most recent `submit`, so a response that outlives
/// a reset can never clobber newer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token(u64);

/// Observable state of one submit-and-render cycle
#[derive(Debug)]
pub enum State<O> {
    Idle,
    Submitting,
    Succeeded(O),
    Failed(FailReason),
}

/// An accepted submission: the wire request plus the token `resolve` expects
#[derive(Debug)]
pub struct Submission {
    pub request: SearchRequest,
    pub token: Token,
}

/// The submit-and-render state machine, shared by both commands and
/// parameterized by the outcome the response shape produces.
///
/// Validation is synchronous inside [`Workflow::submit`]; the caller performs
/// the single HTTP request for an accepted submission and hands the result to
/// [`Workflow::resolve`].
#[derive(Debug)]
pub struct Workflow<O> {
    state: State<O>,
    generation: u64,
}

impl<O> Workflow<O> {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> &State<O> {
        &self.state
    }

    /// Validate the inputs and, if they pass, enter `Submitting`.
    ///
    /// Returns the request to send. While a request is outstanding this is a
    /// no-op rejection, so a second submit can never cause a second network
    /// effect. Validation failure moves the machine to
    /// `Failed(InvalidInput)` without producing a request.
    pub fn submit(&mut self, video: VideoSource<'_>, keyword: &str) -> Result<Submission, Rejection> {
        if matches!(self.state, State::Submitting) {
            debug!("submit ignored: request already in flight");
            return Err(Rejection::InFlight);
        }

        let video_id = match video {
            VideoSource::Link(link) => extract_video_id(link),
            VideoSource::Id(id) => Some(id.to_string()),
        };
        let keyword = keyword.trim();

        let video_id = match video_id {
            Some(id) if !keyword.is_empty() => id,
            _ => {
                self.state = State::Failed(FailReason::InvalidInput);
                return Err(Rejection::InvalidInput);
            }
        };

        self.generation += 1;
        self.state = State::Submitting;
        Ok(Submission {
            request: SearchRequest {
                video_id,
                keyword: keyword.to_string(),
            },
            token: Token(self.generation),
        })
    }

    /// Record the outcome of the request identified by `token`.
    ///
    /// Returns false when the token is stale (a reset or newer submission
    /// happened in the meantime); the state is left untouched in that case.
    pub fn resolve(&mut self, token: Token, result: Result<O>) -> bool {
        if token != Token(self.generation) || !matches!(self.state, State::Submitting) {
            debug!("ignoring stale response for submission {}", token.0);
            return false;
        }

        self.state = match result {
            Ok(outcome) => State::Succeeded(outcome),
            Err(e) => {
                warn!("search request failed: {e:#}");
                State::Failed(FailReason::Backend)
            }
        };
        true
    }

    /// Return to `Idle` unconditionally. Any in-flight submission is
    /// abandoned: its token will no longer resolve.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = State::Idle;
    }
}

impl<O> Default for Workflow<O> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eyre::eyre;

    const LINK: &str = "https://youtu.be/dQw4w9WgXcQ";

    #[test]
    fn test_submit_extracts_video_id() {
        let mut wf: Workflow<Vec<crate::Match>> = Workflow::new();
        let sub = wf.submit(VideoSource::Link(LINK), "  never gonna ").unwrap();
        assert_eq!(sub.request.video_id, "dQw4w9WgXcQ");
        assert_eq!(sub.request.keyword, "never gonna");
        assert!(matches!(wf.state(), State::Submitting));
    }

    #[test]
    fn test_route_id_is_trusted() {
        let mut wf: Workflow<Option<f64>> = Workflow::new();
        let sub = wf.submit(VideoSource::Id("abc12345678"), "hello").unwrap();
        assert_eq!(sub.request.video_id, "abc12345678");
    }

    #[test]
    fn test_empty_keyword_never_submits() {
        let mut wf: Workflow<Option<f64>> = Workflow::new();
        assert!(matches!(
            wf.submit(VideoSource::Link(LINK), "   "),
            Err(Rejection::InvalidInput)
        ));
        assert!(matches!(wf.state(), State::Failed(FailReason::InvalidInput)));
    }

    #[test]
    fn test_bad_link_never_submits() {
        let mut wf: Workflow<Vec<crate::Match>> = Workflow::new();
        assert!(matches!(
            wf.submit(VideoSource::Link("no id here"), "hello"),
            Err(Rejection::InvalidInput)
        ));
        assert!(matches!(wf.state(), State::Failed(FailReason::InvalidInput)));
    }

    #[test]
    fn test_second_submit_while_in_flight_is_rejected() {
        let mut wf: Workflow<Option<f64>> = Workflow::new();
        let first = wf.submit(VideoSource::Link(LINK), "hello").unwrap();
        assert!(matches!(
            wf.submit(VideoSource::Link(LINK), "hello"),
            Err(Rejection::InFlight)
        ));
        assert!(matches!(wf.state(), State::Submitting));
        // the first submission still resolves normally
        assert!(wf.resolve(first.token, Ok(Some(12.0))));
        assert!(matches!(wf.state(), State::Succeeded(Some(t)) if *t == 12.0));
    }

    #[test]
    fn test_resolve_error_is_backend_failure() {
        let mut wf: Workflow<Option<f64>> = Workflow::new();
        let sub = wf.submit(VideoSource::Link(LINK), "hello").unwrap();
        assert!(wf.resolve(sub.token, Err(eyre!("connection refused"))));
        assert!(matches!(wf.state(), State::Failed(FailReason::Backend)));
    }

    #[test]
    fn test_empty_outcome_is_still_success() {
        let mut wf: Workflow<Vec<crate::Match>> = Workflow::new();
        let sub = wf.submit(VideoSource::Link(LINK), "hello").unwrap();
        assert!(wf.resolve(sub.token, Ok(vec![])));
        assert!(matches!(wf.state(), State::Succeeded(m) if m.is_empty()));
    }

    #[test]
    fn test_reset_abandons_in_flight_request() {
        let mut wf: Workflow<Option<f64>> = Workflow::new();
        let sub = wf.submit(VideoSource::Link(LINK), "hello").unwrap();
        wf.reset();
        assert!(!wf.resolve(sub.token, Ok(Some(99.0))));
        assert!(matches!(wf.state(), State::Idle));
    }

    #[test]
    fn test_stale_token_cannot_clobber_newer_submission() {
        let mut wf: Workflow<Option<f64>> = Workflow::new();
        let old = wf.submit(VideoSource::Link(LINK), "first").unwrap();
        wf.reset();
        let new = wf.submit(VideoSource::Link(LINK), "second").unwrap();
        assert!(!wf.resolve(old.token, Ok(Some(1.0))));
        assert!(matches!(wf.state(), State::Submitting));
        assert!(wf.resolve(new.token, Ok(Some(2.0))));
        assert!(matches!(wf.state(), State::Succeeded(Some(t)) if *t == 2.0));
    }

    #[test]
    fn test_reset_clears_failure() {
        let mut wf: Workflow<Option<f64>> = Workflow::new();
        let _ = wf.submit(VideoSource::Link(LINK), "");
        assert!(matches!(wf.state(), State::Failed(_)));
        wf.reset();
        assert!(matches!(wf.state(), State::Idle));
        // and the machine accepts a fresh submission afterwards
        assert!(wf.submit(VideoSource::Link(LINK), "hello").is_ok());
    }
}
