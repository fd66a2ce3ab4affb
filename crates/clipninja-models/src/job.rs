//! Clip job request and state.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::event::{ProgressEvent, TerminalEvent, WorkerEvent};
use crate::range::ClipRange;
use crate::timecode::wire_time;

/// A job submission payload for the worker.
///
/// Constructed only from a validated [`ClipRange`], so the duration is
/// always strictly positive. Built fresh per submission and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClipRequest {
    /// Source video URL
    pub source_url: String,

    /// Start time, normalized to HH:MM:SS
    pub start_time: String,

    /// Clip duration, normalized to HH:MM:SS
    pub duration: String,
}

impl ClipRequest {
    /// Build a request from a source URL and a validated range.
    ///
    /// Both times are normalized to the 3-segment wire form; a sub-hour
    /// value gains a `00:` hour segment.
    pub fn new(source_url: impl Into<String>, range: &ClipRange) -> Self {
        Self {
            source_url: source_url.into(),
            start_time: wire_time(range.start_secs),
            duration: wire_time(range.duration_secs()),
        }
    }
}

/// State of the single in-flight clip job.
///
/// Owned by the session driving the form; only the stream-reading task
/// transitions it. `Succeeded` and `Failed` are terminal for a job
/// instance; a fresh submission starts a new instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum JobState {
    /// No job yet
    Idle,
    /// Source preview is loading; submission still allowed
    LoadingPreview,
    /// Request sent, stream not yet open
    Submitting,
    /// Stream open; latest progress snapshot
    Streaming { percent: u8, message: String },
    /// Terminal success with the worker's artifact name
    Succeeded { output_file: String },
    /// Terminal failure with a human-readable reason
    Failed { reason: String },
}

impl JobState {
    /// Whether this job instance has reached its terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Succeeded { .. } | JobState::Failed { .. })
    }

    /// Whether a new submission may start from this state.
    ///
    /// Only `Submitting` and `Streaming` hold the in-flight slot.
    pub fn accepts_submission(&self) -> bool {
        !matches!(self, JobState::Submitting | JobState::Streaming { .. })
    }

    /// Apply a worker event, returning the next state.
    ///
    /// Progress overwrites the previous snapshot (clamped to 100), never
    /// accumulates. Events are only meaningful while `Streaming`; anything
    /// arriving after a terminal state returns `None` and must be ignored
    /// by the caller, not reordered.
    pub fn apply(&self, event: &WorkerEvent) -> Option<JobState> {
        if !matches!(self, JobState::Streaming { .. }) {
            return None;
        }

        Some(match event {
            WorkerEvent::Progress(ProgressEvent { progress, message }) => JobState::Streaming {
                percent: (*progress).min(100) as u8,
                message: message.clone(),
            },
            WorkerEvent::Terminal(TerminalEvent::Success { output_file }) => JobState::Succeeded {
                output_file: output_file.clone(),
            },
            WorkerEvent::Terminal(TerminalEvent::Error { message }) => JobState::Failed {
                reason: message.clone(),
            },
        })
    }
}
