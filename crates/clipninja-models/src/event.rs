//! Worker stream event schemas.
//!
//! These payloads maintain compatibility with the existing worker protocol:
//! each streamed frame carries one JSON object, either a progress update or
//! the single terminal event that ends the job.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Progress update from the worker.
///
/// Repeatable; the latest value replaces the previous one. The worker emits
/// non-decreasing percentages by convention, but nothing here assumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProgressEvent {
    /// Percent complete (0-100 by convention; wider values deserialize
    /// fine and are clamped when applied, never dropped)
    pub progress: u32,

    /// Human-readable stage description
    #[serde(default)]
    pub message: String,
}

/// The single event that ends a job's stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TerminalEvent {
    /// Processing finished; the artifact is addressable by `output_file`.
    Success { output_file: String },

    /// Processing failed with a worker-supplied reason.
    Error { message: String },
}

/// Any event the worker may stream.
///
/// Untagged with `Terminal` first: a payload carrying a `status` field is
/// terminal regardless of what else it carries, everything else is treated
/// as progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum WorkerEvent {
    Terminal(TerminalEvent),
    Progress(ProgressEvent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_event_deserializes() {
        let event: WorkerEvent =
            serde_json::from_str(r#"{"progress": 40, "message": "Encoding..."}"#).unwrap();
        assert_eq!(
            event,
            WorkerEvent::Progress(ProgressEvent {
                progress: 40,
                message: "Encoding...".to_string(),
            })
        );
    }

    #[test]
    fn test_progress_message_optional() {
        let event: WorkerEvent = serde_json::from_str(r#"{"progress": 10}"#).unwrap();
        assert!(matches!(
            event,
            WorkerEvent::Progress(ProgressEvent { progress: 10, .. })
        ));
    }

    #[test]
    fn test_out_of_convention_progress_still_parses() {
        // The worker owns the 0-100 convention; a wild value must not turn
        // the whole frame into a parse failure.
        let event: WorkerEvent = serde_json::from_str(r#"{"progress": 300}"#).unwrap();
        assert!(matches!(
            event,
            WorkerEvent::Progress(ProgressEvent { progress: 300, .. })
        ));
    }

    #[test]
    fn test_success_event_deserializes() {
        let event: WorkerEvent =
            serde_json::from_str(r#"{"status": "success", "output_file": "/tmp/clip.mp4"}"#)
                .unwrap();
        assert_eq!(
            event,
            WorkerEvent::Terminal(TerminalEvent::Success {
                output_file: "/tmp/clip.mp4".to_string(),
            })
        );
    }

    #[test]
    fn test_error_event_deserializes() {
        let event: WorkerEvent =
            serde_json::from_str(r#"{"status": "error", "message": "yt-dlp failed"}"#).unwrap();
        assert_eq!(
            event,
            WorkerEvent::Terminal(TerminalEvent::Error {
                message: "yt-dlp failed".to_string(),
            })
        );
    }

    #[test]
    fn test_status_wins_over_extra_fields() {
        // A payload carrying both progress fields and a status is terminal.
        let event: WorkerEvent = serde_json::from_str(
            r#"{"progress": 99, "status": "error", "message": "disk full"}"#,
        )
        .unwrap();
        assert!(matches!(event, WorkerEvent::Terminal(TerminalEvent::Error { .. })));
    }
}
