//! Shared data models for the ClipNinja job protocol.
//!
//! This crate provides Serde-serializable types for:
//! - Time text parsing and formatting (MM:SS / HH:MM:SS)
//! - Clip range validation
//! - Clip job requests and job state
//! - Worker progress/terminal event schemas

pub mod event;
pub mod job;
pub mod range;
pub mod timecode;

// Re-export common types
pub use event::{ProgressEvent, TerminalEvent, WorkerEvent};
pub use job::{ClipRequest, JobState};
pub use range::{validate_range, ClipRange, RangeError};
pub use timecode::{format_time, parse_time, wire_time, TimeError};
