//! Client for the media-processing worker.
//!
//! This crate owns the job protocol: submitting a clip request, consuming
//! the worker's incrementally-delivered progress stream, driving the job
//! state machine to a terminal outcome, and delivering the resulting
//! artifact. The worker's decode/encode internals are opaque; only its
//! submission and stream shapes are known here.

pub mod client;
pub mod config;
pub mod deliver;
pub mod error;
pub mod sse;

pub use client::{JobHandle, WorkerClient};
pub use config::WorkerConfig;
pub use deliver::{artifact_basename, ArtifactDeliverer, Delivery};
pub use error::{ClientError, ClientResult, DeliveryError, DeliveryResult};
pub use sse::EventStreamDecoder;
