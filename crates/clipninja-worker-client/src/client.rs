//! Worker job client and state machine driver.
//!
//! One client drives at most one job at a time. `submit` spawns a task that
//! owns every `JobState` transition for its job instance and publishes them
//! on a watch channel; callers observe, they never write.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use clipninja_models::{ClipRequest, JobState};

use crate::config::WorkerConfig;
use crate::deliver::ArtifactDeliverer;
use crate::error::{ClientError, ClientResult};
use crate::sse::EventStreamDecoder;

/// Client for the media-processing worker.
pub struct WorkerClient {
    http: Client,
    config: WorkerConfig,
    deliverer: ArtifactDeliverer,
    in_flight: Arc<AtomicBool>,
}

impl WorkerClient {
    /// Create a new worker client.
    pub fn new(config: WorkerConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Network)?;
        let deliverer = ArtifactDeliverer::new(http.clone(), &config);

        Ok(Self {
            http,
            config,
            deliverer,
            in_flight: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Create from environment variables.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(WorkerConfig::from_env())
    }

    /// Submit a clip request and start driving it to a terminal state.
    ///
    /// At most one job may be in flight per client; a second submission
    /// while one is running is rejected with [`ClientError::JobInFlight`]
    /// and leaves the running job untouched. A submission after a terminal
    /// state (or an abort) starts an independent job instance with its own
    /// state channel.
    pub fn submit(&self, request: ClipRequest) -> ClientResult<JobHandle> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ClientError::JobInFlight);
        }

        let (tx, rx) = watch::channel(JobState::Submitting);
        let slot = InFlightSlot(self.in_flight.clone());
        let http = self.http.clone();
        let base_url = self.config.base_url.clone();
        let deliverer = self.deliverer.clone();

        let task = tokio::spawn(drive_job(http, base_url, deliverer, request, tx, slot));

        Ok(JobHandle { state: rx, task })
    }
}

/// The client's single in-flight slot.
///
/// Released explicitly just before a terminal state is published, so a
/// caller that observes `Succeeded`/`Failed` can resubmit immediately.
/// `Drop` covers the abort path, where the driving task's future is
/// dropped with no terminal state.
struct InFlightSlot(Arc<AtomicBool>);

impl InFlightSlot {
    fn release(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        self.release();
    }
}

/// Handle to an in-flight or finished job.
pub struct JobHandle {
    state: watch::Receiver<JobState>,
    task: JoinHandle<()>,
}

impl JobHandle {
    /// Snapshot of the latest published state.
    pub fn state(&self) -> JobState {
        self.state.borrow().clone()
    }

    /// An additional state listener. Any number may observe a job.
    pub fn subscribe(&self) -> watch::Receiver<JobState> {
        self.state.clone()
    }

    /// Wait for the job's terminal state.
    ///
    /// Returns the last published state if the driving task went away
    /// without one, which only happens for an aborted job.
    pub async fn wait(mut self) -> JobState {
        loop {
            let current = self.state.borrow_and_update().clone();
            if current.is_terminal() {
                return current;
            }
            if self.state.changed().await.is_err() {
                return self.state.borrow().clone();
            }
        }
    }

    /// Abandon the job: close the stream and apply no further transitions.
    ///
    /// No terminal state is synthesized; the worker produced none. The
    /// client is free for a new submission once this returns.
    pub async fn abort(self) {
        self.task.abort();
        let _ = self.task.await;
    }
}

/// Drive one job instance from submission to its terminal state.
///
/// Sole writer of this job's `JobState`; every transition goes through the
/// watch channel, so listeners see them atomically and in stream order.
async fn drive_job(
    http: Client,
    base_url: String,
    deliverer: ArtifactDeliverer,
    request: ClipRequest,
    tx: watch::Sender<JobState>,
    slot: InFlightSlot,
) {
    let fail = |reason: String| {
        info!("Clip job failed: {}", reason);
        slot.release();
        tx.send_replace(JobState::Failed { reason });
    };

    let url = format!("{}/process_video", base_url);
    debug!("Submitting clip request to {}", url);

    let response = match http.post(&url).json(&request).send().await {
        Ok(response) => response,
        Err(err) => return fail(err.to_string()),
    };

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return if body.is_empty() {
            fail(format!("worker returned {}", status))
        } else {
            fail(format!("worker returned {}: {}", status, body))
        };
    }

    let mut state = JobState::Streaming {
        percent: 0,
        message: String::new(),
    };
    tx.send_replace(state.clone());

    let mut decoder = EventStreamDecoder::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(err) => return fail(err.to_string()),
        };

        for event in decoder.feed(&chunk) {
            let Some(next) = state.apply(&event) else {
                continue;
            };
            state = next;

            match &state {
                JobState::Succeeded { output_file } => {
                    // Delivery happens once, here, before the terminal state
                    // is published; listeners never trigger it themselves.
                    if let Err(err) = deliverer.deliver(output_file).await {
                        warn!("Artifact delivery failed: {}", err);
                    }
                    info!("Clip job succeeded: {}", output_file);
                    slot.release();
                    tx.send_replace(state.clone());
                    // Remaining buffered and incoming bytes are discarded.
                    return;
                }
                JobState::Failed { reason } => {
                    return fail(reason.clone());
                }
                _ => {
                    tx.send_replace(state.clone());
                }
            }
        }
    }

    // End of stream with no terminal event.
    fail("stream ended unexpectedly".to_string());
}
