//! Artifact delivery.
//!
//! A successful job names its output file on the worker's filesystem. The
//! deliverer turns that name into the worker's retrieval address and saves
//! the artifact bytes locally.

use std::path::PathBuf;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::config::WorkerConfig;
use crate::error::{DeliveryError, DeliveryResult};

/// Outcome of a delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Artifact saved to the given path.
    Saved(PathBuf),
    /// No usable artifact name; nothing fetched. The job is still a success.
    Skipped,
}

/// Final path segment of an output file, independent of separator
/// convention. Returns `None` when the name is empty.
pub fn artifact_basename(output_file: &str) -> Option<&str> {
    let name = output_file.rsplit(['/', '\\']).next()?;
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Fetches job artifacts from the worker's download route.
#[derive(Debug, Clone)]
pub struct ArtifactDeliverer {
    http: Client,
    base_url: String,
    download_dir: PathBuf,
}

impl ArtifactDeliverer {
    pub fn new(http: Client, config: &WorkerConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
            download_dir: config.download_dir.clone(),
        }
    }

    /// Retrieval address for an artifact base name.
    pub fn download_url(&self, basename: &str) -> String {
        format!("{}/download/{}", self.base_url, basename)
    }

    /// Fetch the named artifact and save it under the download directory.
    ///
    /// An output file with no base name is skipped with a warning rather
    /// than failing; the job already succeeded and stays succeeded.
    pub async fn deliver(&self, output_file: &str) -> DeliveryResult<Delivery> {
        let Some(basename) = artifact_basename(output_file) else {
            warn!("Output file {:?} has no base name, skipping delivery", output_file);
            return Ok(Delivery::Skipped);
        };

        let url = self.download_url(basename);
        debug!("Fetching artifact from {}", url);

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(DeliveryError::RequestFailed(format!(
                "worker returned {}",
                response.status()
            )));
        }

        let target = self.download_dir.join(basename);
        let mut file = tokio::fs::File::create(&target).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        info!("Saved artifact to {}", target.display());
        Ok(Delivery::Saved(target))
    }
}
