//! Worker client configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the worker client.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Base URL of the media-processing worker
    pub base_url: String,
    /// Request timeout, covering the whole streamed response
    pub timeout: Duration,
    /// Directory artifacts are saved into
    pub download_dir: PathBuf,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout: Duration::from_secs(600), // trims of long sources take minutes
            download_dir: std::env::temp_dir(),
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("CLIP_WORKER_URL").unwrap_or(defaults.base_url),
            timeout: std::env::var("CLIP_WORKER_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            download_dir: std::env::var("CLIP_DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.download_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = WorkerConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000");
        assert_eq!(config.timeout, Duration::from_secs(600));
    }
}
