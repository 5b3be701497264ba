//! S3 Artifact Downloader
//!
//! This crate defines the seam between the action and the artifact-retrieval
//! engine. The engine (name/pattern matching, merging, object transfer and
//! extraction) lives outside this repository; the action only talks to it
//! through the [`Downloader`] trait.
//!
//! [`CommandDownloader`] is the shipped implementation. It runs an external
//! retrieval program and exchanges JSON with it over stdin/stdout.

mod command;

pub use command::{CommandDownloader, DownloadPayload};

use async_trait::async_trait;
use s3_artifact_config::{DownloadRequest, DownloadResult, PipelineContext, StorageConfig};

/// Error type for artifact retrieval.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
  /// The retrieval engine reported a failure. The message is shown verbatim.
  #[error("{0}")]
  Failed(String),

  /// The retrieval program could not be started.
  #[error("failed to start artifact downloader '{program}': {source}")]
  Spawn {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// An I/O error occurred while talking to the retrieval engine.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// The request could not be encoded, or the response could not be decoded.
  #[error("invalid downloader response: {0}")]
  Protocol(#[from] serde_json::Error),
}

/// Artifact retrieval trait.
///
/// Implementations locate the artifacts selected by `request` in the store
/// described by `storage`, and extract them into `request.path`.
#[async_trait]
pub trait Downloader: Send + Sync {
  /// Download the selected artifacts.
  ///
  /// Called exactly once per run. Implementations own any cleanup of
  /// partially written files.
  async fn download(
    &self,
    storage: &StorageConfig,
    context: &PipelineContext,
    request: &DownloadRequest,
  ) -> Result<DownloadResult, DownloadError>;
}
