//! Action error types.

use s3_artifact_downloader::DownloadError;
use s3_artifact_inputs::InputError;

/// Everything that can fail a run.
///
/// The `Display` output is the run's failure message.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
  /// Configuration could not be resolved. No download was attempted.
  #[error(transparent)]
  Input(#[from] InputError),

  /// The retrieval engine failed.
  #[error(transparent)]
  Download(#[from] DownloadError),

  /// The step output could not be written.
  #[error("failed to set output '{name}': {source}")]
  Output {
    name: String,
    #[source]
    source: std::io::Error,
  },
}
