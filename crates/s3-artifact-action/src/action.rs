//! Download orchestration.
//!
//! The [`Action`] struct is the entry point for a run. It resolves the
//! inputs, reports the configuration, makes exactly one call to the
//! [`Downloader`] and hands the outcome to the [`Reporter`].

use s3_artifact_config::{DownloadResult, EnvSnapshot, PipelineContext};
use s3_artifact_downloader::Downloader;
use s3_artifact_inputs::{RawInputs, ResolvedInputs};
use tracing::{info, instrument};

use crate::error::ActionError;
use crate::report::{Reporter, RunStatus};
use crate::sink::ActionSink;

/// One run of the download action.
///
/// Stateless between runs; holds only its collaborators.
pub struct Action<D, S> {
  downloader: D,
  sink: S,
}

impl<D: Downloader, S: ActionSink> Action<D, S> {
  pub fn new(downloader: D, sink: S) -> Self {
    Self { downloader, sink }
  }

  pub fn downloader(&self) -> &D {
    &self.downloader
  }

  pub fn sink(&self) -> &S {
    &self.sink
  }

  /// Resolve, report the configuration, and download.
  ///
  /// Configuration errors return before the downloader is called. Download
  /// errors are returned as-is; nothing is retried. Errors are not logged
  /// here, [`Reporter::finish`] reports them once.
  #[instrument(name = "action_run", skip_all)]
  pub async fn run(
    &self,
    inputs: &RawInputs,
    env: &EnvSnapshot,
  ) -> Result<DownloadResult, ActionError> {
    let resolved = ResolvedInputs::resolve(inputs, env)?;
    let storage = resolved.storage_config();
    let context = PipelineContext::from_env(env);
    let request = resolved.download_request();

    Reporter::new(&self.sink).configuration(&storage, &request);

    info!(
      bucket = %storage.bucket,
      repository = %request.repository,
      run_id = %request.run_id,
      run_attempt = %context.run_attempt,
      destination = %request.path.display(),
      "download_started"
    );

    let result = self.downloader.download(&storage, &context, &request).await?;
    info!(
      artifacts = result.artifact_names.len(),
      files = result.files_downloaded,
      "download_completed"
    );
    Ok(result)
  }

  /// Run and report the outcome.
  pub async fn execute(&self, inputs: &RawInputs, env: &EnvSnapshot) -> RunStatus {
    let outcome = self.run(inputs, env).await;
    Reporter::new(&self.sink).finish(outcome)
  }
}
