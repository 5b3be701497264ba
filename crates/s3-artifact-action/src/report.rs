//! Human-readable run reporting.

use s3_artifact_config::{DownloadRequest, DownloadResult, Selection, StorageConfig};
use s3_artifact_inputs::fields::OUTPUT_DOWNLOAD_PATH;
use tracing::debug;

use crate::error::ActionError;
use crate::sink::ActionSink;

/// Final state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
  Succeeded,
  Failed,
}

/// Formats the run's progress and outcome onto an [`ActionSink`].
pub struct Reporter<'a, S: ?Sized> {
  sink: &'a S,
}

impl<'a, S: ActionSink + ?Sized> Reporter<'a, S> {
  pub fn new(sink: &'a S) -> Self {
    Self { sink }
  }

  /// Describe the resolved configuration before the download starts.
  pub fn configuration(&self, storage: &StorageConfig, request: &DownloadRequest) {
    self.sink.info("Downloading artifacts...");
    match request.selection() {
      Selection::Name(name) => self.sink.info(&format!("  Artifact name: {}", name)),
      Selection::Pattern(pattern) => self.sink.info(&format!("  Pattern: {}", pattern)),
      Selection::All => self.sink.info("  Downloading all artifacts"),
    }
    self
      .sink
      .info(&format!("  Repository: {}", request.repository));
    self.sink.info(&format!("  Run ID: {}", request.run_id));
    self
      .sink
      .info(&format!("  Destination: {}", request.path.display()));
    self.sink.info(&format!("  S3 bucket: {}", storage.bucket));
    if let Some(prefix) = &storage.prefix {
      self.sink.info(&format!("  S3 prefix: {}", prefix));
    }
    if let Some(endpoint) = &storage.endpoint {
      self.sink.info(&format!("  S3 endpoint: {}", endpoint));
    }
  }

  /// Report the outcome of a run. Consumes the outcome.
  ///
  /// On success the `download-path` output is set before the summary is
  /// written. If setting it fails, the run fails with that error instead.
  pub fn finish(&self, outcome: Result<DownloadResult, ActionError>) -> RunStatus {
    let result = match outcome {
      Ok(result) => result,
      Err(e) => return self.failed(&e),
    };

    let download_path = result.download_path.display().to_string();
    if let Err(source) = self.sink.set_output(OUTPUT_DOWNLOAD_PATH, &download_path) {
      return self.failed(&ActionError::Output {
        name: OUTPUT_DOWNLOAD_PATH.to_string(),
        source,
      });
    }

    self.sink.info("");
    self.sink.info("Artifact download complete!");
    self
      .sink
      .info(&format!("  Downloaded: {}", result.artifact_names.join(", ")));
    self
      .sink
      .info(&format!("  Files: {}", result.files_downloaded));
    self.sink.info(&format!("  Path: {}", download_path));

    RunStatus::Succeeded
  }

  /// The sink's failure is the run's only visible report; the event is debug.
  fn failed(&self, e: &ActionError) -> RunStatus {
    debug!(error = %e, "run_failed");
    self.sink.set_failed(&e.to_string());
    RunStatus::Failed
  }
}

#[cfg(test)]
mod tests {
  use std::io;
  use std::path::PathBuf;

  use s3_artifact_config::LenientInt;
  use s3_artifact_downloader::DownloadError;

  use super::*;
  use crate::sink::{RecordingSink, SinkEvent};

  fn storage(prefix: Option<&str>, endpoint: Option<&str>) -> StorageConfig {
    StorageConfig::new(
      "ci-artifacts",
      prefix.map(str::to_string),
      endpoint.map(str::to_string),
      "us-east-1",
      false,
    )
  }

  fn request(name: Option<&str>, pattern: Option<&str>) -> DownloadRequest {
    DownloadRequest {
      name: name.map(str::to_string),
      pattern: pattern.map(str::to_string),
      path: PathBuf::from("/home/user/out"),
      merge_multiple: false,
      repository: "acme/widgets".to_string(),
      run_id: LenientInt::new(42),
    }
  }

  fn configuration_lines(storage: &StorageConfig, request: &DownloadRequest) -> Vec<String> {
    let sink = RecordingSink::new();
    Reporter::new(&sink).configuration(storage, request);
    sink.info_lines()
  }

  #[test]
  fn test_configuration_all_artifacts() {
    let lines = configuration_lines(&storage(None, None), &request(None, None));
    assert_eq!(
      lines,
      vec![
        "Downloading artifacts...",
        "  Downloading all artifacts",
        "  Repository: acme/widgets",
        "  Run ID: 42",
        "  Destination: /home/user/out",
        "  S3 bucket: ci-artifacts",
      ]
    );
  }

  #[test]
  fn test_configuration_selection_mode() {
    let lines = configuration_lines(&storage(None, None), &request(Some("build"), None));
    assert_eq!(lines[1], "  Artifact name: build");

    let lines = configuration_lines(&storage(None, None), &request(None, Some("*.zip")));
    assert_eq!(lines[1], "  Pattern: *.zip");

    let lines = configuration_lines(&storage(None, None), &request(Some("build"), Some("*.zip")));
    assert_eq!(lines[1], "  Artifact name: build");
  }

  #[test]
  fn test_configuration_optional_storage_lines() {
    let lines = configuration_lines(
      &storage(Some("builds/"), Some("http://minio:9000")),
      &request(None, None),
    );
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[6], "  S3 prefix: builds/");
    assert_eq!(lines[7], "  S3 endpoint: http://minio:9000");
  }

  #[test]
  fn test_configuration_nan_run_id() {
    let mut request = request(None, None);
    request.run_id = LenientInt::NAN;
    let lines = configuration_lines(&storage(None, None), &request);
    assert_eq!(lines[3], "  Run ID: NaN");
  }

  #[test]
  fn test_finish_success() {
    let sink = RecordingSink::new();
    let status = Reporter::new(&sink).finish(Ok(DownloadResult {
      download_path: PathBuf::from("/home/user/out"),
      artifact_names: vec!["build-logs".to_string(), "coverage".to_string()],
      files_downloaded: 3,
    }));

    assert_eq!(status, RunStatus::Succeeded);
    assert_eq!(
      sink.events(),
      vec![
        SinkEvent::Output {
          name: "download-path".to_string(),
          value: "/home/user/out".to_string(),
        },
        SinkEvent::Info("".to_string()),
        SinkEvent::Info("Artifact download complete!".to_string()),
        SinkEvent::Info("  Downloaded: build-logs, coverage".to_string()),
        SinkEvent::Info("  Files: 3".to_string()),
        SinkEvent::Info("  Path: /home/user/out".to_string()),
      ]
    );
  }

  #[test]
  fn test_finish_failure_reports_message_only() {
    let sink = RecordingSink::new();
    let status = Reporter::new(&sink).finish(Err(ActionError::Download(DownloadError::Failed(
      "artifact not found".to_string(),
    ))));

    assert_eq!(status, RunStatus::Failed);
    assert_eq!(
      sink.events(),
      vec![SinkEvent::Failed("artifact not found".to_string())]
    );
  }

  /// Records like [`RecordingSink`] but cannot set outputs.
  #[derive(Default)]
  struct ReadOnlyOutputSink {
    inner: RecordingSink,
  }

  impl ActionSink for ReadOnlyOutputSink {
    fn info(&self, line: &str) {
      self.inner.info(line);
    }

    fn set_output(&self, _name: &str, _value: &str) -> io::Result<()> {
      Err(io::Error::new(io::ErrorKind::PermissionDenied, "output file is read-only"))
    }

    fn set_failed(&self, message: &str) {
      self.inner.set_failed(message);
    }
  }

  #[test]
  fn test_finish_output_write_failure_fails_run() {
    let sink = ReadOnlyOutputSink::default();
    let status = Reporter::new(&sink).finish(Ok(DownloadResult {
      download_path: PathBuf::from("/home/user/out"),
      artifact_names: vec!["build-logs".to_string()],
      files_downloaded: 3,
    }));

    assert_eq!(status, RunStatus::Failed);
    assert_eq!(
      sink.inner.events(),
      vec![SinkEvent::Failed(
        "failed to set output 'download-path': output file is read-only".to_string()
      )]
    );
    assert!(
      !sink
        .inner
        .info_lines()
        .iter()
        .any(|l| l == "Artifact download complete!")
    );
  }
}
