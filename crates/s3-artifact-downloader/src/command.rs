use std::ffi::OsString;
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use s3_artifact_config::{DownloadRequest, DownloadResult, PipelineContext, StorageConfig};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::{DownloadError, Downloader};

/// Document written to the retrieval program's stdin.
#[derive(Debug, Serialize)]
pub struct DownloadPayload<'a> {
  pub storage: &'a StorageConfig,
  pub context: &'a PipelineContext,
  pub request: &'a DownloadRequest,
}

/// Document read from the retrieval program's stdout.
///
/// ```json
/// { "result": { "downloadPath": "/out", "artifactNames": ["a"], "filesDownloaded": 1 } }
/// { "error": "artifact not found" }
/// ```
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
enum DownloadResponse {
  Result(DownloadResult),
  Error(String),
}

/// Downloader backed by an external retrieval program.
///
/// The program receives a [`DownloadPayload`] as JSON on stdin and answers
/// with one JSON document on stdout. Its stderr is passed through to ours so
/// progress output stays visible in the pipeline log.
///
/// A non-zero exit without an `error` document is reported as
/// `artifact downloader exited with code N`.
pub struct CommandDownloader {
  program: OsString,
  args: Vec<OsString>,
}

impl CommandDownloader {
  /// Create a downloader that runs `program`.
  pub fn new(program: impl Into<OsString>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
    }
  }

  /// Append an argument to pass to the program.
  pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
    self.args.push(arg.into());
    self
  }

  /// Append several arguments to pass to the program.
  pub fn args<I, A>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = A>,
    A: Into<OsString>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  fn program_name(&self) -> String {
    self.program.to_string_lossy().into_owned()
  }
}

#[async_trait]
impl Downloader for CommandDownloader {
  #[instrument(name = "command_download", skip_all, fields(program = %self.program_name()))]
  async fn download(
    &self,
    storage: &StorageConfig,
    context: &PipelineContext,
    request: &DownloadRequest,
  ) -> Result<DownloadResult, DownloadError> {
    let payload = serde_json::to_vec(&DownloadPayload {
      storage,
      context,
      request,
    })?;

    let mut child = Command::new(&self.program)
      .args(&self.args)
      .stdin(Stdio::piped())
      .stdout(Stdio::piped())
      .stderr(Stdio::inherit())
      .kill_on_drop(true)
      .spawn()
      .map_err(|source| DownloadError::Spawn {
        program: self.program_name(),
        source,
      })?;

    if let Some(mut stdin) = child.stdin.take() {
      // The program may answer without reading its input
      match stdin.write_all(&payload).await {
        Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => return Err(e.into()),
        _ => {}
      }
      // Dropping stdin closes the pipe so the program sees EOF
    }

    let output = child.wait_with_output().await?;
    debug!(
      status = %output.status,
      stdout_bytes = output.stdout.len(),
      "downloader_exited"
    );

    let response = serde_json::from_slice::<DownloadResponse>(&output.stdout);
    match (response, output.status.success()) {
      (Ok(DownloadResponse::Error(message)), _) => Err(DownloadError::Failed(message)),
      (Ok(DownloadResponse::Result(result)), true) => Ok(result),
      (Err(e), true) => Err(DownloadError::Protocol(e)),
      (_, false) => Err(DownloadError::Failed(exit_message(output.status))),
    }
  }
}

fn exit_message(status: ExitStatus) -> String {
  match status.code() {
    Some(code) => format!("artifact downloader exited with code {}", code),
    None => "artifact downloader was terminated by a signal".to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_result_response() {
    let response: DownloadResponse = serde_json::from_str(
      r#"{"result":{"downloadPath":"/out","artifactNames":["a","b"],"filesDownloaded":4}}"#,
    )
    .unwrap();

    match response {
      DownloadResponse::Result(result) => {
        assert_eq!(result.download_path, std::path::PathBuf::from("/out"));
        assert_eq!(result.artifact_names, vec!["a", "b"]);
        assert_eq!(result.files_downloaded, 4);
      }
      DownloadResponse::Error(e) => panic!("unexpected error response: {}", e),
    }
  }

  #[test]
  fn test_parse_error_response() {
    let response: DownloadResponse =
      serde_json::from_str(r#"{"error":"artifact not found"}"#).unwrap();
    assert!(matches!(response, DownloadResponse::Error(ref m) if m == "artifact not found"));
  }
}
