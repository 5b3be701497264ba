use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Outcome of a successful download, as reported by the retrieval collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResult {
  /// Directory the artifacts were extracted into.
  pub download_path: PathBuf,
  /// Names of the downloaded artifacts, in download order.
  pub artifact_names: Vec<String>,
  pub files_downloaded: u64,
}
