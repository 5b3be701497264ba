use std::path::PathBuf;

use serde::Serialize;

use crate::lenient::LenientInt;

/// Which artifacts to download and where to put them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
  /// Exact artifact name.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,

  /// Glob matched against artifact names.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pattern: Option<String>,

  /// Absolute destination directory.
  pub path: PathBuf,

  /// Extract every matched artifact into `path` instead of one
  /// subdirectory per artifact.
  pub merge_multiple: bool,

  pub repository: String,
  pub run_id: LenientInt,
}

/// How a request selects artifacts.
///
/// Both `name` and `pattern` may be set; the retrieval engine decides which
/// one wins. For reporting, a name takes precedence over a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
  Name(&'a str),
  Pattern(&'a str),
  All,
}

impl DownloadRequest {
  pub fn selection(&self) -> Selection<'_> {
    match (&self.name, &self.pattern) {
      (Some(name), _) => Selection::Name(name),
      (None, Some(pattern)) => Selection::Pattern(pattern),
      (None, None) => Selection::All,
    }
  }
}
