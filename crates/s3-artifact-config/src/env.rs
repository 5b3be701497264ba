//! Environment snapshot.
//!
//! Process-wide state (environment variables, working directory, home
//! directory) is captured once at start-up into an [`EnvSnapshot`]. Every
//! assembler reads from the snapshot instead of the live process, so tests
//! can build a fixed snapshot with [`EnvSnapshot::new`] and [`EnvSnapshot::with_var`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Names of the pipeline environment variables the action consumes.
pub mod vars {
  /// Checkout directory of the pipeline run.
  pub const WORKSPACE: &str = "GITHUB_WORKSPACE";
  /// Repository slug, e.g. "owner/name".
  pub const REPOSITORY: &str = "GITHUB_REPOSITORY";
  /// Numeric id of the pipeline run.
  pub const RUN_ID: &str = "GITHUB_RUN_ID";
  /// Re-execution ordinal of the pipeline run, starting at 1.
  pub const RUN_ATTEMPT: &str = "GITHUB_RUN_ATTEMPT";
  /// File that collects step outputs.
  pub const OUTPUT: &str = "GITHUB_OUTPUT";
  /// Set to "1" when the runner has debug logging enabled.
  pub const RUNNER_DEBUG: &str = "RUNNER_DEBUG";
}

/// Immutable view of the process environment.
#[derive(Debug, Clone)]
pub struct EnvSnapshot {
  vars: HashMap<String, String>,
  current_dir: PathBuf,
  home_dir: Option<PathBuf>,
}

impl EnvSnapshot {
  /// Create an empty snapshot with the given working and home directories.
  pub fn new(current_dir: impl Into<PathBuf>, home_dir: Option<PathBuf>) -> Self {
    Self {
      vars: HashMap::new(),
      current_dir: current_dir.into(),
      home_dir,
    }
  }

  /// Capture the live process environment.
  ///
  /// Variables that are not valid unicode are skipped.
  pub fn capture() -> std::io::Result<Self> {
    let vars = std::env::vars_os()
      .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
      .collect();

    Ok(Self {
      vars,
      current_dir: std::env::current_dir()?,
      home_dir: dirs::home_dir(),
    })
  }

  /// Return a copy of the snapshot with `name` set to `value`.
  pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.vars.insert(name.into(), value.into());
    self
  }

  /// Raw value of a variable, if set.
  pub fn var(&self, name: &str) -> Option<&str> {
    self.vars.get(name).map(String::as_str)
  }

  /// Value of a variable, treating an empty value as unset.
  pub fn non_empty_var(&self, name: &str) -> Option<&str> {
    self.var(name).filter(|v| !v.is_empty())
  }

  /// Iterate over all captured variables.
  pub fn vars(&self) -> impl Iterator<Item = (&str, &str)> {
    self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  pub fn current_dir(&self) -> &Path {
    &self.current_dir
  }

  pub fn home_dir(&self) -> Option<&Path> {
    self.home_dir.as_deref()
  }
}
