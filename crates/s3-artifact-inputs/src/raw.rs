use std::collections::HashMap;

use s3_artifact_config::EnvSnapshot;

const INPUT_PREFIX: &str = "INPUT_";

/// Environment variable name the runner uses to deliver input `name`.
///
/// The name is upper-cased and spaces become underscores. Hyphens are kept,
/// so `s3-bucket` arrives as `INPUT_S3-BUCKET`.
pub fn input_env_key(name: &str) -> String {
  format!("{}{}", INPUT_PREFIX, name.replace(' ', "_").to_uppercase())
}

/// The action's named inputs, unvalidated.
#[derive(Debug, Clone, Default)]
pub struct RawInputs {
  // Keyed by `input_env_key`, so lookups are case-insensitive on the name.
  values: HashMap<String, String>,
}

impl RawInputs {
  pub fn new() -> Self {
    Self::default()
  }

  /// Collect the `INPUT_*` variables delivered by the runner.
  pub fn from_env(env: &EnvSnapshot) -> Self {
    let values = env
      .vars()
      .filter(|(k, _)| k.starts_with(INPUT_PREFIX))
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    Self { values }
  }

  /// Set an input, replacing any value delivered through the environment.
  pub fn set(&mut self, name: &str, value: impl Into<String>) {
    self.values.insert(input_env_key(name), value.into());
  }

  /// Builder form of [`set`](Self::set).
  pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
    self.set(name, value);
    self
  }

  /// Trimmed value of an input. Empty values read as absent.
  pub fn get(&self, name: &str) -> Option<&str> {
    self
      .values
      .get(&input_env_key(name))
      .map(|v| v.trim())
      .filter(|v| !v.is_empty())
  }
}
