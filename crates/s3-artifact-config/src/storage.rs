use serde::Serialize;

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Object-store backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
  /// Bucket holding the artifacts. Never empty.
  pub bucket: String,

  /// Key prefix inside the bucket.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub prefix: Option<String>,

  /// Custom endpoint URL for S3-compatible stores (MinIO, R2, ...).
  #[serde(skip_serializing_if = "Option::is_none")]
  pub endpoint: Option<String>,

  pub region: String,

  /// Put the bucket in the URL path instead of the hostname.
  pub force_path_style: bool,
}

impl StorageConfig {
  /// Assemble a storage config.
  ///
  /// A custom endpoint always implies path-style addressing, so
  /// `force_path_style` ends up true when either the flag is set or an
  /// endpoint is present.
  pub fn new(
    bucket: impl Into<String>,
    prefix: Option<String>,
    endpoint: Option<String>,
    region: impl Into<String>,
    force_path_style: bool,
  ) -> Self {
    let force_path_style = force_path_style || endpoint.is_some();
    Self {
      bucket: bucket.into(),
      prefix,
      endpoint,
      region: region.into(),
      force_path_style,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config(flag: bool, endpoint: Option<&str>) -> StorageConfig {
    StorageConfig::new(
      "ci-artifacts",
      None,
      endpoint.map(str::to_string),
      DEFAULT_REGION,
      flag,
    )
  }

  #[test]
  fn test_force_path_style_off_by_default() {
    assert!(!config(false, None).force_path_style);
  }

  #[test]
  fn test_endpoint_forces_path_style() {
    assert!(config(false, Some("http://x")).force_path_style);
  }

  #[test]
  fn test_flag_forces_path_style() {
    assert!(config(true, None).force_path_style);
    assert!(config(true, Some("http://x")).force_path_style);
  }

  #[test]
  fn test_serialize_camel_case() {
    let value = serde_json::to_value(config(false, Some("http://minio:9000"))).unwrap();
    assert_eq!(
      value,
      serde_json::json!({
        "bucket": "ci-artifacts",
        "endpoint": "http://minio:9000",
        "region": "us-east-1",
        "forcePathStyle": true,
      })
    );
  }
}
