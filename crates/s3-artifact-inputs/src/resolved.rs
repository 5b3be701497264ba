use std::path::PathBuf;

use s3_artifact_config::{DownloadRequest, EnvSnapshot, LenientInt, StorageConfig};
use tracing::debug;

use crate::error::InputError;
use crate::fields;
use crate::path::resolve_path;
use crate::raw::RawInputs;
use crate::source::Resolver;

/// Every input field after fallback, defaulting and path expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInputs {
  pub name: Option<String>,
  pub pattern: Option<String>,
  /// Absolute destination directory.
  pub path: PathBuf,
  pub merge_multiple: bool,
  pub repository: String,
  pub run_id: LenientInt,
  pub bucket: String,
  pub prefix: Option<String>,
  pub endpoint: Option<String>,
  pub region: String,
  /// The explicit flag only. See [`StorageConfig::new`] for the endpoint rule.
  pub force_path_style: bool,
}

impl ResolvedInputs {
  /// Resolve all fields.
  ///
  /// Fails if `s3-bucket` is missing, or if a `~` destination cannot be
  /// expanded. A malformed `run-id` is not an error; it resolves to
  /// [`LenientInt::NAN`].
  pub fn resolve(inputs: &RawInputs, env: &EnvSnapshot) -> Result<Self, InputError> {
    let resolver = Resolver::new(inputs, env);

    let bucket = resolver.required(fields::S3_BUCKET, fields::S3_BUCKET_CHAIN)?;

    // PATH_CHAIN ends in CurrentDir, so it always yields
    let raw_path = resolver.resolve_os(fields::PATH_CHAIN).unwrap_or_default();
    let path = resolve_path(&raw_path, env)?;

    let run_id_raw = resolver.resolve(fields::RUN_ID_CHAIN).unwrap_or_default();
    let run_id = LenientInt::parse(&run_id_raw);
    if run_id.is_nan() {
      debug!(run_id = %run_id_raw, "run_id_not_numeric");
    }

    let resolved = Self {
      name: resolver.resolve(fields::NAME_CHAIN),
      pattern: resolver.resolve(fields::PATTERN_CHAIN),
      path,
      merge_multiple: resolver.flag(fields::MERGE_MULTIPLE_CHAIN),
      repository: resolver.resolve(fields::REPOSITORY_CHAIN).unwrap_or_default(),
      run_id,
      bucket,
      prefix: resolver.resolve(fields::S3_PREFIX_CHAIN),
      endpoint: resolver.resolve(fields::S3_ENDPOINT_CHAIN),
      region: resolver.resolve(fields::S3_REGION_CHAIN).unwrap_or_default(),
      force_path_style: resolver.flag(fields::S3_FORCE_PATH_STYLE_CHAIN),
    };

    debug!(
      bucket = %resolved.bucket,
      region = %resolved.region,
      path = %resolved.path.display(),
      repository = %resolved.repository,
      run_id = %resolved.run_id,
      "inputs_resolved"
    );

    Ok(resolved)
  }

  pub fn storage_config(&self) -> StorageConfig {
    StorageConfig::new(
      self.bucket.clone(),
      self.prefix.clone(),
      self.endpoint.clone(),
      self.region.clone(),
      self.force_path_style,
    )
  }

  pub fn download_request(&self) -> DownloadRequest {
    DownloadRequest {
      name: self.name.clone(),
      pattern: self.pattern.clone(),
      path: self.path.clone(),
      merge_multiple: self.merge_multiple,
      repository: self.repository.clone(),
      run_id: self.run_id,
    }
  }
}

#[cfg(test)]
mod tests {
  use s3_artifact_config::vars;

  use super::*;

  fn env() -> EnvSnapshot {
    EnvSnapshot::new("/work/repo", Some(PathBuf::from("/home/user")))
  }

  fn inputs() -> RawInputs {
    RawInputs::new().with("s3-bucket", "ci-artifacts")
  }

  #[test]
  fn test_defaults() {
    let resolved = ResolvedInputs::resolve(&inputs(), &env()).unwrap();

    assert_eq!(resolved.name, None);
    assert_eq!(resolved.pattern, None);
    assert_eq!(resolved.path, PathBuf::from("/work/repo"));
    assert!(!resolved.merge_multiple);
    assert_eq!(resolved.repository, "");
    assert_eq!(resolved.run_id, LenientInt::new(0));
    assert_eq!(resolved.bucket, "ci-artifacts");
    assert_eq!(resolved.prefix, None);
    assert_eq!(resolved.endpoint, None);
    assert_eq!(resolved.region, "us-east-1");
    assert!(!resolved.force_path_style);
  }

  #[test]
  fn test_env_fallbacks() {
    let env = env()
      .with_var(vars::WORKSPACE, "/runner/work/widgets")
      .with_var(vars::REPOSITORY, "acme/widgets")
      .with_var(vars::RUN_ID, "42");

    let resolved = ResolvedInputs::resolve(&inputs(), &env).unwrap();
    assert_eq!(resolved.path, PathBuf::from("/runner/work/widgets"));
    assert_eq!(resolved.repository, "acme/widgets");
    assert_eq!(resolved.run_id, LenientInt::new(42));
  }

  #[test]
  fn test_explicit_inputs_win() {
    let env = env()
      .with_var(vars::WORKSPACE, "/runner/work/widgets")
      .with_var(vars::REPOSITORY, "acme/widgets")
      .with_var(vars::RUN_ID, "42");
    let inputs = inputs()
      .with("name", "build")
      .with("pattern", "*.zip")
      .with("path", "~/out")
      .with("merge-multiple", "true")
      .with("repository", "acme/other")
      .with("run-id", "7")
      .with("s3-prefix", "artifacts/")
      .with("s3-endpoint", "http://minio:9000")
      .with("s3-region", "eu-central-1")
      .with("s3-force-path-style", "true");

    let resolved = ResolvedInputs::resolve(&inputs, &env).unwrap();
    assert_eq!(resolved.name.as_deref(), Some("build"));
    assert_eq!(resolved.pattern.as_deref(), Some("*.zip"));
    assert_eq!(resolved.path, PathBuf::from("/home/user/out"));
    assert!(resolved.merge_multiple);
    assert_eq!(resolved.repository, "acme/other");
    assert_eq!(resolved.run_id, LenientInt::new(7));
    assert_eq!(resolved.prefix.as_deref(), Some("artifacts/"));
    assert_eq!(resolved.endpoint.as_deref(), Some("http://minio:9000"));
    assert_eq!(resolved.region, "eu-central-1");
    assert!(resolved.force_path_style);
  }

  #[test]
  fn test_missing_bucket() {
    let err = ResolvedInputs::resolve(&RawInputs::new(), &env()).unwrap_err();
    assert!(matches!(err, InputError::Required { ref name } if name == "s3-bucket"));
  }

  #[test]
  fn test_blank_bucket_is_missing() {
    let inputs = RawInputs::new().with("s3-bucket", "   ");
    assert!(ResolvedInputs::resolve(&inputs, &env()).is_err());
  }

  #[test]
  fn test_malformed_run_id_is_permissive() {
    let inputs = inputs().with("run-id", "latest");
    let resolved = ResolvedInputs::resolve(&inputs, &env()).unwrap();
    assert!(resolved.run_id.is_nan());
    assert!(resolved.download_request().run_id.is_nan());
  }

  #[test]
  fn test_storage_config_endpoint_forces_path_style() {
    let inputs = inputs().with("s3-endpoint", "http://minio:9000");
    let storage = ResolvedInputs::resolve(&inputs, &env())
      .unwrap()
      .storage_config();
    assert!(storage.force_path_style);
    assert_eq!(storage.region, "us-east-1");
  }

  #[test]
  fn test_download_request_mirrors_inputs() {
    let inputs = inputs().with("name", "build").with("path", "dist");
    let resolved = ResolvedInputs::resolve(&inputs, &env()).unwrap();
    let request = resolved.download_request();

    assert_eq!(request.name.as_deref(), Some("build"));
    assert_eq!(request.pattern, None);
    assert_eq!(request.path, PathBuf::from("/work/repo/dist"));
    assert!(!request.merge_multiple);
  }
}
