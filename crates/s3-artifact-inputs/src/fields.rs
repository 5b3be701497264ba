//! Input names and the fallback chain for each field.

use s3_artifact_config::{DEFAULT_REGION, vars};

use crate::source::Source;

pub const NAME: &str = "name";
pub const PATTERN: &str = "pattern";
pub const PATH: &str = "path";
pub const MERGE_MULTIPLE: &str = "merge-multiple";
pub const REPOSITORY: &str = "repository";
pub const RUN_ID: &str = "run-id";
pub const S3_BUCKET: &str = "s3-bucket";
pub const S3_PREFIX: &str = "s3-prefix";
pub const S3_ENDPOINT: &str = "s3-endpoint";
pub const S3_REGION: &str = "s3-region";
pub const S3_FORCE_PATH_STYLE: &str = "s3-force-path-style";

/// Name of the step output carrying the download directory.
pub const OUTPUT_DOWNLOAD_PATH: &str = "download-path";

pub const NAME_CHAIN: &[Source] = &[Source::Input(NAME)];
pub const PATTERN_CHAIN: &[Source] = &[Source::Input(PATTERN)];

pub const PATH_CHAIN: &[Source] = &[
  Source::Input(PATH),
  Source::Env(vars::WORKSPACE),
  Source::CurrentDir,
];

pub const MERGE_MULTIPLE_CHAIN: &[Source] = &[Source::Input(MERGE_MULTIPLE)];

pub const REPOSITORY_CHAIN: &[Source] = &[
  Source::Input(REPOSITORY),
  Source::Env(vars::REPOSITORY),
  Source::Default(""),
];

pub const RUN_ID_CHAIN: &[Source] = &[
  Source::Input(RUN_ID),
  Source::Env(vars::RUN_ID),
  Source::Default("0"),
];

pub const S3_BUCKET_CHAIN: &[Source] = &[Source::Input(S3_BUCKET)];
pub const S3_PREFIX_CHAIN: &[Source] = &[Source::Input(S3_PREFIX)];
pub const S3_ENDPOINT_CHAIN: &[Source] = &[Source::Input(S3_ENDPOINT)];
pub const S3_REGION_CHAIN: &[Source] = &[Source::Input(S3_REGION), Source::Default(DEFAULT_REGION)];
pub const S3_FORCE_PATH_STYLE_CHAIN: &[Source] = &[Source::Input(S3_FORCE_PATH_STYLE)];
