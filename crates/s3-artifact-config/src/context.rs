use serde::Serialize;

use crate::env::{EnvSnapshot, vars};
use crate::lenient::LenientInt;

/// The pipeline run that invoked the action.
///
/// Derived from the environment alone. Explicit `repository` / `run-id`
/// inputs only affect the [`DownloadRequest`](crate::DownloadRequest), never
/// this record, so it always describes the run that is actually executing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineContext {
  pub repository: String,
  pub run_id: LenientInt,
  pub run_attempt: LenientInt,
}

impl PipelineContext {
  pub const DEFAULT_REPOSITORY: &'static str = "unknown/unknown";

  pub fn from_env(env: &EnvSnapshot) -> Self {
    let repository = env
      .non_empty_var(vars::REPOSITORY)
      .unwrap_or(Self::DEFAULT_REPOSITORY)
      .to_string();
    let run_id = LenientInt::parse(env.non_empty_var(vars::RUN_ID).unwrap_or("0"));
    let run_attempt = LenientInt::parse(env.non_empty_var(vars::RUN_ATTEMPT).unwrap_or("1"));

    Self {
      repository,
      run_id,
      run_attempt,
    }
  }
}
