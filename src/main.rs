use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use s3_artifact_action::{Action, RunStatus, WorkflowCommandSink};
use s3_artifact_config::{EnvSnapshot, vars};
use s3_artifact_downloader::CommandDownloader;
use s3_artifact_inputs::RawInputs;

/// Download CI artifacts from S3-compatible storage.
///
/// Inputs are read from the runner's INPUT_* environment variables and may be
/// overridden with --input.
#[derive(Parser)]
#[command(name = "download-s3-artifact")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Program that performs the artifact retrieval
  #[arg(long, env = "S3_ARTIFACT_DOWNLOADER")]
  downloader: OsString,

  /// Set an action input, e.g. --input s3-bucket=ci-artifacts
  #[arg(long = "input", value_name = "NAME=VALUE", value_parser = parse_input)]
  inputs: Vec<(String, String)>,

  /// Extra arguments passed to the downloader program
  #[arg(last = true)]
  downloader_args: Vec<OsString>,
}

fn parse_input(s: &str) -> Result<(String, String), String> {
  let (name, value) = s
    .split_once('=')
    .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
  Ok((name.to_string(), value.to_string()))
}

fn main() -> Result<ExitCode> {
  let cli = Cli::parse();

  let env = EnvSnapshot::capture().context("failed to read process environment")?;
  init_tracing(&env);

  let mut inputs = RawInputs::from_env(&env);
  for (name, value) in &cli.inputs {
    inputs.set(name, value.as_str());
  }

  let downloader = CommandDownloader::new(cli.downloader).args(cli.downloader_args);
  let action = Action::new(downloader, WorkflowCommandSink::stdout(&env));

  let rt = tokio::runtime::Runtime::new()?;
  let status = rt.block_on(async { action.execute(&inputs, &env).await });
  debug!(?status, "action_finished");

  Ok(match status {
    RunStatus::Succeeded => ExitCode::SUCCESS,
    RunStatus::Failed => ExitCode::FAILURE,
  })
}

/// Log to stderr without colors; the runner captures it into a plain log.
fn init_tracing(env: &EnvSnapshot) {
  tracing_subscriber::fmt()
    .with_env_filter(log_filter(env))
    .with_writer(std::io::stderr)
    .with_ansi(false)
    .init();
}

/// `RUST_LOG` wins; otherwise `debug` when the runner has debug logging on,
/// `warn` when it doesn't.
fn log_filter(env: &EnvSnapshot) -> EnvFilter {
  let default = if env.var(vars::RUNNER_DEBUG) == Some("1") {
    "debug"
  } else {
    "warn"
  };

  env
    .non_empty_var("RUST_LOG")
    .and_then(|directives| EnvFilter::try_new(directives).ok())
    .unwrap_or_else(|| EnvFilter::new(default))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_input() {
    assert_eq!(
      parse_input("s3-bucket=ci-artifacts").unwrap(),
      ("s3-bucket".to_string(), "ci-artifacts".to_string())
    );
    assert_eq!(
      parse_input("s3-prefix=a=b").unwrap(),
      ("s3-prefix".to_string(), "a=b".to_string())
    );
    assert_eq!(parse_input("path=").unwrap(), ("path".to_string(), String::new()));
    assert!(parse_input("s3-bucket").is_err());
  }

  #[test]
  fn test_cli_parses() {
    let cli = Cli::try_parse_from([
      "download-s3-artifact",
      "--downloader",
      "retriever",
      "--input",
      "s3-bucket=ci-artifacts",
      "--input",
      "name=build",
      "--",
      "--verbose",
    ])
    .unwrap();

    assert_eq!(cli.downloader, OsString::from("retriever"));
    assert_eq!(cli.inputs.len(), 2);
    assert_eq!(cli.downloader_args, vec![OsString::from("--verbose")]);
  }

  #[test]
  fn test_cli_definition() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
  }

  #[test]
  fn test_log_filter_defaults_to_warn() {
    use tracing_subscriber::filter::LevelFilter;

    let env = EnvSnapshot::new("/work", None);
    assert_eq!(log_filter(&env).max_level_hint(), Some(LevelFilter::WARN));

    let env = env.with_var(vars::RUNNER_DEBUG, "1");
    assert_eq!(log_filter(&env).max_level_hint(), Some(LevelFilter::DEBUG));

    let env = env.with_var("RUST_LOG", "error");
    assert_eq!(log_filter(&env).max_level_hint(), Some(LevelFilter::ERROR));
  }
}
