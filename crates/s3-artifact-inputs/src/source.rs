//! Ordered fallback chains.

use std::ffi::OsString;

use s3_artifact_config::EnvSnapshot;

use crate::error::InputError;
use crate::raw::RawInputs;

/// One place a field value can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
  /// A named action input.
  Input(&'static str),
  /// An environment variable.
  Env(&'static str),
  /// The process working directory.
  CurrentDir,
  /// A fixed value.
  Default(&'static str),
}

/// Resolves fields against a fixed set of inputs and environment.
pub struct Resolver<'a> {
  inputs: &'a RawInputs,
  env: &'a EnvSnapshot,
}

impl<'a> Resolver<'a> {
  pub fn new(inputs: &'a RawInputs, env: &'a EnvSnapshot) -> Self {
    Self { inputs, env }
  }

  /// Value of a single source. Empty inputs and variables yield nothing, and
  /// so does a working directory that is not valid UTF-8.
  pub fn lookup(&self, source: Source) -> Option<String> {
    self.lookup_os(source)?.into_string().ok()
  }

  /// Like [`lookup`](Self::lookup), but keeps the working directory as the
  /// platform string it is.
  pub fn lookup_os(&self, source: Source) -> Option<OsString> {
    match source {
      Source::Input(name) => self.inputs.get(name).map(OsString::from),
      Source::Env(var) => self.env.non_empty_var(var).map(OsString::from),
      Source::CurrentDir => Some(self.env.current_dir().as_os_str().to_owned()),
      Source::Default(value) => Some(OsString::from(value)),
    }
  }

  /// First value the chain yields.
  pub fn resolve(&self, chain: &[Source]) -> Option<String> {
    chain.iter().find_map(|source| self.lookup(*source))
  }

  /// First value the chain yields, for chains that name a path.
  pub fn resolve_os(&self, chain: &[Source]) -> Option<OsString> {
    chain.iter().find_map(|source| self.lookup_os(*source))
  }

  /// Like [`resolve`](Self::resolve), but a chain that yields nothing is an
  /// error naming `name`.
  pub fn required(&self, name: &str, chain: &[Source]) -> Result<String, InputError> {
    self.resolve(chain).ok_or_else(|| InputError::Required {
      name: name.to_string(),
    })
  }

  /// A boolean flag: true only when the chain resolves to exactly `"true"`.
  pub fn flag(&self, chain: &[Source]) -> bool {
    self.resolve(chain).as_deref() == Some("true")
  }
}
