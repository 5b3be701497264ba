//! Destination path resolution.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use s3_artifact_config::EnvSnapshot;

use crate::error::InputError;

const HOME_MARKER: char = '~';

/// Resolve a destination string into an absolute path.
///
/// A leading `~` is replaced by the home directory and the remainder joined
/// onto it; anything else is resolved against the working directory. The
/// result is normalized lexically. The path is not required to exist.
///
/// Strings that are not valid UTF-8 are only expanded when `~` is a whole
/// leading component (`~/out`).
pub fn resolve_path(raw: impl AsRef<OsStr>, env: &EnvSnapshot) -> Result<PathBuf, InputError> {
  let raw = raw.as_ref();
  let home_relative = match raw.to_str() {
    // "~/out" must not turn into the root-relative "/out"
    Some(s) => s
      .strip_prefix(HOME_MARKER)
      .map(|rest| PathBuf::from(rest.trim_start_matches(std::path::is_separator))),
    None => Path::new(raw)
      .strip_prefix(HOME_MARKER.to_string())
      .ok()
      .map(Path::to_path_buf),
  };

  let joined = match home_relative {
    Some(rest) => {
      let home = env.home_dir().ok_or_else(|| InputError::HomeDirUnavailable {
        path: raw.to_string_lossy().into_owned(),
      })?;
      home.join(rest)
    }
    None => env.current_dir().join(raw),
  };

  Ok(normalize(&joined))
}

/// Drop `.` components and fold `..` into their parent, without touching
/// the filesystem. `..` at the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
  let mut out = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        out.pop();
      }
      other => out.push(other.as_os_str()),
    }
  }
  out
}
