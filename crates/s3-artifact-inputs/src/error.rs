//! Input resolution errors.

/// Errors that stop configuration before any download is attempted.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
  /// A required input was missing or empty.
  #[error("Input required and not supplied: {name}")]
  Required { name: String },

  /// A `~` path was given but the home directory is unknown.
  #[error("cannot expand '{path}': home directory could not be determined")]
  HomeDirUnavailable { path: String },
}
