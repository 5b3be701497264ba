//! S3 Artifact Inputs
//!
//! Resolves the action's named inputs into the records defined in
//! `s3-artifact-config`.
//!
//! Every field is resolved through an ordered chain of [`Source`]s: the first
//! source that yields a non-empty value wins. The chains live in [`fields`] so
//! each field's precedence can be read (and tested) in one place.
//!
//! ```text
//!   RawInputs ─┐
//!              ├─► Resolver ─► ResolvedInputs ─┬─► StorageConfig
//! EnvSnapshot ─┘                               └─► DownloadRequest
//! ```

mod error;
pub mod fields;
mod path;
mod raw;
mod resolved;
mod source;

pub use error::InputError;
pub use path::resolve_path;
pub use raw::{RawInputs, input_env_key};
pub use resolved::ResolvedInputs;
pub use source::{Resolver, Source};
