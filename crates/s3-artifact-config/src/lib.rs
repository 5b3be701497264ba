//! S3 Artifact Config
//!
//! This crate contains the immutable configuration records passed between the
//! input resolver, the download orchestrator and the external retrieval
//! collaborator.
//!
//! - [`StorageConfig`] describes the object-store backend.
//! - [`PipelineContext`] describes the pipeline run that invoked the action.
//! - [`DownloadRequest`] selects which artifacts to fetch and where to put them.
//! - [`DownloadResult`] is what the collaborator hands back.
//!
//! All records serialize with camelCase keys, which is the shape the
//! collaborator protocol uses on the wire.

mod context;
mod env;
mod lenient;
mod request;
mod result;
mod storage;

pub use context::PipelineContext;
pub use env::{EnvSnapshot, vars};
pub use lenient::LenientInt;
pub use request::{DownloadRequest, Selection};
pub use result::DownloadResult;
pub use storage::{DEFAULT_REGION, StorageConfig};
