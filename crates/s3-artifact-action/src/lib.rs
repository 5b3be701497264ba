//! S3 Artifact Action
//!
//! This crate ties the action together. An [`Action`] owns a
//! [`Downloader`](s3_artifact_downloader::Downloader) and an [`ActionSink`],
//! and turns raw inputs into exactly one download attempt.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ Action::run(inputs, env) -> Result<DownloadResult, ActionError>  │
//! │   - resolve inputs, assemble StorageConfig / PipelineContext     │
//! │   - Reporter::configuration                                      │
//! │   - Downloader::download (single await point)                    │
//! └──────────────────────────────────────────────────────────────────┘
//!                                  │
//!                                  ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │ Reporter::finish(outcome) -> RunStatus                           │
//! │   - success: set `download-path`, print summary                  │
//! │   - failure: set_failed(message)                                 │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

mod action;
mod error;
mod report;
mod sink;

pub use action::Action;
pub use error::ActionError;
pub use report::{Reporter, RunStatus};
pub use sink::{ActionSink, RecordingSink, SinkEvent, WorkflowCommandSink};
