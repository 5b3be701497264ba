//! Where progress lines, step outputs and failures go.
//!
//! The pipeline runner reads plain stdout lines as log output and recognizes
//! `::command::` lines as workflow commands. Step outputs go to the file
//! named by `GITHUB_OUTPUT` when the runner provides one.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use s3_artifact_config::{EnvSnapshot, vars};
use tracing::warn;
use uuid::Uuid;

/// Receives everything the action reports to the pipeline.
pub trait ActionSink: Send + Sync {
  /// Emit one informational log line.
  fn info(&self, line: &str);

  /// Set a named step output.
  fn set_output(&self, name: &str, value: &str) -> io::Result<()>;

  /// Mark the run as failed with `message`.
  fn set_failed(&self, message: &str);
}

/// Sink that speaks the runner's workflow-command protocol.
pub struct WorkflowCommandSink<W> {
  writer: Mutex<W>,
  output_file: Option<PathBuf>,
}

impl WorkflowCommandSink<io::Stdout> {
  /// Write to stdout, with outputs going to `GITHUB_OUTPUT` if it is set.
  pub fn stdout(env: &EnvSnapshot) -> Self {
    Self::new(io::stdout(), env.non_empty_var(vars::OUTPUT).map(PathBuf::from))
  }
}

impl<W: Write + Send> WorkflowCommandSink<W> {
  /// Create a sink writing lines to `writer`.
  ///
  /// Without an `output_file`, outputs fall back to the legacy
  /// `::set-output` command on `writer`.
  pub fn new(writer: W, output_file: Option<PathBuf>) -> Self {
    Self {
      writer: Mutex::new(writer),
      output_file,
    }
  }

  /// Consume the sink and return the writer.
  pub fn into_inner(self) -> W {
    self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
  }

  fn write_line(&self, line: &str) {
    let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
    if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
      warn!(error = %e, "log_write_failed");
    }
  }
}

impl<W: Write + Send> ActionSink for WorkflowCommandSink<W> {
  fn info(&self, line: &str) {
    self.write_line(line);
  }

  fn set_output(&self, name: &str, value: &str) -> io::Result<()> {
    match &self.output_file {
      Some(path) => {
        let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        write!(file, "{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)?;
        file.flush()
      }
      None => {
        self.write_line(&format!(
          "::set-output name={}::{}",
          escape_property(name),
          escape_data(value)
        ));
        Ok(())
      }
    }
  }

  fn set_failed(&self, message: &str) {
    self.write_line(&format!("::error::{}", escape_data(message)));
  }
}

fn escape_data(value: &str) -> String {
  value
    .replace('%', "%25")
    .replace('\r', "%0D")
    .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
  escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

/// One call made on a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
  Info(String),
  Output { name: String, value: String },
  Failed(String),
}

/// A sink that records every call in memory.
///
/// Useful for tests or for embedding the action in another program.
#[derive(Debug, Default)]
pub struct RecordingSink {
  events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
  pub fn new() -> Self {
    Self::default()
  }

  fn push(&self, event: SinkEvent) {
    self
      .events
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .push(event);
  }

  /// All recorded events, in order.
  pub fn events(&self) -> Vec<SinkEvent> {
    self
      .events
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }

  /// Recorded info lines, in order.
  pub fn info_lines(&self) -> Vec<String> {
    self
      .events()
      .into_iter()
      .filter_map(|e| match e {
        SinkEvent::Info(line) => Some(line),
        _ => None,
      })
      .collect()
  }

  /// Last value set for output `name`.
  pub fn output(&self, name: &str) -> Option<String> {
    self.events().into_iter().rev().find_map(|e| match e {
      SinkEvent::Output { name: n, value } if n == name => Some(value),
      _ => None,
    })
  }

  /// The failure message, if the run was marked failed.
  pub fn failure(&self) -> Option<String> {
    self.events().into_iter().find_map(|e| match e {
      SinkEvent::Failed(message) => Some(message),
      _ => None,
    })
  }
}

impl ActionSink for RecordingSink {
  fn info(&self, line: &str) {
    self.push(SinkEvent::Info(line.to_string()));
  }

  fn set_output(&self, name: &str, value: &str) -> io::Result<()> {
    self.push(SinkEvent::Output {
      name: name.to_string(),
      value: value.to_string(),
    });
    Ok(())
  }

  fn set_failed(&self, message: &str) {
    self.push(SinkEvent::Failed(message.to_string()));
  }
}
