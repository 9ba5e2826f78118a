//! Error types and the control signal threaded through block execution.

use thiserror::Error;

use crate::object::Value;
use crate::token::Glyph;

/// Structural faults. They abort the run and are never intercepted by the language's
/// own `⛌ … ⎁` handlers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Fault {
  #[error("Syntax error: Missing '{end}' for '{start}'.")]
  UnmatchedBlock { start: Glyph, end: Glyph },
  #[error("Missing function name or § symbol in definition.")]
  MissingFunctionName,
  #[error("Invalid parameter '{param}' in definition of {function}.")]
  InvalidParameter { function: String, param: String },
  #[error("Failed to write program output: {0}")]
  Output(String),
}

/// Non-local outcome of executing a block. `Ok(next_index)` is the normal continuation.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
  Return(Value),
  /// A catchable error carrying its message.
  Error(String),
  Fault(Fault),
}

impl Signal {
  pub fn error(message: impl Into<String>) -> Self {
    Signal::Error(message.into())
  }

  pub fn syntax(message: impl AsRef<str>) -> Self {
    Signal::Error(format!("Syntax error: {}", message.as_ref()))
  }
}

impl From<Fault> for Signal {
  fn from(fault: Fault) -> Self {
    Signal::Fault(fault)
  }
}

pub type Flow<T> = Result<T, Signal>;

/// Everything `Runtime::execute` can report.
#[derive(Debug, Error)]
pub enum RunError {
  #[error("File not found: '{path}'")]
  FileNotFound {
    path: String,
    #[source]
    source: std::io::Error,
  },
  #[error("{0}")]
  Load(Fault),
  #[error("{0}")]
  Fatal(Fault),
  #[error("'RETURN' ({}) command found in global scope.", Glyph::Return)]
  ReturnInGlobalScope,
  #[error("{0}")]
  Unhandled(String),
}

impl RunError {
  /// Headline shown above the message when the error is reported.
  pub fn label(&self) -> &'static str {
    match self {
      RunError::FileNotFound { .. } => "FILE ERROR",
      RunError::Load(_) => "PARSE ERROR (Function Definition)",
      RunError::Fatal(_) => "SYNTAX ERROR",
      RunError::ReturnInGlobalScope => "FATAL ERROR",
      RunError::Unhandled(_) => "UNHANDLED PROGRAM ERROR",
    }
  }
}

impl From<Signal> for RunError {
  fn from(signal: Signal) -> Self {
    match signal {
      Signal::Return(_) => RunError::ReturnInGlobalScope,
      Signal::Error(message) => RunError::Unhandled(message),
      Signal::Fault(fault) => RunError::Fatal(fault),
    }
  }
}
