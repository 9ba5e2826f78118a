use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use tracing::trace;

use crate::config::Config;
use crate::env::Env;
use crate::error::{Fault, Flow};
use crate::loader::{Function, Functions};
use crate::object::Value;

/// Execution state for one run: the global table, the function table and the stack of
/// call frames. The innermost frame is the active scope; with no frame the globals are.
pub struct Interpreter<W: Write> {
  pub(crate) globals: Env,
  pub(crate) functions: HashMap<String, Rc<Function>>,
  pub(crate) frames: Vec<Env>,
  pub(crate) config: Config,
  out: W,
}

impl<W: Write> Interpreter<W> {
  pub fn new(functions: Functions, config: Config, out: W) -> Self {
    Interpreter {
      globals: Env::new(),
      functions: functions.into_iter().map(|(name, function)| (name, Rc::new(function))).collect(),
      frames: Vec::new(),
      config,
      out,
    }
  }

  pub fn globals(&self) -> &Env {
    &self.globals
  }

  pub fn into_output(self) -> W {
    self.out
  }

  pub(crate) fn local(&self) -> Option<&Env> {
    self.frames.last()
  }

  pub(crate) fn lookup(&self, name: &str) -> Option<&Value> {
    if let Some(value) = self.local().and_then(|frame| frame.get(name)) {
      trace!(name, "found in local scope");
      return Some(value);
    }

    let value = self.globals.get(name);
    if value.is_some() {
      trace!(name, "found in global scope");
    }
    value
  }

  /// Writes to the active frame when it already holds `name`, otherwise to the globals.
  pub(crate) fn assign(&mut self, name: &str, value: Value) {
    match self.frames.last_mut() {
      Some(frame) if frame.contains(name) => {
        trace!(name, "assigning local");
        frame.set(name, value);
      }
      _ => {
        trace!(name, "assigning global");
        self.globals.set(name, value);
      }
    }
  }

  /// Writes straight into the active scope.
  pub(crate) fn bind(&mut self, name: &str, value: Value) {
    match self.frames.last_mut() {
      Some(frame) => frame.set(name, value),
      None => self.globals.set(name, value),
    }
  }

  pub(crate) fn emit(&mut self, value: &Value) -> Flow<()> {
    writeln!(self.out, "{}", value).map_err(|e| Fault::Output(e.to_string()).into())
  }
}
