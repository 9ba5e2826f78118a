use std::fs;
use std::io::{self, Write};

use colored::Colorize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::RunError;
use crate::interpreter::Interpreter;
use crate::lexer::Lexer;
use crate::loader::load;
use crate::token::join;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  Completed,
  Failed,
}

/// One source program ready to run.
#[derive(Debug)]
pub struct Runtime {
  name: String,
  source: String,
  config: Config,
}

impl Runtime {
  pub fn new(path: &str, config: Config) -> Result<Self, RunError> {
    info!(path, "initializing runtime");
    let source = fs::read_to_string(path).map_err(|source| RunError::FileNotFound {
      path: path.to_owned(),
      source,
    })?;

    Ok(Self::from_source(path, source, config))
  }

  pub fn from_source(name: &str, source: impl Into<String>, config: Config) -> Self {
    Runtime {
      name: name.to_owned(),
      source: source.into(),
      config,
    }
  }

  /// Tokenizes, loads and runs the program, writing its output to `out`.
  pub fn execute<W: Write>(&self, out: W) -> Result<W, RunError> {
    let tokens = Lexer::new(&self.source).lex();
    if self.config.debug {
      debug!(tokens = %join(&tokens), "token stream");
    }

    let program = load(&tokens).map_err(RunError::Load)?;
    debug!(globals = program.globals.len(), "executing global scope");

    let mut interpreter = Interpreter::new(program.functions, self.config, out);
    interpreter.execute_body(&program.globals)?;
    Ok(interpreter.into_output())
  }

  /// Runs against stdout. Errors are reported on stderr and never propagate.
  pub fn run(&self) -> Status {
    info!(program = %self.name, "running");
    let stdout = io::stdout();
    match self.execute(stdout.lock()) {
      Ok(_) => Status::Completed,
      Err(error) => {
        report(&error);
        Status::Failed
      }
    }
  }
}

pub fn report(error: &RunError) {
  eprintln!("{}\n{}", format!("!!! {} !!!", error.label()).red().bold(), error);
}
