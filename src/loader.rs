use std::collections::HashMap;

use tracing::debug;

use crate::error::Fault;
use crate::scan::{expression_end, matching_end};
use crate::token::{join, Glyph, Token, TokenKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
  /// Raw prefixed name, e.g. `§add`.
  pub name: String,
  pub params: Vec<String>,
  pub body: Vec<Token>,
}

pub type Functions = HashMap<String, Function>;

#[derive(Debug, Default)]
pub struct Program {
  pub functions: Functions,
  pub globals: Vec<Token>,
}

/// Splits the token stream into function definitions and top-level code.
pub fn load(tokens: &[Token]) -> Result<Program, Fault> {
  let mut program = Program::default();

  let mut i = 0;
  while i < tokens.len() {
    if !tokens[i].is(Glyph::FuncStart) {
      program.globals.push(tokens[i].clone());
      i += 1;
      continue;
    }

    let end = matching_end(tokens, i, Glyph::FuncStart, Glyph::FuncEnd)?;
    let function = define(&tokens[i + 1..end])?;
    debug!(name = %function.name, params = ?function.params, "defined function");
    program.functions.insert(function.name.clone(), function);

    i = end + 1;
  }

  debug!(
    functions = program.functions.len(),
    globals = program.globals.len(),
    "loaded program"
  );
  Ok(program)
}

fn define(definition: &[Token]) -> Result<Function, Fault> {
  let name = match definition.first() {
    Some(token) if token.is_call() => token.slice.clone(),
    _ => return Err(Fault::MissingFunctionName),
  };

  let body_start = expression_end(definition, 1);
  let params = definition[1..body_start]
    .iter()
    .map(|token| match token.kind {
      TokenKind::Identifier => Ok(token.slice.clone()),
      _ => Err(Fault::InvalidParameter {
        function: name.clone(),
        param: token.slice.clone(),
      }),
    })
    .collect::<Result<Vec<_>, _>>()?;
  let body = definition[body_start..].to_vec();
  debug!(name = %name, body = %join(&body), "function body");

  Ok(Function {
    name,
    params,
    body,
  })
}
